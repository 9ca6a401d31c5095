use crate::registry::{DEFAULT_PRIORITY, Priority};
use bon::Builder;
use serde::{Deserialize, Serialize};

/// 分发器配置
///
/// 可通过 builder 构造，也可从配置文件反序列化（缺省字段使用默认值）：
/// ```rust
/// use event_dispatcher::DispatcherConfig;
///
/// let cfg = DispatcherConfig::builder()
///     .name("orders")
///     .default_priority(10)
///     .build();
/// assert_eq!(cfg.name(), "orders");
/// assert_eq!(cfg.default_priority(), 10);
/// ```
#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// `add_listener` / `subscribe` 未显式指定优先级时使用的优先级
    #[builder(default = DEFAULT_PRIORITY)]
    default_priority: Priority,
    /// 分发器名称，仅用于日志
    #[builder(into, default = DispatcherConfig::DEFAULT_NAME.to_owned())]
    name: String,
}

impl DispatcherConfig {
    pub const DEFAULT_NAME: &'static str = "default";

    pub fn default_priority(&self) -> Priority {
        self.default_priority
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            default_priority: DEFAULT_PRIORITY,
            name: Self::DEFAULT_NAME.to_owned(),
        }
    }
}
