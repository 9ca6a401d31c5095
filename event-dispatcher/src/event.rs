//! 事件负载（EventData）与类型化事件（Event）
//!
//! 分发器只认识事件名与类型擦除后的负载；`Event` 在其上提供
//! “事件名 ↔ 负载类型”的约定，供 `subscribe` / `emit` 使用。
//!
use std::any::{Any, TypeId, type_name};
use std::fmt;

/// 类型化事件：为负载类型绑定一个稳定的事件名
///
/// 通常通过 `#[derive(Event)]` 实现：
/// ```rust
/// use event_dispatcher::Event;
///
/// #[derive(Event)]
/// #[event(name = "user.created")]
/// struct UserCreated {
///     user_id: u64,
/// }
///
/// assert_eq!(UserCreated::NAME, "user.created");
/// ```
pub trait Event: Send + Sync + 'static {
    /// 事件名（建议常量字符串，不随重构变化）
    const NAME: &'static str;
}

/// 负载的运行时类型标记
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PayloadType {
    id: TypeId,
    name: &'static str,
}

impl PayloadType {
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// 类型擦除后的事件负载
///
/// 分发器不对负载做任何校验；监听器按需 `downcast_ref` 还原。
pub struct EventData {
    value: Box<dyn Any + Send + Sync>,
    payload_type: PayloadType,
}

impl EventData {
    pub fn new<T>(value: T) -> Self
    where
        T: Any + Send + Sync,
    {
        Self {
            value: Box::new(value),
            payload_type: PayloadType::of::<T>(),
        }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.payload_type.id == TypeId::of::<T>()
    }

    pub fn payload_type(&self) -> PayloadType {
        self.payload_type
    }

    pub fn type_name(&self) -> &'static str {
        self.payload_type.name
    }
}

impl fmt::Debug for EventData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventData")
            .field("type", &self.payload_type.name)
            .finish_non_exhaustive()
    }
}
