//! 分发错误定义
//!
//! 分发器本身不做输入校验，也不把“无监听器”视为错误；
//! 这里只覆盖监听器执行失败与类型化监听器的负载类型不匹配。
//!
use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DispatchError {
    /// 监听器返回错误，后续监听器不再执行
    #[error("listener failed: event={event}, position={position}, listener={listener}: {source}")]
    Listener {
        event: String,
        position: usize,
        listener: String,
        #[source]
        source: anyhow::Error,
    },

    /// 类型化监听器收到了与其声明不一致的负载
    #[error(
        "payload type mismatch: event={event}, listener={listener}, expected={expected}, found={found}"
    )]
    PayloadMismatch {
        event: String,
        listener: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl DispatchError {
    /// 出错时正在分发的事件名
    pub fn event(&self) -> &str {
        match self {
            Self::Listener { event, .. } | Self::PayloadMismatch { event, .. } => event,
        }
    }
}

/// 统一 Result 类型别名
pub type DispatchResult<T> = Result<T, DispatchError>;
