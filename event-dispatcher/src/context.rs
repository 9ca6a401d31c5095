//! 分发上下文（DispatchContext）
//!
//! 每次 `dispatch` 新建一个，随负载一起传给监听器，分发结束后返回给调用方。
//!
use std::sync::atomic::{AtomicBool, Ordering};

/// 单次分发的上下文：事件名 + 传播终止标记
#[derive(Debug)]
pub struct DispatchContext {
    event_name: String,
    propagation_stopped: AtomicBool,
}

impl DispatchContext {
    pub fn new(event_name: impl Into<String>) -> Self {
        Self {
            event_name: event_name.into(),
            propagation_stopped: AtomicBool::new(false),
        }
    }

    /// 本次分发的事件名
    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped.load(Ordering::Acquire)
    }

    /// 终止传播：当前监听器返回后，剩余监听器不再执行
    ///
    /// 可重复调用；分发结束后调用没有可观察的效果。
    pub fn stop_propagation(&self) {
        self.propagation_stopped.store(true, Ordering::Release);
    }
}
