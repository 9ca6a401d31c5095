//! 进程内事件分发器（event-dispatcher）
//!
//! 以事件名称为键注册带优先级的监听器，并按名称分发任意负载：
//! - 监听器按优先级从高到低执行，同优先级按注册顺序执行；
//! - 每次分发创建独立的 `DispatchContext`，监听器可通过 `stop_propagation` 终止后续执行；
//! - 排序结果按事件名缓存，注册新监听器时仅失效对应事件名的缓存；
//! - 监听器一律以异步方式逐个等待执行，同步监听器视为已完成的 future。
//!
//! 负载采用类型擦除（`EventData`），可通过 `Event` trait 在其上叠加
//! “事件名 ↔ 负载类型”的静态约定（`subscribe` / `emit`）。
//!
//! 典型用法：
//! 1. 创建 `EventDispatcher`（或通过 `DispatcherConfig` 定制默认优先级与名称）；
//! 2. 使用 `add_listener*` 注册监听器，或用 `subscribe` 注册类型化监听器；
//! 3. 调用 `dispatch` / `emit`，根据返回的上下文判断是否被中途终止。
//!
pub mod config;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod listener;
pub mod registry;

pub use config::DispatcherConfig;
pub use context::DispatchContext;
pub use dispatcher::EventDispatcher;
pub use error::{DispatchError, DispatchResult};
pub use event::{Event, EventData, PayloadType};
pub use listener::{EventListener, Listener, from_async_fn, from_fn, typed_fn};
pub use registry::{DEFAULT_PRIORITY, OrderedListeners, Priority};

#[cfg(feature = "derive")]
pub use event_dispatcher_macros::Event;

// 允许在本 crate 内部通过 ::event_dispatcher 进行自引用，
// 以便派生宏在本 crate 的单元测试中也能解析到 ::event_dispatcher 路径。
extern crate self as event_dispatcher;
