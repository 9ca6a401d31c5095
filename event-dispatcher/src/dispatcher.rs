//! 事件分发器（EventDispatcher）
//!
//! - 注册：追加到注册表并失效该事件名的排序缓存；
//! - 分发：取排序后的监听器快照，逐个 await，检查传播终止标记；
//! - 不捕获监听器错误：首个失败即中止分发并向上返回。
//!
//! 分发期间不持有任何锁，监听器内可以继续注册监听器（下一次分发生效），
//! 同一分发器上的多个分发可以在 await 点交错执行。
//!
use crate::config::DispatcherConfig;
use crate::context::DispatchContext;
use crate::error::{DispatchError, DispatchResult};
use crate::event::{Event, EventData};
use crate::listener::{EventListener, Listener, Typed};
use crate::registry::{ListenerRegistry, OrderedListeners, Priority};
use std::any::Any;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// 进程内事件分发器
///
/// ```rust
/// use event_dispatcher::{EventDispatcher, from_fn};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dispatcher = EventDispatcher::new();
/// dispatcher.add_listener("user.created", from_fn(|_data, _ctx| Ok(())));
/// dispatcher.add_listener_with_priority(
///     "user.created",
///     from_fn(|_data, ctx| {
///         ctx.stop_propagation();
///         Ok(())
///     }),
///     10,
/// );
///
/// let ctx = dispatcher.dispatch("user.created", 42_u64).await?;
/// assert!(ctx.is_propagation_stopped());
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct EventDispatcher {
    registry: ListenerRegistry,
    config: DispatcherConfig,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DispatcherConfig) -> Self {
        Self {
            registry: ListenerRegistry::new(),
            config,
        }
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// 以默认优先级注册监听器
    pub fn add_listener<L>(&self, event_name: &str, listener: L)
    where
        L: Listener + 'static,
    {
        self.add_listener_with_priority(event_name, listener, self.config.default_priority());
    }

    /// 以指定优先级注册监听器（数值越大越先执行，同优先级按注册顺序）
    pub fn add_listener_with_priority<L>(&self, event_name: &str, listener: L, priority: Priority)
    where
        L: Listener + 'static,
    {
        self.add_shared_listener(event_name, Arc::new(listener), priority);
    }

    /// 注册已共享的监听器实例
    ///
    /// 同一实例可重复注册，每次注册都会在分发时各执行一次。
    pub fn add_shared_listener(
        &self,
        event_name: &str,
        listener: Arc<dyn Listener>,
        priority: Priority,
    ) {
        let name = listener.listener_name().to_owned();
        let sequence = self.registry.insert(event_name, listener, priority);
        debug!(
            dispatcher = self.config.name(),
            event = event_name,
            listener = %name,
            priority,
            sequence,
            "listener registered"
        );
    }

    /// 以默认优先级注册类型化监听器，事件名取自 `E::NAME`
    pub fn subscribe<E, L>(&self, listener: L)
    where
        E: Event,
        L: EventListener<E> + 'static,
    {
        self.subscribe_with_priority(listener, self.config.default_priority());
    }

    pub fn subscribe_with_priority<E, L>(&self, listener: L, priority: Priority)
    where
        E: Event,
        L: EventListener<E> + 'static,
    {
        self.add_listener_with_priority(E::NAME, Typed::<E, L>::new(listener), priority);
    }

    /// 按事件名分发任意负载
    ///
    /// 没有监听器时直接返回未终止的上下文。
    pub async fn dispatch<T>(&self, event_name: &str, data: T) -> DispatchResult<DispatchContext>
    where
        T: Any + Send + Sync,
    {
        self.dispatch_data(event_name, EventData::new(data)).await
    }

    /// 分发类型化事件，事件名取自 `E::NAME`
    pub async fn emit<E: Event>(&self, event: E) -> DispatchResult<DispatchContext> {
        self.dispatch(E::NAME, event).await
    }

    /// 分发已构造好的 `EventData`
    pub async fn dispatch_data(
        &self,
        event_name: &str,
        data: EventData,
    ) -> DispatchResult<DispatchContext> {
        let listeners = self.registry.ordered(event_name);
        let ctx = DispatchContext::new(event_name);

        debug!(
            dispatcher = self.config.name(),
            event = event_name,
            payload = data.type_name(),
            listeners = listeners.len(),
            "dispatching event"
        );

        for (position, listener) in listeners.iter().enumerate() {
            if let Some(expected) = listener.payload_type()
                && expected.id() != data.payload_type().id()
            {
                let err = DispatchError::PayloadMismatch {
                    event: event_name.to_owned(),
                    listener: listener.listener_name().to_owned(),
                    expected: expected.name(),
                    found: data.type_name(),
                };
                warn!(dispatcher = self.config.name(), error = %err, "dispatch aborted");
                return Err(err);
            }

            trace!(
                dispatcher = self.config.name(),
                event = event_name,
                position,
                listener = listener.listener_name(),
                "invoking listener"
            );

            if let Err(source) = listener.handle(&data, &ctx).await {
                let err = DispatchError::Listener {
                    event: event_name.to_owned(),
                    position,
                    listener: listener.listener_name().to_owned(),
                    source,
                };
                warn!(dispatcher = self.config.name(), error = %err, "dispatch aborted");
                return Err(err);
            }

            if ctx.is_propagation_stopped() {
                debug!(
                    dispatcher = self.config.name(),
                    event = event_name,
                    position,
                    skipped = listeners.len() - position - 1,
                    "propagation stopped"
                );
                break;
            }
        }

        Ok(ctx)
    }

    /// 按分发顺序排列的监听器（命中缓存时不重新排序）
    pub fn ordered_listeners(&self, event_name: &str) -> OrderedListeners {
        self.registry.ordered(event_name)
    }

    pub fn listener_count(&self, event_name: &str) -> usize {
        self.registry.len(event_name)
    }

    /// 已注册过监听器的事件名（无固定顺序）
    pub fn event_names(&self) -> Vec<String> {
        self.registry.event_names()
    }
}
