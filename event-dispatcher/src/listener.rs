//! 监听器（Listener）
//!
//! 分发器只与 `Listener` 交互：按名称注册、逐个 await。
//! - `from_fn`：同步闭包，视为立即完成的 future；
//! - `from_async_fn`：返回 `BoxFuture` 的闭包；
//! - `EventListener<E>` / `typed_fn`：面向某个 `Event` 类型的监听器，
//!   注册时包装为声明了负载类型的 `Listener`。
//!
use crate::context::DispatchContext;
use crate::error::DispatchError;
use crate::event::{Event, EventData, PayloadType};
use async_trait::async_trait;
use futures_core::future::BoxFuture;
use std::any::type_name;
use std::marker::PhantomData;

/// 监听器：处理某个事件名下分发的负载
#[async_trait]
pub trait Listener: Send + Sync {
    /// 处理事件；返回错误会中止本次分发并原样向上传播
    async fn handle(&self, data: &EventData, ctx: &DispatchContext) -> anyhow::Result<()>;

    /// 监听器期望的负载类型；`None` 表示接受任意负载
    fn payload_type(&self) -> Option<PayloadType> {
        None
    }

    /// 监听器名称（用于日志与错误信息）
    fn listener_name(&self) -> &str {
        type_name::<Self>()
    }
}

/// 同步闭包监听器，见 [`from_fn`]
pub struct FnListener<F>(F);

#[async_trait]
impl<F> Listener for FnListener<F>
where
    F: Fn(&EventData, &DispatchContext) -> anyhow::Result<()> + Send + Sync,
{
    async fn handle(&self, data: &EventData, ctx: &DispatchContext) -> anyhow::Result<()> {
        (self.0)(data, ctx)
    }

    fn listener_name(&self) -> &str {
        type_name::<F>()
    }
}

/// 以同步闭包创建监听器
///
/// ```rust
/// use event_dispatcher::{EventDispatcher, from_fn};
///
/// let dispatcher = EventDispatcher::new();
/// dispatcher.add_listener(
///     "user.created",
///     from_fn(|_data, ctx| {
///         ctx.stop_propagation();
///         Ok(())
///     }),
/// );
/// ```
pub fn from_fn<F>(f: F) -> FnListener<F>
where
    F: Fn(&EventData, &DispatchContext) -> anyhow::Result<()> + Send + Sync,
{
    FnListener(f)
}

/// 异步闭包监听器，见 [`from_async_fn`]
pub struct AsyncFnListener<F>(F);

#[async_trait]
impl<F> Listener for AsyncFnListener<F>
where
    F: for<'a> Fn(&'a EventData, &'a DispatchContext) -> BoxFuture<'a, anyhow::Result<()>>
        + Send
        + Sync,
{
    async fn handle(&self, data: &EventData, ctx: &DispatchContext) -> anyhow::Result<()> {
        (self.0)(data, ctx).await
    }

    fn listener_name(&self) -> &str {
        type_name::<F>()
    }
}

/// 以返回 `BoxFuture` 的闭包创建监听器
///
/// 分发器会等待该 future 完成后才调用下一个监听器。
pub fn from_async_fn<F>(f: F) -> AsyncFnListener<F>
where
    F: for<'a> Fn(&'a EventData, &'a DispatchContext) -> BoxFuture<'a, anyhow::Result<()>>
        + Send
        + Sync,
{
    AsyncFnListener(f)
}

/// 类型化监听器：只处理 `E` 类型的负载
#[async_trait]
pub trait EventListener<E: Event>: Send + Sync {
    async fn handle(&self, event: &E, ctx: &DispatchContext) -> anyhow::Result<()>;
}

/// 同步闭包形式的类型化监听器，见 [`typed_fn`]
pub struct TypedFn<E, F> {
    f: F,
    _event: PhantomData<fn(&E)>,
}

#[async_trait]
impl<E, F> EventListener<E> for TypedFn<E, F>
where
    E: Event,
    F: Fn(&E, &DispatchContext) -> anyhow::Result<()> + Send + Sync,
{
    async fn handle(&self, event: &E, ctx: &DispatchContext) -> anyhow::Result<()> {
        (self.f)(event, ctx)
    }
}

/// 以同步闭包创建类型化监听器
pub fn typed_fn<E, F>(f: F) -> TypedFn<E, F>
where
    E: Event,
    F: Fn(&E, &DispatchContext) -> anyhow::Result<()> + Send + Sync,
{
    TypedFn {
        f,
        _event: PhantomData,
    }
}

/// 将 `EventListener<E>` 适配为 `Listener`，并声明负载类型为 `E`
pub(crate) struct Typed<E, L> {
    inner: L,
    _event: PhantomData<fn(&E)>,
}

impl<E, L> Typed<E, L> {
    pub(crate) fn new(inner: L) -> Self {
        Self {
            inner,
            _event: PhantomData,
        }
    }
}

#[async_trait]
impl<E, L> Listener for Typed<E, L>
where
    E: Event,
    L: EventListener<E>,
{
    async fn handle(&self, data: &EventData, ctx: &DispatchContext) -> anyhow::Result<()> {
        // 分发器在调用前已按 payload_type 校验，这里的分支仅在直接调用时可达
        let Some(event) = data.downcast_ref::<E>() else {
            return Err(DispatchError::PayloadMismatch {
                event: ctx.event_name().to_owned(),
                listener: self.listener_name().to_owned(),
                expected: type_name::<E>(),
                found: data.type_name(),
            }
            .into());
        };
        self.inner.handle(event, ctx).await
    }

    fn payload_type(&self) -> Option<PayloadType> {
        Some(PayloadType::of::<E>())
    }

    fn listener_name(&self) -> &str {
        type_name::<L>()
    }
}
