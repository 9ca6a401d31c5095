use async_trait::async_trait;
use event_dispatcher::{
    DispatchContext, DispatcherConfig, Event, EventDispatcher, EventListener, from_fn,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Event)]
#[event(name = "user.created")]
struct UserCreated {
    user_id: u64,
    email: String,
    locked: bool,
}

struct RejectLocked;

#[async_trait]
impl EventListener<UserCreated> for RejectLocked {
    async fn handle(&self, event: &UserCreated, ctx: &DispatchContext) -> anyhow::Result<()> {
        if event.locked {
            println!("user {} is locked, skipping side effects", event.user_id);
            ctx.stop_propagation();
        }
        Ok(())
    }
}

struct SendWelcomeEmail;

#[async_trait]
impl EventListener<UserCreated> for SendWelcomeEmail {
    async fn handle(&self, event: &UserCreated, _ctx: &DispatchContext) -> anyhow::Result<()> {
        println!("welcome mail -> {}", event.email);
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=event_dispatcher=trace 可查看每个监听器的调用
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let dispatcher = EventDispatcher::with_config(DispatcherConfig::builder().name("users").build());

    // 校验优先于副作用
    dispatcher.subscribe_with_priority(RejectLocked, 100);
    dispatcher.subscribe(SendWelcomeEmail);

    let ctx = dispatcher
        .emit(UserCreated {
            user_id: 1,
            email: "alice@example.com".into(),
            locked: false,
        })
        .await?;
    println!("{}: stopped={}", ctx.event_name(), ctx.is_propagation_stopped());

    let ctx = dispatcher
        .emit(UserCreated {
            user_id: 2,
            email: "bob@example.com".into(),
            locked: true,
        })
        .await?;
    println!("{}: stopped={}", ctx.event_name(), ctx.is_propagation_stopped());

    // 未声明类型的事件名同样可以分发，负载由监听器自行还原
    dispatcher.add_listener(
        "audit",
        from_fn(|data, _ctx| {
            if let Some(line) = data.downcast_ref::<String>() {
                println!("audit: {line}");
            }
            Ok(())
        }),
    );
    dispatcher.dispatch("audit", "signup finished".to_string()).await?;

    // 没有监听器的事件名：正常返回
    let ctx = dispatcher.dispatch("nobody.listens", ()).await?;
    println!("{}: stopped={}", ctx.event_name(), ctx.is_propagation_stopped());

    Ok(())
}
