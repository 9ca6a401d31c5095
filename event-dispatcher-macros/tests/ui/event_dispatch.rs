use event_dispatcher::{DispatchContext, Event, EventDispatcher, typed_fn};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Event)]
#[event(name = "payment.settled")]
struct PaymentSettled {
    cents: u64,
}

fn main() {
    let dispatcher = EventDispatcher::new();
    let settled = Arc::new(AtomicU64::new(0));
    {
        let settled = settled.clone();
        dispatcher.subscribe(typed_fn(move |e: &PaymentSettled, _ctx: &DispatchContext| {
            settled.fetch_add(e.cents, Ordering::SeqCst);
            Ok(())
        }));
    }

    assert_eq!(dispatcher.listener_count("payment.settled"), 1);
    assert_eq!(settled.load(Ordering::SeqCst), 0);
}
