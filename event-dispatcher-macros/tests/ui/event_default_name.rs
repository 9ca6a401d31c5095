use event_dispatcher::Event;

#[derive(Event)]
struct AccountLocked;

fn main() {
    assert_eq!(AccountLocked::NAME, "AccountLocked");
}
