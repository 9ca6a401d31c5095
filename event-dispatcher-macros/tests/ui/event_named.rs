use event_dispatcher::Event;

#[derive(Event)]
#[event(name = "user.created")]
struct UserCreated {
    #[allow(dead_code)]
    user_id: u64,
}

fn main() {
    assert_eq!(UserCreated::NAME, "user.created");
}
