use event_dispatcher::Event;

#[allow(dead_code)]
#[derive(Event)]
#[event(name = "inventory.changed")]
enum InventoryChanged<T: Send + Sync + 'static> {
    Added { sku: T, qty: u32 },
    Removed { sku: T },
}

fn main() {
    assert_eq!(<InventoryChanged<String> as Event>::NAME, "inventory.changed");
    assert_eq!(<InventoryChanged<u64> as Event>::NAME, "inventory.changed");
}
