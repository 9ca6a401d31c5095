//! 监听器注册表与排序缓存
//!
//! 每个事件名对应一个槽位：注册条目 + 已排序结果（缓存）。
//! 追加条目与失效缓存在同一把分片锁内完成，因此缓存一旦存在，
//! 必然等于当前条目按规则排序后的结果。
//!
use crate::listener::Listener;
use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// 监听器优先级：数值越大越先执行
pub type Priority = i32;

/// 未指定优先级时的默认值
pub const DEFAULT_PRIORITY: Priority = 0;

/// 已排序的监听器序列（共享只读，调用方不应修改）
pub type OrderedListeners = Arc<[Arc<dyn Listener>]>;

struct ListenerEntry {
    priority: Priority,
    sequence: u64,
    listener: Arc<dyn Listener>,
}

#[derive(Default)]
struct ListenerSlot {
    entries: Vec<ListenerEntry>,
    // None 表示缓存失效，需要重新排序
    ordered: Option<OrderedListeners>,
}

/// 事件名 -> 监听器槽位
#[derive(Default)]
pub struct ListenerRegistry {
    slots: DashMap<String, ListenerSlot>,
    sequence: AtomicU64,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加监听器并失效该事件名的排序缓存，返回分配的注册序号
    pub fn insert(
        &self,
        event_name: &str,
        listener: Arc<dyn Listener>,
        priority: Priority,
    ) -> u64 {
        let mut slot = self.slots.entry(event_name.to_owned()).or_default();
        // 在槽位锁内分配序号，保证同一事件名下序号与追加顺序一致
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        slot.entries.push(ListenerEntry {
            priority,
            sequence,
            listener,
        });
        slot.ordered = None;
        sequence
    }

    /// 返回按“优先级降序、注册序号升序”排列的监听器
    ///
    /// 命中缓存时直接返回缓存（不复制、不重排）；
    /// 未注册过的事件名返回空序列且不写入缓存。
    pub fn ordered(&self, event_name: &str) -> OrderedListeners {
        if let Some(cached) = self
            .slots
            .get(event_name)
            .and_then(|slot| slot.ordered.clone())
        {
            return cached;
        }

        let Some(mut guard) = self.slots.get_mut(event_name) else {
            return OrderedListeners::from(Vec::new());
        };

        let slot = &mut *guard;
        // 读锁与写锁之间可能已被其他分发填充
        if let Some(cached) = &slot.ordered {
            return cached.clone();
        }

        let ordered = order_entries(&slot.entries);
        slot.ordered = Some(ordered.clone());
        ordered
    }

    pub fn len(&self, event_name: &str) -> usize {
        self.slots
            .get(event_name)
            .map(|slot| slot.entries.len())
            .unwrap_or(0)
    }

    /// 已注册过监听器的事件名（无固定顺序）
    pub fn event_names(&self) -> Vec<String> {
        self.slots.iter().map(|slot| slot.key().clone()).collect()
    }

    #[cfg(test)]
    fn is_cached(&self, event_name: &str) -> bool {
        self.slots
            .get(event_name)
            .map(|slot| slot.ordered.is_some())
            .unwrap_or(false)
    }
}

fn order_entries(entries: &[ListenerEntry]) -> OrderedListeners {
    let mut sorted: Vec<&ListenerEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| a.sequence.cmp(&b.sequence))
    });
    sorted.into_iter().map(|e| e.listener.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::DispatchContext;
    use crate::event::EventData;
    use async_trait::async_trait;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::cmp::Reverse;

    struct Named(&'static str);

    #[async_trait]
    impl Listener for Named {
        async fn handle(&self, _data: &EventData, _ctx: &DispatchContext) -> anyhow::Result<()> {
            Ok(())
        }

        fn listener_name(&self) -> &str {
            self.0
        }
    }

    fn names(ordered: &OrderedListeners) -> Vec<&str> {
        ordered.iter().map(|l| l.listener_name()).collect()
    }

    #[test]
    fn orders_by_priority_then_registration() {
        let registry = ListenerRegistry::new();
        registry.insert("e", Arc::new(Named("a")), 0);
        registry.insert("e", Arc::new(Named("b")), 5);
        registry.insert("e", Arc::new(Named("c")), 5);
        registry.insert("e", Arc::new(Named("d")), 4);
        registry.insert("e", Arc::new(Named("e")), -1);
        registry.insert("e", Arc::new(Named("f")), 0);

        assert_eq!(names(&registry.ordered("e")), ["b", "c", "d", "a", "f", "e"]);
    }

    #[test]
    fn sequence_numbers_increase_across_event_names() {
        let registry = ListenerRegistry::new();
        let first = registry.insert("a", Arc::new(Named("x")), 0);
        let second = registry.insert("b", Arc::new(Named("y")), 0);
        let third = registry.insert("a", Arc::new(Named("z")), 0);
        assert!(first < second && second < third);
    }

    #[test]
    fn cache_hit_returns_same_allocation() {
        let registry = ListenerRegistry::new();
        registry.insert("e", Arc::new(Named("a")), 0);

        assert!(!registry.is_cached("e"));
        let first = registry.ordered("e");
        assert!(registry.is_cached("e"));
        let second = registry.ordered("e");
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn insert_invalidates_only_its_own_event() {
        let registry = ListenerRegistry::new();
        registry.insert("e", Arc::new(Named("a")), 0);
        registry.insert("other", Arc::new(Named("o")), 0);
        let before = registry.ordered("e");
        let other = registry.ordered("other");

        registry.insert("e", Arc::new(Named("b")), 1);
        assert!(!registry.is_cached("e"));
        assert!(registry.is_cached("other"));

        let after = registry.ordered("e");
        assert_eq!(names(&before), ["a"]);
        assert_eq!(names(&after), ["b", "a"]);
        assert!(Arc::ptr_eq(&other, &registry.ordered("other")));
    }

    #[test]
    fn unknown_event_is_empty_and_not_cached() {
        let registry = ListenerRegistry::new();
        assert!(registry.ordered("missing").is_empty());
        assert_eq!(registry.len("missing"), 0);
        assert!(registry.event_names().is_empty());
    }

    #[test]
    fn duplicate_registration_is_kept() {
        let registry = ListenerRegistry::new();
        let shared: Arc<dyn Listener> = Arc::new(Named("dup"));
        registry.insert("e", shared.clone(), 0);
        registry.insert("e", shared, 0);

        assert_eq!(registry.len("e"), 2);
        assert_eq!(names(&registry.ordered("e")), ["dup", "dup"]);
        assert_eq!(registry.event_names(), ["e".to_owned()]);
    }

    #[test]
    fn random_registrations_match_stable_priority_sort() {
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let registry = ListenerRegistry::new();
            // 每个事件名按注册顺序记录 (priority, listener)
            let mut model: [Vec<(Priority, Arc<dyn Listener>)>; 2] = [Vec::new(), Vec::new()];

            for _ in 0..rng.random_range(1..40) {
                let slot = rng.random_range(0..2);
                let event = ["left", "right"][slot];
                let priority = rng.random_range(-3..=3);
                let listener: Arc<dyn Listener> = Arc::new(Named("r"));
                registry.insert(event, listener.clone(), priority);
                model[slot].push((priority, listener));

                // 穿插读取，使缓存在后续注册时失效
                if rng.random_bool(0.3) {
                    assert_matches_model(&registry, event, &model[slot], seed);
                }
            }

            assert_matches_model(&registry, "left", &model[0], seed);
            assert_matches_model(&registry, "right", &model[1], seed);
        }
    }

    fn assert_matches_model(
        registry: &ListenerRegistry,
        event: &str,
        registered: &[(Priority, Arc<dyn Listener>)],
        seed: u64,
    ) {
        let mut expected = registered.to_vec();
        // 稳定排序：同优先级保持注册顺序
        expected.sort_by_key(|(priority, _)| Reverse(*priority));

        let ordered = registry.ordered(event);
        assert_eq!(ordered.len(), expected.len(), "seed {seed}, event {event}");
        for (i, ((_, want), got)) in expected.iter().zip(ordered.iter()).enumerate() {
            assert!(
                Arc::ptr_eq(want, got),
                "seed {seed}, event {event}: position {i} out of order"
            );
        }
        assert!(Arc::ptr_eq(&ordered, &registry.ordered(event)));
    }
}
