//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check ordering, capacity and byte-accounting behavior of
//! the LRU store across arbitrary operation sequences.

use parking_lot::Mutex;
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::cache::{LruStore, ValueView};

// == Strategies ==
/// Small key alphabet so sequences revisit keys often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-e]{1,3}".prop_map(|s| s)
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9]{0,12}".prop_map(|s| s)
}

#[derive(Debug, Clone)]
enum StoreOp {
    Add { key: String, value: String },
    Get { key: String },
    DeleteOldest,
}

fn store_op_strategy() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        3 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| StoreOp::Add { key, value }),
        2 => key_strategy().prop_map(|key| StoreOp::Get { key }),
        1 => Just(StoreOp::DeleteOldest),
    ]
}

fn entry_size(key: &str, value: &str) -> usize {
    key.len() + value.len()
}

// == Reference Model ==
/// Unbounded recency list, most recent first.
#[derive(Debug, Default)]
struct RecencyModel {
    order: Vec<String>,
}

impl RecencyModel {
    fn touch(&mut self, key: &str) {
        self.order.retain(|k| k != key);
        self.order.insert(0, key.to_string());
    }

    fn pop_oldest(&mut self) -> Option<String> {
        self.order.pop()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // After every operation the structural order matches a reference recency
    // list; the tail is always the least recently touched key.
    #[test]
    fn prop_lru_order_matches_reference(ops in prop::collection::vec(store_op_strategy(), 1..80)) {
        let mut store = LruStore::new(0);
        let mut model = RecencyModel::default();

        for op in ops {
            match op {
                StoreOp::Add { key, value } => {
                    store.add(&key, value);
                    model.touch(&key);
                }
                StoreOp::Get { key } => {
                    if store.get(&key).is_some() {
                        model.touch(&key);
                    }
                }
                StoreOp::DeleteOldest => {
                    let evicted = store.delete_oldest().map(|(key, _)| key);
                    prop_assert_eq!(evicted, model.pop_oldest());
                }
            }

            let actual: Vec<&str> = store.keys().collect();
            prop_assert_eq!(actual, model.order.iter().map(String::as_str).collect::<Vec<_>>());
            prop_assert_eq!(store.peek_oldest(), model.order.last().map(String::as_str));
        }
    }

    // Repeated hits on one key never reorder the remaining keys.
    #[test]
    fn prop_repeated_get_keeps_relative_order(
        keys in prop::collection::vec(key_strategy(), 2..12),
        pick in 0usize..100,
        repeats in 1usize..10
    ) {
        let mut store = LruStore::new(0);
        for key in &keys {
            store.add(key, "v".to_string());
        }
        let before: Vec<String> = store.keys().map(str::to_string).collect();
        let target = before[pick % before.len()].clone();

        for _ in 0..repeats {
            prop_assert!(store.get(&target).is_some());
        }

        let after: Vec<String> = store.keys().map(str::to_string).collect();
        prop_assert_eq!(&after[0], &target);
        let others_before: Vec<&String> = before.iter().filter(|k| **k != target).collect();
        let others_after: Vec<&String> = after.iter().filter(|k| **k != target).collect();
        prop_assert_eq!(others_before, others_after);
    }

    // used_bytes stays within capacity unless a single oversized entry was
    // added to an empty store.
    #[test]
    fn prop_capacity_invariant(
        capacity in 1usize..48,
        entries in prop::collection::vec((key_strategy(), value_strategy()), 1..100)
    ) {
        let mut store = LruStore::new(capacity);

        for (key, value) in entries {
            let was_empty = store.is_empty();
            let size = entry_size(&key, &value);
            store.add(&key, value);

            if store.used_bytes() > capacity {
                prop_assert!(was_empty, "over capacity after add into non-empty store");
                prop_assert_eq!(store.len(), 1);
                prop_assert_eq!(store.used_bytes(), size);
            }
        }
    }

    // used_bytes always equals the sum of key and value sizes over live entries.
    #[test]
    fn prop_byte_accounting(
        capacity in prop_oneof![Just(0usize), 1usize..64],
        ops in prop::collection::vec(store_op_strategy(), 1..100)
    ) {
        let evicted = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&evicted);
        let mut store = LruStore::with_on_evicted(capacity, move |key: &str, _: &String| {
            sink.lock().push(key.to_string());
        });
        let mut mirror: HashMap<String, String> = HashMap::new();

        for op in ops {
            match op {
                StoreOp::Add { key, value } => {
                    mirror.insert(key.clone(), value.clone());
                    store.add(&key, value);
                }
                StoreOp::Get { key } => {
                    let found = store.get(&key).cloned();
                    prop_assert_eq!(found.as_ref(), mirror.get(&key));
                }
                StoreOp::DeleteOldest => {
                    store.delete_oldest();
                }
            }

            for key in evicted.lock().drain(..) {
                mirror.remove(&key);
            }

            let expected: usize = mirror.iter().map(|(k, v)| entry_size(k, v)).sum();
            prop_assert_eq!(store.used_bytes(), expected);
            prop_assert_eq!(store.len(), mirror.len());

            let live: HashSet<&str> = store.keys().collect();
            let mirrored: HashSet<&str> = mirror.keys().map(String::as_str).collect();
            prop_assert_eq!(live, mirrored);
        }
    }

    // Mutating a returned copy never changes what the view yields later.
    #[test]
    fn prop_view_immutability(
        data in prop::collection::vec(any::<u8>(), 0..64),
        noise in any::<u8>()
    ) {
        let view = ValueView::new(&data);
        let before = view.to_string();

        let mut copy = view.byte_slice();
        for byte in copy.iter_mut() {
            *byte = byte.wrapping_add(noise | 1);
        }
        copy.push(noise);

        prop_assert_eq!(view.byte_slice(), data);
        prop_assert_eq!(view.to_string(), before);
    }
}
