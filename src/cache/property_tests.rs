//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the LRU engine against a simple reference model
//! and the shared store under concurrent tasks.

use proptest::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::cache::{CacheStore, LruCache};

// == Strategies ==
/// Small key space so operations collide often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-h]{1,2}".prop_map(|s| s)
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,32}".prop_map(|s| s)
}

#[derive(Debug, Clone)]
enum CacheOp {
    Put { key: String, value: String },
    Get { key: String },
    Peek { key: String },
    Remove { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        3 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| CacheOp::Put { key, value }),
        3 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        1 => key_strategy().prop_map(|key| CacheOp::Peek { key }),
        1 => key_strategy().prop_map(|key| CacheOp::Remove { key }),
    ]
}

// == Reference Model ==
/// Obviously-correct O(n) LRU: a Vec ordered most to least recent.
struct ModelLru {
    order: Vec<String>,
    values: HashMap<String, String>,
    capacity: usize,
}

impl ModelLru {
    fn new(capacity: usize) -> Self {
        Self {
            order: Vec::new(),
            values: HashMap::new(),
            capacity,
        }
    }

    fn touch(&mut self, key: &str) {
        self.order.retain(|k| k != key);
        self.order.insert(0, key.to_string());
    }

    fn put(&mut self, key: String, value: String) -> Option<String> {
        let mut evicted = None;
        if !self.values.contains_key(&key) && self.values.len() == self.capacity {
            if let Some(oldest) = self.order.pop() {
                self.values.remove(&oldest);
                evicted = Some(oldest);
            }
        }
        self.touch(&key);
        self.values.insert(key, value);
        evicted
    }

    fn get(&mut self, key: &str) -> Option<String> {
        let value = self.values.get(key).cloned();
        if value.is_some() {
            self.touch(key);
        }
        value
    }

    fn remove(&mut self, key: &str) -> Option<String> {
        self.order.retain(|k| k != key);
        self.values.remove(key)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Every operation returns what the model returns and leaves the same
    // recency order behind.
    #[test]
    fn prop_matches_reference_model(
        capacity in 1usize..6,
        ops in prop::collection::vec(cache_op_strategy(), 1..120)
    ) {
        let mut cache: LruCache<String, String> = LruCache::new(capacity).unwrap();
        let mut model = ModelLru::new(capacity);

        for op in ops {
            match op {
                CacheOp::Put { key, value } => {
                    let evicted = cache.put(key.clone(), value.clone()).map(|(k, _)| k);
                    prop_assert_eq!(evicted, model.put(key, value));
                }
                CacheOp::Get { key } => {
                    prop_assert_eq!(cache.get(key.as_str()).cloned(), model.get(&key));
                }
                CacheOp::Peek { key } => {
                    prop_assert_eq!(cache.peek(key.as_str()).cloned(), model.values.get(&key).cloned());
                }
                CacheOp::Remove { key } => {
                    prop_assert_eq!(cache.remove(key.as_str()), model.remove(&key));
                }
            }

            prop_assert_eq!(cache.keys_by_recency(), model.order.clone());
            cache.assert_consistent();
        }
    }

    // N distinct inserts into capacity C leave exactly min(N, C) entries.
    #[test]
    fn prop_capacity_enforcement(
        capacity in 1usize..50,
        keys in prop::collection::hash_set("[a-z0-9]{1,12}", 0..120)
    ) {
        let mut cache: LruCache<String, String> = LruCache::new(capacity).unwrap();
        let distinct = keys.len();

        for key in keys {
            cache.put(key, "v".to_string());
            prop_assert!(cache.len() <= capacity, "size {} exceeds {}", cache.len(), capacity);
        }

        prop_assert_eq!(cache.len(), distinct.min(capacity));
    }

    // Inserting k1..k(C+1) with no reads evicts exactly k1.
    #[test]
    fn prop_lru_eviction_order(
        keys in prop::collection::hash_set("[a-z]{1,8}", 2..20)
    ) {
        let keys: Vec<String> = keys.into_iter().collect();
        let capacity = keys.len() - 1;
        let mut cache: LruCache<String, String> = LruCache::new(capacity).unwrap();

        for key in &keys {
            cache.put(key.clone(), format!("value_{}", key));
        }

        prop_assert!(!cache.contains(keys[0].as_str()), "Oldest key '{}' should be evicted", keys[0]);
        for key in keys.iter().skip(1) {
            prop_assert!(cache.contains(key.as_str()), "Key '{}' should still exist", key);
        }
    }

    // A get on the would-be victim shifts eviction to the next oldest key.
    #[test]
    fn prop_lru_access_tracking(
        keys in prop::collection::hash_set("[a-z]{1,8}", 3..10),
        new_key in "[0-9]{1,4}"
    ) {
        let keys: Vec<String> = keys.into_iter().collect();
        let mut cache: LruCache<String, String> = LruCache::new(keys.len()).unwrap();

        for key in &keys {
            cache.put(key.clone(), format!("value_{}", key));
        }

        prop_assert!(cache.get(keys[0].as_str()).is_some());
        let evicted = cache.put(new_key.clone(), "new".to_string()).map(|(k, _)| k);

        prop_assert_eq!(evicted, Some(keys[1].clone()));
        prop_assert!(cache.contains(keys[0].as_str()));
        prop_assert!(cache.contains(new_key.as_str()));
    }

    // Writing v1 then v2 under one key reads back v2 and keeps size.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let store = CacheStore::new(4).unwrap();

        store.put(key.clone(), value1);
        store.put(key.clone(), value2.clone());

        prop_assert_eq!(store.get(&key), Some(value2));
        prop_assert_eq!(store.len(), 1);
    }

    // A fresh cache of any capacity misses on every key.
    #[test]
    fn prop_miss_on_fresh_cache(capacity in 1usize..10_000, key in value_strategy()) {
        let store = CacheStore::new(capacity).unwrap();
        prop_assert_eq!(store.get(&key), None);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    // Concurrent tasks never push the store past capacity, and every hit
    // returns a value that was written for that exact key.
    #[test]
    fn prop_concurrent_operation_correctness(
        capacity in 1usize..16,
        operations in prop::collection::vec(cache_op_strategy(), 10..80)
    ) {
        let store = Arc::new(CacheStore::new(capacity).unwrap());

        let written: HashSet<(String, String)> = operations
            .iter()
            .filter_map(|op| match op {
                CacheOp::Put { key, value } => Some((key.clone(), value.clone())),
                _ => None,
            })
            .collect();

        let results = tokio_test::block_on(async {
            let handles: Vec<_> = operations
                .into_iter()
                .map(|op| {
                    let store = Arc::clone(&store);
                    tokio::spawn(async move {
                        let hit = match op {
                            CacheOp::Put { key, value } => {
                                store.put(key, value);
                                None
                            }
                            CacheOp::Get { key } => store.get(&key).map(|v| (key, v)),
                            CacheOp::Peek { key } => store.peek(&key).map(|v| (key, v)),
                            CacheOp::Remove { key } => {
                                let _ = store.delete(&key);
                                None
                            }
                        };
                        (hit, store.len())
                    })
                })
                .collect();

            let mut results = Vec::new();
            for handle in handles {
                results.push(handle.await.expect("Task should not panic"));
            }
            results
        });

        for (hit, len) in results {
            prop_assert!(len <= capacity, "observed size {} above capacity {}", len, capacity);
            if let Some(pair) = hit {
                prop_assert!(written.contains(&pair), "value {:?} was never written", pair);
            }
        }
        prop_assert!(store.len() <= capacity);
    }
}
