//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the budget, ordering and statistics guarantees of
//! the store against arbitrary operation sequences.

use proptest::prelude::*;
use std::collections::HashMap;

use crate::cache::{CacheKey, CacheStore, SetOutcome};
use crate::payload::Payload;

// == Test Configuration ==
const TEST_MAX_BYTES: u64 = 1024;

// == Strategies ==
/// Small key space so that sequences revisit keys
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-h]{1,2}"
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, size: usize },
    Get { key: String },
    Remove { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        3 => (key_strategy(), 0usize..1500).prop_map(|(key, size)| CacheOp::Set { key, size }),
        2 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        1 => key_strategy().prop_map(|key| CacheOp::Remove { key }),
    ]
}

fn blob(size: usize) -> Payload {
    Payload::bytes(vec![0u8; size])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Budget invariant: after every operation the stored bytes and entry
    // count stay within capacity, and current_bytes equals the sum of the
    // sizes of the entries actually present.
    #[test]
    fn prop_budget_invariant(
        max_entries in 1usize..12,
        ops in prop::collection::vec(cache_op_strategy(), 1..120)
    ) {
        let mut store = CacheStore::new(max_entries, TEST_MAX_BYTES).unwrap();
        let mut last_size: HashMap<CacheKey, u64> = HashMap::new();

        for op in ops {
            match op {
                CacheOp::Set { key, size } => {
                    let key = CacheKey::from(key);
                    if let SetOutcome::Inserted { .. } = store.set(key.clone(), blob(size)) {
                        last_size.insert(key, size as u64);
                    }
                }
                CacheOp::Get { key } => {
                    store.get(&CacheKey::from(key));
                }
                CacheOp::Remove { key } => {
                    store.remove(&CacheKey::from(key));
                }
            }

            let stats = store.snapshot_stats();
            prop_assert!(stats.current_bytes <= TEST_MAX_BYTES);
            prop_assert!(stats.total_entries <= max_entries);

            let expected: u64 = store
                .keys_by_recency()
                .iter()
                .map(|k| last_size[k])
                .sum();
            prop_assert_eq!(stats.current_bytes, expected);
        }
    }

    // Recency order matches a reference model driven by the same calls.
    #[test]
    fn prop_recency_matches_model(
        max_entries in 1usize..8,
        ops in prop::collection::vec(cache_op_strategy(), 1..120)
    ) {
        // Byte budget large enough that only the entry count evicts
        let mut store = CacheStore::new(max_entries, u64::MAX).unwrap();
        let mut model: Vec<String> = Vec::new();

        for op in ops {
            match op {
                CacheOp::Set { key, size } => {
                    store.set(CacheKey::from(key.as_str()), blob(size));
                    model.retain(|k| k != &key);
                    if model.len() >= max_entries {
                        model.pop();
                    }
                    model.insert(0, key);
                }
                CacheOp::Get { key } => {
                    let hit = store.get(&CacheKey::from(key.as_str())).is_some();
                    let pos = model.iter().position(|k| k == &key);
                    prop_assert_eq!(hit, pos.is_some());
                    if let Some(pos) = pos {
                        let k = model.remove(pos);
                        model.insert(0, k);
                    }
                }
                CacheOp::Remove { key } => {
                    store.remove(&CacheKey::from(key.as_str()));
                    model.retain(|k| k != &key);
                }
            }

            let actual: Vec<String> = store
                .keys_by_recency()
                .iter()
                .map(|k| k.as_str().to_string())
                .collect();
            prop_assert_eq!(actual, model.clone());
        }
    }

    // With room for exactly k equal-sized entries, inserting k + 1 distinct
    // keys evicts the first one inserted.
    #[test]
    fn prop_lru_evicts_oldest_first(k in 1usize..10, size in 1usize..100) {
        let mut store = CacheStore::new(10, (k * size) as u64).unwrap();

        for i in 0..k {
            store.set(CacheKey::new(format!("k{i}")), blob(size));
        }
        let outcome = store.set(CacheKey::new(format!("k{k}")), blob(size));

        prop_assert_eq!(outcome, SetOutcome::Inserted { evicted: 1 });
        prop_assert!(!store.contains(&CacheKey::from("k0")));
        for i in 1..=k {
            let key = CacheKey::new(format!("k{i}"));
            prop_assert!(store.contains(&key));
        }
    }

    // A key refreshed by get outlives every other key present at that time.
    #[test]
    fn prop_get_refresh_protects_key(k in 2usize..10, pick in 0usize..10) {
        let pick = pick % k;
        let mut store = CacheStore::new(k, u64::MAX).unwrap();
        for i in 0..k {
            store.set(CacheKey::new(format!("old{i}")), blob(1));
        }

        let refreshed = CacheKey::new(format!("old{pick}"));
        prop_assert!(store.get(&refreshed).is_some());

        for i in 0..k - 1 {
            store.set(CacheKey::new(format!("new{i}")), blob(1));
            prop_assert!(store.contains(&refreshed));
        }
        // Every other initial key is gone; the refreshed one is next in line
        for i in (0..k).filter(|i| *i != pick) {
            let key = CacheKey::new(format!("old{i}"));
            prop_assert!(!store.contains(&key));
        }
        store.set(CacheKey::from("last"), blob(1));
        prop_assert!(!store.contains(&refreshed));
    }

    // Oversized values are refused without changing the entry count.
    #[test]
    fn prop_oversized_rejection(
        prefill in prop::collection::vec((key_strategy(), 0usize..300), 0..6),
        extra in 1usize..4096
    ) {
        let mut store = CacheStore::new(10, TEST_MAX_BYTES).unwrap();
        for (key, size) in prefill {
            store.set(CacheKey::new(format!("pre-{key}")), blob(size));
        }
        let before = store.snapshot_stats();

        let size = TEST_MAX_BYTES as usize + extra;
        let outcome = store.set(CacheKey::from("huge"), blob(size));

        prop_assert_eq!(outcome, SetOutcome::Rejected { size_bytes: size as u64 });
        let after = store.snapshot_stats();
        prop_assert_eq!(after.total_entries, before.total_entries);
        prop_assert_eq!(after.rejected_too_large, before.rejected_too_large + 1);
        prop_assert_eq!(after.evictions, before.evictions);
        prop_assert!(store.get(&CacheKey::from("huge")).is_none());
    }

    // Hit ratio from the snapshot matches hits observed by the caller.
    #[test]
    fn prop_hit_ratio_law(ops in prop::collection::vec(cache_op_strategy(), 1..80)) {
        let mut store = CacheStore::new(4, TEST_MAX_BYTES).unwrap();
        let mut observed_hits: u64 = 0;
        let mut observed_misses: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Set { key, size } => {
                    store.set(CacheKey::from(key), blob(size));
                }
                CacheOp::Get { key } => match store.get(&CacheKey::from(key)) {
                    Some(_) => observed_hits += 1,
                    None => observed_misses += 1,
                },
                CacheOp::Remove { key } => {
                    store.remove(&CacheKey::from(key));
                }
            }
        }

        let stats = store.snapshot_stats();
        prop_assert_eq!(stats.hits, observed_hits);
        prop_assert_eq!(stats.misses, observed_misses);

        let total = observed_hits + observed_misses;
        let expected_rate = if total == 0 { 0.0 } else { observed_hits as f64 / total as f64 };
        prop_assert!((stats.hit_rate() - expected_rate).abs() < f64::EPSILON);
    }
}
