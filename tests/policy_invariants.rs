// ==============================================
// CROSS-POLICY INVARIANT TESTS (integration)
// ==============================================
//
// Properties every replacement policy must uphold, driven through the
// enum-dispatched builder so each kind runs the same checks.

use cachelab::builder::{AnyPolicy, PolicyBuilder, PolicyKind};
use cachelab::traits::ReplacementPolicy;
use proptest::prelude::*;

fn build(kind: PolicyKind, capacity: usize, expected_len: usize) -> AnyPolicy<i64> {
    PolicyBuilder::new(capacity)
        .expected_len(expected_len)
        .seed(0x5eed)
        .build(kind)
        .unwrap()
}

fn trace(policy: &mut AnyPolicy<i64>, keys: &[i64]) -> Vec<(bool, Option<i64>)> {
    keys.iter()
        .map(|&k| {
            let outcome = policy.access(k);
            (outcome.is_hit(), outcome.evicted().copied())
        })
        .collect()
}

fn kind_strategy() -> impl Strategy<Value = PolicyKind> {
    prop::sample::select(PolicyKind::ALL.to_vec())
}

// ==============================================
// Capacity and Hit Rate
// ==============================================

proptest! {
    /// Property: the resident set never exceeds capacity
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_len_within_capacity(
        kind in kind_strategy(),
        capacity in 1usize..8,
        keys in prop::collection::vec(0i64..20, 0..200)
    ) {
        let mut policy = build(kind, capacity, keys.len());
        for &k in &keys {
            policy.access(k);
            prop_assert!(policy.len() <= capacity);
            prop_assert!(policy.contains(&k));
        }
    }

    /// Property: hit rate stays in [0, 1] and matches hits / expected_len
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_hit_rate_bounded(
        kind in kind_strategy(),
        capacity in 1usize..8,
        keys in prop::collection::vec(0i64..20, 1..200)
    ) {
        let mut policy = build(kind, capacity, keys.len());
        let hits = trace(&mut policy, &keys).iter().filter(|(hit, _)| *hit).count() as u64;
        let rate = policy.hit_rate();
        prop_assert!((0.0..=1.0).contains(&rate));
        prop_assert_eq!(policy.hits(), hits);
        prop_assert!((rate - hits as f64 / keys.len() as f64).abs() < 1e-12);
    }

    /// Property: an evicted key is no longer resident
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_evicted_key_leaves(
        kind in kind_strategy(),
        capacity in 1usize..6,
        keys in prop::collection::vec(0i64..15, 0..150)
    ) {
        let mut policy = build(kind, capacity, keys.len());
        for &k in &keys {
            if let Some(victim) = policy.access(k).into_evicted() {
                prop_assert!(!policy.contains(&victim));
                prop_assert_ne!(victim, k);
            }
        }
    }
}

// ==============================================
// Clear
// ==============================================

proptest! {
    /// Property: clear empties the cache, resets hits and is idempotent
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_clear_idempotent(
        kind in kind_strategy(),
        capacity in 1usize..8,
        keys in prop::collection::vec(0i64..20, 0..100)
    ) {
        let mut policy = build(kind, capacity, keys.len());
        trace(&mut policy, &keys);
        policy.clear();
        prop_assert!(policy.is_empty());
        prop_assert_eq!(policy.hits(), 0);
        prop_assert_eq!(policy.hit_rate(), 0.0);
        policy.clear();
        prop_assert!(policy.is_empty());
        prop_assert_eq!(policy.hits(), 0);
        prop_assert!(policy.resident_keys().is_empty());
    }

    /// Property: a cleared deterministic policy replays like a fresh one
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_cleared_policy_behaves_fresh(
        kind in kind_strategy().prop_filter("deterministic", |k| !k.is_randomized()),
        capacity in 1usize..6,
        warmup in prop::collection::vec(0i64..10, 0..50),
        keys in prop::collection::vec(0i64..10, 0..50)
    ) {
        let mut used = build(kind, capacity, keys.len());
        trace(&mut used, &warmup);
        used.clear();
        let mut fresh = build(kind, capacity, keys.len());
        prop_assert_eq!(trace(&mut used, &keys), trace(&mut fresh, &keys));
    }
}

// ==============================================
// Determinism
// ==============================================

proptest! {
    /// Property: deterministic policies give identical outcomes on identical input
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_deterministic_policies_repeat(
        kind in kind_strategy().prop_filter("deterministic", |k| !k.is_randomized()),
        capacity in 1usize..6,
        keys in prop::collection::vec(0i64..12, 0..120)
    ) {
        let mut a = build(kind, capacity, keys.len());
        let mut b = build(kind, capacity, keys.len());
        prop_assert_eq!(trace(&mut a, &keys), trace(&mut b, &keys));
        prop_assert_eq!(a.resident_keys(), b.resident_keys());
    }

    /// Property: when every key fits, even RR has a deterministic hit count
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_random_hits_deterministic_when_all_fit(
        capacity in 4usize..10,
        keys in prop::collection::vec(0i64..4, 0..80)
    ) {
        let mut policy = PolicyBuilder::new(capacity)
            .expected_len(keys.len())
            .build::<i64>(PolicyKind::Random)
            .unwrap();
        trace(&mut policy, &keys);
        let distinct = keys.iter().collect::<std::collections::HashSet<_>>().len();
        prop_assert_eq!(policy.hits(), (keys.len() - distinct) as u64);
    }
}

#[test]
fn every_policy_reports_its_name() {
    let names: Vec<&str> = PolicyKind::ALL
        .iter()
        .map(|&kind| build(kind, 2, 0).name())
        .collect();
    assert_eq!(names, ["FIFO", "LRU", "LFU", "MRU", "RR", "ARC", "Clock"]);
}

#[test]
fn expected_len_zero_yields_zero_hit_rate() {
    for kind in PolicyKind::ALL {
        let mut policy = build(kind, 2, 0);
        policy.access(1);
        policy.access(1);
        assert_eq!(policy.hits(), 1);
        assert_eq!(policy.hit_rate(), 0.0, "{kind}");
    }
}
