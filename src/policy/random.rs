//! Random Replacement (RR) policy.
//!
//! Keeps resident keys in a dense slot vector. A miss on a full cache picks a
//! slot uniformly at random and overwrites it. Hits change nothing, so the
//! policy carries no recency or frequency state at all.
//!
//! ## Architecture
//!
//! ```text
//!   slots: Vec<K>                  index: FxHashMap<K, usize>
//!   ┌─────┬─────┬─────┬─────┐      ┌──────┬─────┐
//!   │ k0  │ k1  │ k2  │ k3  │      │  k0  │  0  │
//!   └─────┴─────┴─────┴─────┘      │  k2  │  2  │  ...
//!            ▲                      └──────┴─────┘
//!            └── random_range(0..capacity) on a full miss
//! ```
//!
//! ## Determinism
//!
//! The RNG is a [`SmallRng`]. [`RandomPolicy::with_seed`] fixes the eviction
//! sequence so runs are reproducible; [`RandomPolicy::try_new`] seeds from the
//! operating system. Hit counts on a sequence that never misses after warm-up
//! do not depend on the seed.
//!
//! ## Example Usage
//!
//! ```
//! use cachelab::policy::random::RandomPolicy;
//! use cachelab::traits::ReplacementPolicy;
//!
//! let mut rr = RandomPolicy::with_seed(3, 6, 42).unwrap();
//! for k in [1, 2, 3, 4] {
//!     rr.access(k);
//! }
//! assert_eq!(rr.len(), 3);
//! assert!(rr.contains(&4));
//! ```

use std::hash::Hash;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;

use crate::error::{ConfigError, check_capacity};
use crate::metrics::{CoreMetricsRecorder, MetricsSnapshotProvider, PolicyMetrics, PolicyMetricsSnapshot};
use crate::traits::{AccessOutcome, ReplacementPolicy};

/// Uniform random eviction.
///
/// `resident_keys` returns keys in slot order.
pub struct RandomPolicy<K> {
    slots: Vec<K>,
    index: FxHashMap<K, usize>,
    capacity: usize,
    expected_len: usize,
    hits: u64,
    rng: SmallRng,
    metrics: PolicyMetrics,
}

impl<K> RandomPolicy<K>
where
    K: Eq + Hash + Clone,
{
    /// Creates an RR policy seeded from OS entropy.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Use [`try_new`](Self::try_new) to handle
    /// the error instead.
    pub fn new(capacity: usize, expected_len: usize) -> Self {
        match Self::try_new(capacity, expected_len) {
            Ok(policy) => policy,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible constructor seeded from OS entropy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCapacity`] if `capacity` is zero.
    pub fn try_new(capacity: usize, expected_len: usize) -> Result<Self, ConfigError> {
        Self::with_rng(capacity, expected_len, SmallRng::from_os_rng())
    }

    /// Creates an RR policy whose victim sequence is fixed by `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCapacity`] if `capacity` is zero.
    pub fn with_seed(capacity: usize, expected_len: usize, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(capacity, expected_len, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(capacity: usize, expected_len: usize, rng: SmallRng) -> Result<Self, ConfigError> {
        check_capacity(capacity)?;
        Ok(Self {
            slots: Vec::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            capacity,
            expected_len,
            hits: 0,
            rng,
            metrics: PolicyMetrics::default(),
        })
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert!(self.slots.len() <= self.capacity);
        assert_eq!(self.slots.len(), self.index.len());
        for (key, &idx) in &self.index {
            assert!(&self.slots[idx] == key);
        }
    }
}

impl<K> ReplacementPolicy<K> for RandomPolicy<K>
where
    K: Eq + Hash + Clone,
{
    fn name(&self) -> &'static str {
        "RR"
    }

    fn access(&mut self, key: K) -> AccessOutcome<K> {
        if self.index.contains_key(&key) {
            self.hits += 1;
            self.metrics.record_hit();
            return AccessOutcome::Hit;
        }

        self.metrics.record_miss();
        self.metrics.record_insert();
        if self.slots.len() < self.capacity {
            self.index.insert(key.clone(), self.slots.len());
            self.slots.push(key);
            return AccessOutcome::Miss { evicted: None };
        }

        let idx = self.rng.random_range(0..self.capacity);
        let victim = std::mem::replace(&mut self.slots[idx], key.clone());
        self.index.remove(&victim);
        self.index.insert(key, idx);
        self.metrics.record_eviction();
        AccessOutcome::Miss {
            evicted: Some(victim),
        }
    }

    fn clear(&mut self) {
        self.slots.clear();
        self.index.clear();
        self.hits = 0;
        self.metrics.record_clear();
    }

    fn hits(&self) -> u64 {
        self.hits
    }

    fn len(&self) -> usize {
        self.slots.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn expected_len(&self) -> usize {
        self.expected_len
    }

    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    fn resident_keys(&self) -> Vec<K> {
        self.slots.clone()
    }
}

impl<K> MetricsSnapshotProvider<PolicyMetricsSnapshot> for RandomPolicy<K>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> PolicyMetricsSnapshot {
        self.metrics.snapshot_with(self.slots.len(), self.capacity)
    }
}

impl<K> std::fmt::Debug for RandomPolicy<K>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomPolicy")
            .field("capacity", &self.capacity)
            .field("len", &self.slots.len())
            .field("hits", &self.hits)
            .finish_non_exhaustive()
    }
}
