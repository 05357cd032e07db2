//! LRU (Least Recently Used) replacement policy.
//!
//! Evicts the key whose last reference is oldest. Every hit moves the key to
//! the most-recent end, so the victim is always at the opposite end.
//!
//! ## Architecture
//!
//! ```text
//!   recency: KeyedList<K>
//!
//!     front (LRU)                              back (MRU)
//!       ▼                                          ▼
//!     [k1] ◄──► [k2] ◄──► [k3] ◄──► ... ◄──► [kn]
//!     EVICT                                    INSERT / HIT
//! ```
//!
//! ## Access Flow
//!
//! ```text
//!   access(k):
//!     k resident  → hits += 1, move_to_back(k)
//!     k absent    → if full: pop_front (least recent)
//!                   push_back(k)
//! ```
//!
//! ## Operations
//!
//! | Operation  | Time | Notes                         |
//! |------------|------|-------------------------------|
//! | `access`   | O(1) | Index lookup + list splice    |
//! | `contains` | O(1) | Does not update recency       |
//! | `clear`    | O(n) | Frees every node              |
//!
//! ## Example Usage
//!
//! ```
//! use cachelab::policy::lru::LruPolicy;
//! use cachelab::traits::ReplacementPolicy;
//!
//! let mut lru = LruPolicy::new(2, 4);
//! lru.access("a");
//! lru.access("b");
//! lru.access("a"); // a becomes most recent
//! assert_eq!(lru.access("c").evicted(), Some(&"b"));
//! assert_eq!(lru.resident_keys(), vec!["a", "c"]);
//! ```

use std::hash::Hash;

use crate::ds::KeyedList;
use crate::error::{ConfigError, check_capacity};
use crate::metrics::{CoreMetricsRecorder, MetricsSnapshotProvider, PolicyMetrics, PolicyMetricsSnapshot};
use crate::traits::{AccessOutcome, ReplacementPolicy};

/// Least-recently-used eviction.
///
/// `resident_keys` returns least recent first.
pub struct LruPolicy<K> {
    recency: KeyedList<K>,
    capacity: usize,
    expected_len: usize,
    hits: u64,
    metrics: PolicyMetrics,
}

impl<K> LruPolicy<K>
where
    K: Eq + Hash + Clone,
{
    /// Creates an LRU policy sized for a sequence of `expected_len` accesses.
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

    /// Fallible constructor.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCapacity`] if `capacity` is zero.
    pub fn try_new(capacity: usize, expected_len: usize) -> Result<Self, ConfigError> {
        check_capacity(capacity)?;
        Ok(Self {
            recency: KeyedList::with_capacity(capacity),
            capacity,
            expected_len,
            hits: 0,
            metrics: PolicyMetrics::default(),
        })
    }

    /// Returns the least recently used key without evicting it.
    pub fn peek_lru(&self) -> Option<&K> {
        self.recency.front()
    }

    /// Returns the most recently used key.
    pub fn peek_mru(&self) -> Option<&K> {
        self.recency.back()
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.recency.debug_validate_invariants();
        assert!(self.recency.len() <= self.capacity);
    }
}

impl<K> ReplacementPolicy<K> for LruPolicy<K>
where
    K: Eq + Hash + Clone,
{
    fn name(&self) -> &'static str {
        "LRU"
    }

    fn access(&mut self, key: K) -> AccessOutcome<K> {
        if self.recency.move_to_back(&key) {
            self.hits += 1;
            self.metrics.record_hit();
            return AccessOutcome::Hit;
        }

        self.metrics.record_miss();
        let evicted = if self.recency.len() >= self.capacity {
            self.recency.pop_front()
        } else {
            None
        };
        if evicted.is_some() {
            self.metrics.record_eviction();
        }
        self.recency.push_back(key);
        self.metrics.record_insert();
        AccessOutcome::Miss { evicted }
    }

    fn clear(&mut self) {
        self.recency.clear();
        self.hits = 0;
        self.metrics.record_clear();
    }

    fn hits(&self) -> u64 {
        self.hits
    }

    fn len(&self) -> usize {
        self.recency.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn expected_len(&self) -> usize {
        self.expected_len
    }

    fn contains(&self, key: &K) -> bool {
        self.recency.contains(key)
    }

    fn resident_keys(&self) -> Vec<K> {
        self.recency.iter().cloned().collect()
    }
}

impl<K> MetricsSnapshotProvider<PolicyMetricsSnapshot> for LruPolicy<K>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> PolicyMetricsSnapshot {
        self.metrics.snapshot_with(self.recency.len(), self.capacity)
    }
}

impl<K> std::fmt::Debug for LruPolicy<K>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LruPolicy")
            .field("capacity", &self.capacity)
            .field("len", &self.recency.len())
            .field("hits", &self.hits)
            .finish_non_exhaustive()
    }
}
