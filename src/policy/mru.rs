//! MRU (Most Recently Used) replacement policy.
//!
//! Evicts the **most** recently referenced key when a miss arrives at a full
//! cache. This is the mirror image of LRU and wins on cyclic scans larger
//! than the cache, where the key just used is the one needed last.
//!
//! ## Architecture
//!
//! ```text
//!   recency: KeyedList<K>
//!
//!     front (least recent)                     back (most recent)
//!       ▼                                          ▼
//!     [k1] ◄──► [k2] ◄──► [k3] ◄──► ... ◄──► [kn]
//!     KEEP                                     EVICT, then INSERT
//! ```
//!
//! ## Access Flow
//!
//! ```text
//!   access(k):
//!     k resident  → hits += 1, move_to_back(k)
//!     k absent    → if full: pop_back (most recent resident)
//!                   push_back(k)
//! ```
//!
//! The victim is chosen *before* the new key is appended, so a new key is
//! never its own victim.
//!
//! ## Example Usage
//!
//! ```
//! use cachelab::policy::mru::MruPolicy;
//! use cachelab::traits::ReplacementPolicy;
//!
//! let mut mru = MruPolicy::new(2, 4);
//! mru.access("a");
//! mru.access("b");
//! mru.access("a"); // a becomes most recent
//! assert_eq!(mru.access("c").evicted(), Some(&"a"));
//! assert_eq!(mru.resident_keys(), vec!["b", "c"]);
//! ```
//!
//! ## When to Use
//!
//! **Use MRU when** the workload loops over a working set slightly larger
//! than the cache. **Avoid MRU** for anything with temporal locality.

use std::hash::Hash;

use crate::ds::KeyedList;
use crate::error::{ConfigError, check_capacity};
use crate::metrics::{CoreMetricsRecorder, MetricsSnapshotProvider, PolicyMetrics, PolicyMetricsSnapshot};
use crate::traits::{AccessOutcome, ReplacementPolicy};

/// Most-recently-used eviction.
///
/// `resident_keys` returns least recent first, so the next victim is last.
pub struct MruPolicy<K> {
    recency: KeyedList<K>,
    capacity: usize,
    expected_len: usize,
    hits: u64,
    metrics: PolicyMetrics,
}

impl<K> MruPolicy<K>
where
    K: Eq + Hash + Clone,
{
    /// Creates an MRU policy sized for a sequence of `expected_len` accesses.
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

    /// Returns the key the next miss at full capacity would evict.
    pub fn peek_victim(&self) -> Option<&K> {
        self.recency.back()
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.recency.debug_validate_invariants();
        assert!(self.recency.len() <= self.capacity);
    }
}

impl<K> ReplacementPolicy<K> for MruPolicy<K>
where
    K: Eq + Hash + Clone,
{
    fn name(&self) -> &'static str {
        "MRU"
    }

    fn access(&mut self, key: K) -> AccessOutcome<K> {
        if self.recency.move_to_back(&key) {
            self.hits += 1;
            self.metrics.record_hit();
            return AccessOutcome::Hit;
        }

        self.metrics.record_miss();
        let evicted = if self.recency.len() >= self.capacity {
            self.recency.pop_back()
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

impl<K> MetricsSnapshotProvider<PolicyMetricsSnapshot> for MruPolicy<K>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> PolicyMetricsSnapshot {
        self.metrics.snapshot_with(self.recency.len(), self.capacity)
    }
}

impl<K> std::fmt::Debug for MruPolicy<K>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MruPolicy")
            .field("capacity", &self.capacity)
            .field("len", &self.recency.len())
            .field("hits", &self.hits)
            .finish_non_exhaustive()
    }
}
