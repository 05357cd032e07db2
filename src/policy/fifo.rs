//! FIFO (First In, First Out) replacement policy.
//!
//! Evicts the key that was *inserted* earliest. Hits do not reorder anything,
//! so a key's position is fixed from admission until eviction.
//!
//! ## Architecture
//!
//! ```text
//!   order: KeyedList<K>   (front = oldest, back = newest)
//!
//!     front                                  back
//!       ▼                                      ▼
//!     [k1] ◄──► [k2] ◄──► [k3] ◄──► ... ◄──► [kn]
//!     EVICT                                  INSERT
//! ```
//!
//! ## Access Flow
//!
//! ```text
//!   access(k):
//!     k resident  → hits += 1, order unchanged
//!     k absent    → if full: pop_front (oldest)
//!                   push_back(k)
//! ```
//!
//! ## Operations
//!
//! | Operation  | Time | Notes                       |
//! |------------|------|-----------------------------|
//! | `access`   | O(1) | Index lookup + list splice  |
//! | `contains` | O(1) | Index lookup                |
//! | `clear`    | O(n) | Frees every node            |
//!
//! ## Example Usage
//!
//! ```
//! use cachelab::policy::fifo::FifoPolicy;
//! use cachelab::traits::ReplacementPolicy;
//!
//! let mut fifo = FifoPolicy::new(2, 4);
//! fifo.access(1);
//! fifo.access(2);
//! fifo.access(1); // hit, but 1 stays oldest
//! let outcome = fifo.access(3);
//! assert_eq!(outcome.evicted(), Some(&1));
//! assert_eq!(fifo.resident_keys(), vec![2, 3]);
//! ```

use std::hash::Hash;

use crate::ds::KeyedList;
use crate::error::{ConfigError, check_capacity};
use crate::metrics::{CoreMetricsRecorder, MetricsSnapshotProvider, PolicyMetrics, PolicyMetricsSnapshot};
use crate::traits::{AccessOutcome, ReplacementPolicy};

/// First-in, first-out eviction.
///
/// `resident_keys` returns oldest first.
pub struct FifoPolicy<K> {
    order: KeyedList<K>,
    capacity: usize,
    expected_len: usize,
    hits: u64,
    metrics: PolicyMetrics,
}

impl<K> FifoPolicy<K>
where
    K: Eq + Hash + Clone,
{
    /// Creates a FIFO policy sized for a sequence of `expected_len` accesses.
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
            order: KeyedList::with_capacity(capacity),
            capacity,
            expected_len,
            hits: 0,
            metrics: PolicyMetrics::default(),
        })
    }

    /// Returns the next victim without evicting it.
    pub fn peek_oldest(&self) -> Option<&K> {
        self.order.front()
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.order.debug_validate_invariants();
        assert!(self.order.len() <= self.capacity);
    }
}

impl<K> ReplacementPolicy<K> for FifoPolicy<K>
where
    K: Eq + Hash + Clone,
{
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn access(&mut self, key: K) -> AccessOutcome<K> {
        if self.order.contains(&key) {
            self.hits += 1;
            self.metrics.record_hit();
            return AccessOutcome::Hit;
        }

        self.metrics.record_miss();
        let evicted = if self.order.len() >= self.capacity {
            self.order.pop_front()
        } else {
            None
        };
        if evicted.is_some() {
            self.metrics.record_eviction();
        }
        self.order.push_back(key);
        self.metrics.record_insert();
        AccessOutcome::Miss { evicted }
    }

    fn clear(&mut self) {
        self.order.clear();
        self.hits = 0;
        self.metrics.record_clear();
    }

    fn hits(&self) -> u64 {
        self.hits
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn expected_len(&self) -> usize {
        self.expected_len
    }

    fn contains(&self, key: &K) -> bool {
        self.order.contains(key)
    }

    fn resident_keys(&self) -> Vec<K> {
        self.order.iter().cloned().collect()
    }
}

impl<K> MetricsSnapshotProvider<PolicyMetricsSnapshot> for FifoPolicy<K>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> PolicyMetricsSnapshot {
        self.metrics.snapshot_with(self.order.len(), self.capacity)
    }
}

impl<K> std::fmt::Debug for FifoPolicy<K>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FifoPolicy")
            .field("capacity", &self.capacity)
            .field("len", &self.order.len())
            .field("hits", &self.hits)
            .finish_non_exhaustive()
    }
}
