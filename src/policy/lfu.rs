//! LFU (Least Frequently Used) replacement policy.
//!
//! Counts references per resident key and evicts a key with the lowest count.
//! Counts start at 1 on admission and are forgotten on eviction.
//!
//! ## Architecture
//!
//! ```text
//!   freq: FrequencyBuckets<K>
//!
//!   freq=1: [k7] ◄──► [k3]        ◄── back = oldest at freq 1 (victim)
//!   freq=2: [k1]
//!   freq=5: [k4] ◄──► [k2]
//! ```
//!
//! ## Tie-Breaking
//!
//! Among keys at the minimum frequency the victim is the one that *entered
//! that frequency* first. A key that was just promoted from freq 1 to freq 2
//! is therefore younger at freq 2 than a key that has sat at freq 2 longer.
//! The order is deterministic for a given access sequence.
//!
//! ## Access Flow
//!
//! ```text
//!   access(k):
//!     k resident  → hits += 1, touch(k)        (freq += 1)
//!     k absent    → if full: pop_min()
//!                   insert(k)                  (freq = 1)
//! ```
//!
//! ## Example Usage
//!
//! ```
//! use cachelab::policy::lfu::LfuPolicy;
//! use cachelab::traits::ReplacementPolicy;
//!
//! let mut lfu = LfuPolicy::new(2, 5);
//! lfu.access(1);
//! lfu.access(1);
//! lfu.access(2);
//! assert_eq!(lfu.access(3).evicted(), Some(&2));
//! assert_eq!(lfu.frequency(&1), Some(2));
//! ```

use std::hash::Hash;

use crate::ds::FrequencyBuckets;
use crate::error::{ConfigError, check_capacity};
use crate::metrics::{CoreMetricsRecorder, MetricsSnapshotProvider, PolicyMetrics, PolicyMetricsSnapshot};
use crate::traits::{AccessOutcome, ReplacementPolicy};

/// Least-frequently-used eviction with FIFO tie-break inside a frequency.
///
/// `resident_keys` returns keys by ascending frequency, oldest first within a
/// frequency; the first key is the next victim.
pub struct LfuPolicy<K> {
    freq: FrequencyBuckets<K>,
    capacity: usize,
    expected_len: usize,
    hits: u64,
    metrics: PolicyMetrics,
}

impl<K> LfuPolicy<K>
where
    K: Eq + Hash + Clone,
{
    /// Creates an LFU policy sized for a sequence of `expected_len` accesses.
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
            freq: FrequencyBuckets::with_capacity(capacity),
            capacity,
            expected_len,
            hits: 0,
            metrics: PolicyMetrics::default(),
        })
    }

    /// Current reference count of a resident key.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.freq.frequency(key)
    }

    /// Lowest reference count among resident keys.
    pub fn min_frequency(&self) -> Option<u64> {
        self.freq.min_freq()
    }

    /// Returns the next victim and its count without evicting it.
    pub fn peek_lfu(&self) -> Option<(&K, u64)> {
        self.freq.peek_min()
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.freq.debug_validate_invariants();
        assert!(self.freq.len() <= self.capacity);
    }
}

impl<K> ReplacementPolicy<K> for LfuPolicy<K>
where
    K: Eq + Hash + Clone,
{
    fn name(&self) -> &'static str {
        "LFU"
    }

    fn access(&mut self, key: K) -> AccessOutcome<K> {
        if self.freq.touch(&key).is_some() {
            self.hits += 1;
            self.metrics.record_hit();
            return AccessOutcome::Hit;
        }

        self.metrics.record_miss();
        let evicted = if self.freq.len() >= self.capacity {
            self.freq.pop_min().map(|(victim, _)| victim)
        } else {
            None
        };
        if evicted.is_some() {
            self.metrics.record_eviction();
        }
        self.freq.insert(key);
        self.metrics.record_insert();
        AccessOutcome::Miss { evicted }
    }

    fn clear(&mut self) {
        self.freq.clear();
        self.hits = 0;
        self.metrics.record_clear();
    }

    fn hits(&self) -> u64 {
        self.hits
    }

    fn len(&self) -> usize {
        self.freq.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn expected_len(&self) -> usize {
        self.expected_len
    }

    fn contains(&self, key: &K) -> bool {
        self.freq.contains(key)
    }

    fn resident_keys(&self) -> Vec<K> {
        self.freq.iter().map(|(key, _)| key.clone()).collect()
    }
}

impl<K> MetricsSnapshotProvider<PolicyMetricsSnapshot> for LfuPolicy<K>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> PolicyMetricsSnapshot {
        self.metrics.snapshot_with(self.freq.len(), self.capacity)
    }
}

impl<K> std::fmt::Debug for LfuPolicy<K>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LfuPolicy")
            .field("capacity", &self.capacity)
            .field("len", &self.freq.len())
            .field("hits", &self.hits)
            .field("min_freq", &self.freq.min_freq())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_lowest_frequency() {
        let mut lfu = LfuPolicy::new(3, 8);
        for k in [1, 1, 1, 2, 2, 3] {
            lfu.access(k);
        }
        assert_eq!(lfu.peek_lfu(), Some((&3, 1)));
        assert_eq!(lfu.access(4).into_evicted(), Some(3));
        assert_eq!(lfu.frequency(&1), Some(3));
        assert_eq!(lfu.frequency(&2), Some(2));
        assert_eq!(lfu.frequency(&4), Some(1));
        lfu.debug_validate_invariants();
    }

    #[test]
    fn ties_evict_oldest_at_min_frequency() {
        let mut lfu = LfuPolicy::new(3, 4);
        for k in [1, 2, 3] {
            lfu.access(k);
        }
        assert_eq!(lfu.access(4).into_evicted(), Some(1));
        assert_eq!(lfu.access(5).into_evicted(), Some(2));
    }

    #[test]
    fn ties_follow_arrival_at_the_count_not_insertion() {
        let mut lfu = LfuPolicy::new(2, 5);
        // 1 is older, but 2 reached count 2 first
        for k in [1, 2, 2, 1] {
            lfu.access(k);
        }
        assert_eq!(lfu.peek_lfu(), Some((&2, 2)));
        assert_eq!(lfu.access(3).into_evicted(), Some(2));
        assert_eq!(lfu.frequency(&1), Some(2));
        lfu.debug_validate_invariants();
    }

    #[test]
    fn evicted_key_forgets_its_count() {
        let mut lfu = LfuPolicy::new(1, 4);
        lfu.access(1);
        lfu.access(1);
        assert_eq!(lfu.access(2).into_evicted(), Some(1));
        assert_eq!(lfu.frequency(&1), None);
        assert_eq!(lfu.access(1).into_evicted(), Some(2));
        assert_eq!(lfu.frequency(&1), Some(1));
    }

    #[test]
    fn resident_keys_start_with_victim() {
        let mut lfu = LfuPolicy::new(3, 5);
        for k in [1, 2, 3, 1] {
            lfu.access(k);
        }
        assert_eq!(lfu.resident_keys(), vec![2, 3, 1]);
        assert_eq!(lfu.min_frequency(), Some(1));
    }

    #[test]
    fn clear_drops_frequencies() {
        let mut lfu = LfuPolicy::new(2, 4);
        lfu.access(1);
        lfu.access(1);
        lfu.clear();
        assert!(lfu.is_empty());
        assert_eq!(lfu.hits(), 0);
        assert_eq!(lfu.frequency(&1), None);
        lfu.access(1);
        assert_eq!(lfu.frequency(&1), Some(1));
    }
}
