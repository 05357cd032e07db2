//! Clock (Second-Chance) replacement policy.
//!
//! Approximates LRU with one reference bit per slot and a rotating hand.
//! A hit only sets the bit; a miss sweeps from the hand, clearing set bits
//! until it finds an empty or unreferenced slot, and places the new key there.
//!
//! ## Architecture
//!
//! ```text
//!   ring: ClockRing<K>   (capacity slots, persistent hand)
//!
//!            hand
//!             ▼
//!     ┌──────┬──────┬──────┬──────┐
//!     │ A:1  │ B:0  │ C:1  │ D:0  │
//!     └──────┴──────┴──────┴──────┘
//!
//!   access(E) at full ring, hand on A:
//!     A:1 → A:0, advance
//!     B:0 → evict B, place E:1, hand → C
//! ```
//!
//! ## Access Flow
//!
//! ```text
//!   access(k):
//!     k resident  → hits += 1, ref(k) = 1          (hand does not move)
//!     k absent    → sweep from hand (see above)
//! ```
//!
//! The hand survives across accesses and is reset to slot 0 only by `clear`.
//!
//! ## Example Usage
//!
//! ```
//! use cachelab::policy::clock::ClockPolicy;
//! use cachelab::traits::ReplacementPolicy;
//!
//! let mut clock = ClockPolicy::new(3, 8);
//! for k in [1, 2, 3] {
//!     clock.access(k);
//! }
//! // Full sweep clears every bit, then evicts slot 0.
//! assert_eq!(clock.access(4).evicted(), Some(&1));
//! // 2 gets a second chance after a hit; 3 goes instead.
//! clock.access(2);
//! assert_eq!(clock.access(5).evicted(), Some(&3));
//! ```

use std::hash::Hash;

use crate::ds::ClockRing;
use crate::error::{ConfigError, check_capacity};
use crate::metrics::{
    ClockMetricsRecorder, CoreMetricsRecorder, MetricsSnapshotProvider, PolicyMetrics,
    PolicyMetricsSnapshot,
};
use crate::traits::{AccessOutcome, ReplacementPolicy};

/// Second-chance eviction over a slot ring.
///
/// `resident_keys` returns keys in slot order (slot 0 first).
pub struct ClockPolicy<K> {
    ring: ClockRing<K>,
    expected_len: usize,
    hits: u64,
    metrics: PolicyMetrics,
}

impl<K> ClockPolicy<K>
where
    K: Eq + Hash + Clone,
{
    /// Creates a Clock policy sized for a sequence of `expected_len` accesses.
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
            ring: ClockRing::new(capacity),
            expected_len,
            hits: 0,
            metrics: PolicyMetrics::default(),
        })
    }

    /// Slot index the hand points at.
    pub fn hand(&self) -> usize {
        self.ring.hand()
    }

    /// Reference bit of a resident key.
    pub fn is_referenced(&self, key: &K) -> Option<bool> {
        self.ring.is_referenced(key)
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.ring.debug_validate_invariants();
    }
}

impl<K> ReplacementPolicy<K> for ClockPolicy<K>
where
    K: Eq + Hash + Clone,
{
    fn name(&self) -> &'static str {
        "Clock"
    }

    fn access(&mut self, key: K) -> AccessOutcome<K> {
        if self.ring.touch(&key) {
            self.hits += 1;
            self.metrics.record_hit();
            return AccessOutcome::Hit;
        }

        self.metrics.record_miss();
        let evicted = self.ring.insert(key);
        let sweep = self.ring.last_sweep();
        for _ in 0..sweep.hand_advances {
            self.metrics.record_hand_advance();
        }
        for _ in 0..sweep.ref_bit_resets {
            self.metrics.record_ref_bit_reset();
        }
        if evicted.is_some() {
            self.metrics.record_eviction();
        }
        self.metrics.record_insert();
        AccessOutcome::Miss { evicted }
    }

    fn clear(&mut self) {
        self.ring.clear();
        self.hits = 0;
        self.metrics.record_clear();
    }

    fn hits(&self) -> u64 {
        self.hits
    }

    fn len(&self) -> usize {
        self.ring.len()
    }

    fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    fn expected_len(&self) -> usize {
        self.expected_len
    }

    fn contains(&self, key: &K) -> bool {
        self.ring.contains(key)
    }

    fn resident_keys(&self) -> Vec<K> {
        self.ring.keys().cloned().collect()
    }
}

impl<K> MetricsSnapshotProvider<PolicyMetricsSnapshot> for ClockPolicy<K>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> PolicyMetricsSnapshot {
        self.metrics
            .snapshot_with(self.ring.len(), self.ring.capacity())
    }
}

impl<K> std::fmt::Debug for ClockPolicy<K>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClockPolicy")
            .field("capacity", &self.ring.capacity())
            .field("len", &self.ring.len())
            .field("hand", &self.ring.hand())
            .field("hits", &self.hits)
            .finish_non_exhaustive()
    }
}
