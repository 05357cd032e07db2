//! # Replacement Policy Contract
//!
//! Every eviction policy in the lab implements [`ReplacementPolicy`], which
//! tracks *key presence only*: there are no values, so a policy is fully
//! described by which keys are resident and in what order it will give them
//! up.
//!
//! ## Architecture
//!
//! ```text
//!        ┌──────────────────────────────────────────────────────────┐
//!        │       MetricsSnapshotProvider<PolicyMetricsSnapshot>     │
//!        └────────────────────────────┬─────────────────────────────┘
//!                                     │
//!                                     ▼
//!        ┌──────────────────────────────────────────────────────────┐
//!        │               ReplacementPolicy<K>                       │
//!        │                                                          │
//!        │  access(&mut, K) → AccessOutcome<K>   (sole mutator)     │
//!        │  clear(&mut)                                             │
//!        │  hit_rate(&) → f64                                       │
//!        │                                                          │
//!        │  hits / len / capacity / expected_len                    │
//!        │  contains(&K) / resident_keys() / name() / metrics()     │
//!        └────────────────────────────┬─────────────────────────────┘
//!                                     │
//!     ┌───────┬───────┬───────┬───────┼───────┬───────┬───────┐
//!     ▼       ▼       ▼       ▼       ▼       ▼       ▼       │
//!   FIFO     LRU     LFU     MRU      RR     ARC    Clock     │
//!                                                             │
//!                              AnyPolicy (enum dispatch) ◄────┘
//! ```
//!
//! ## Access Contract
//!
//! | Case | Counter      | Structure change                           |
//! |------|--------------|--------------------------------------------|
//! | hit  | `hits += 1`  | policy-specific recency/frequency update   |
//! | miss | unchanged    | insert key; evict one victim first if full |
//!
//! `len() <= capacity()` holds after every call, and `access` never fails.
//!
//! ## Hit Rate
//!
//! `hit_rate = hits / expected_len`, where `expected_len` is the length of the
//! sequence the policy was sized for. It is `0.0` when the cache is currently
//! empty or `expected_len` is zero, and is clamped to `1.0` if a caller makes
//! more accesses than it declared.
//!
//! ## Example Usage
//!
//! ```
//! use cachelab::policy::lru::LruPolicy;
//! use cachelab::traits::{AccessOutcome, ReplacementPolicy};
//!
//! fn replay<P: ReplacementPolicy<i64>>(policy: &mut P, keys: &[i64]) -> u64 {
//!     for &k in keys {
//!         policy.access(k);
//!     }
//!     policy.hits()
//! }
//!
//! let mut lru = LruPolicy::new(2, 4);
//! assert_eq!(replay(&mut lru, &[1, 2, 1, 3]), 1);
//! assert!(!lru.contains(&2));
//! assert_eq!(lru.access(1), AccessOutcome::Hit);
//! ```

use crate::metrics::{MetricsSnapshotProvider, PolicyMetricsSnapshot};

/// Result of a single [`ReplacementPolicy::access`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessOutcome<K> {
    /// The key was resident.
    Hit,
    /// The key was inserted; `evicted` is the victim displaced to make room.
    Miss { evicted: Option<K> },
}

impl<K> AccessOutcome<K> {
    pub fn is_hit(&self) -> bool {
        matches!(self, AccessOutcome::Hit)
    }

    pub fn is_miss(&self) -> bool {
        !self.is_hit()
    }

    /// Returns the evicted key, if this miss displaced one.
    pub fn evicted(&self) -> Option<&K> {
        match self {
            AccessOutcome::Miss { evicted } => evicted.as_ref(),
            AccessOutcome::Hit => None,
        }
    }

    pub fn into_evicted(self) -> Option<K> {
        match self {
            AccessOutcome::Miss { evicted } => evicted,
            AccessOutcome::Hit => None,
        }
    }
}

/// Uniform interface over every eviction policy.
pub trait ReplacementPolicy<K>: MetricsSnapshotProvider<PolicyMetricsSnapshot> {
    /// Short, stable policy label (`"LRU"`, `"ARC"`, ...).
    fn name(&self) -> &'static str;

    /// Records one reference to `key`.
    fn access(&mut self, key: K) -> AccessOutcome<K>;

    /// Drops every resident key (and ghost) and resets the hit counter.
    ///
    /// Capacity and expected length are kept.
    fn clear(&mut self);

    /// Hits recorded since construction or the last `clear`.
    fn hits(&self) -> u64;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn capacity(&self) -> usize;

    /// Length of the access sequence this instance was sized for.
    fn expected_len(&self) -> usize;

    /// Returns `true` if `key` is resident. Does not count as an access.
    fn contains(&self, key: &K) -> bool;

    /// Resident keys in the policy's own eviction-relevant order.
    fn resident_keys(&self) -> Vec<K>;

    /// Fraction of the expected sequence that hit, in `[0, 1]`.
    fn hit_rate(&self) -> f64 {
        hit_ratio(self.hits(), self.expected_len(), self.is_empty())
    }

    fn metrics(&self) -> PolicyMetricsSnapshot {
        self.snapshot()
    }
}

/// Hit-rate arithmetic shared by every policy and the harness.
pub fn hit_ratio(hits: u64, expected_len: usize, cache_empty: bool) -> f64 {
    if cache_empty || expected_len == 0 {
        return 0.0;
    }
    (hits as f64 / expected_len as f64).min(1.0)
}
