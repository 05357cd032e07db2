//! ARC (Adaptive Replacement Cache), simplified ratio variant.
//!
//! Splits resident keys into a *recent* list (T1, seen once) and a *frequent*
//! list (T2, seen at least twice), and remembers recently evicted keys in two
//! ghost lists (B1 from T1, B2 from T2). Instead of the classic adaptive
//! target `p`, the victim list is chosen by comparing the resident ratio
//! `|T1| / |T2|` with the ghost ratio `|B2| / max(1, |B1|)`.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────────┐
//! │                          ArcPolicy<K> Layout                             │
//! │                                                                          │
//! │   Resident (|T1| + |T2| ≤ capacity)                                      │
//! │   ┌──────────────────────────────┐  ┌──────────────────────────────┐     │
//! │   │ T1: KeyedList<K>             │  │ T2: KeyedList<K>             │     │
//! │   │ head ─► [new] ... [old] ◄─tail│  │ head ─► [hot] ... [cold] ◄─tail│   │
//! │   └──────────────┬───────────────┘  └──────────────┬───────────────┘     │
//! │                  │ replace()                       │ replace()           │
//! │                  ▼                                 ▼                     │
//! │   Ghosts (|B1| + |B2| ≤ capacity, keys only)                             │
//! │   ┌──────────────────────────────┐  ┌──────────────────────────────┐     │
//! │   │ B1: GhostList<K>             │  │ B2: GhostList<K>             │     │
//! │   └──────────────────────────────┘  └──────────────────────────────┘     │
//! └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Access Flow
//!
//! ```text
//!   access(k):
//!     k ∈ T1  → remove from T1, push to T2 head         (hit, promotion)
//!     k ∈ T2  → move to T2 head                         (hit)
//!     else    → if |T1| + |T2| ≥ capacity: replace()
//!               if |T1| < capacity - |T2|: push to T1 head
//!               else:                      push to T2 head
//!
//!   replace():
//!     if |T1| > 0 and (|T2| = 0 or |T1|/|T2| > |B2|/max(1,|B1|)):
//!         T1 tail → B1 head
//!     else:
//!         T2 tail → B2 head
//! ```
//!
//! ## Ghost Budget
//!
//! Ghost lists share a budget of `capacity` keys. When recording a ghost
//! would exceed it, the oldest ghost of the same list is dropped first, or
//! the other list's oldest when the same list is empty. Demoting a key that
//! is already a ghost in the same list only refreshes its position.
//!
//! Ghosts are history, not a residency filter: a key re-admitted on a miss
//! keeps its ghost entry, so `|B1|` and `|B2|` keep weighing on later
//! `replace()` calls until the budget ages the entry out. A ghost hit is
//! counted but is otherwise a plain miss (no target size to adapt).
//!
//! ## Example Usage
//!
//! ```
//! use cachelab::policy::arc::ArcPolicy;
//! use cachelab::traits::ReplacementPolicy;
//!
//! let mut arc = ArcPolicy::new(2, 4);
//! arc.access(1);
//! assert!(arc.in_t1(&1));
//! arc.access(1); // promoted
//! assert!(arc.in_t2(&1));
//! assert_eq!(arc.t1_len(), 0);
//! assert_eq!(arc.t2_len(), 1);
//! ```

use std::hash::Hash;

use crate::ds::{GhostList, KeyedList};
use crate::error::{ConfigError, check_capacity};
use crate::metrics::{
    ArcMetricsRecorder, CoreMetricsRecorder, MetricsSnapshotProvider, PolicyMetrics,
    PolicyMetricsSnapshot,
};
use crate::traits::{AccessOutcome, ReplacementPolicy};

/// Which ghost list a key was demoted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ghost {
    B1,
    B2,
}

/// Simplified ARC.
///
/// `resident_keys` returns T1 (most recent first) followed by T2 (most recent
/// first).
pub struct ArcPolicy<K> {
    t1: KeyedList<K>,
    t2: KeyedList<K>,
    b1: GhostList<K>,
    b2: GhostList<K>,
    capacity: usize,
    expected_len: usize,
    hits: u64,
    metrics: PolicyMetrics,
}

impl<K> ArcPolicy<K>
where
    K: Eq + Hash + Clone,
{
    /// Creates an ARC policy sized for a sequence of `expected_len` accesses.
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
            t1: KeyedList::with_capacity(capacity),
            t2: KeyedList::with_capacity(capacity),
            b1: GhostList::new(capacity),
            b2: GhostList::new(capacity),
            capacity,
            expected_len,
            hits: 0,
            metrics: PolicyMetrics::default(),
        })
    }

    pub fn t1_len(&self) -> usize {
        self.t1.len()
    }

    pub fn t2_len(&self) -> usize {
        self.t2.len()
    }

    pub fn b1_len(&self) -> usize {
        self.b1.len()
    }

    pub fn b2_len(&self) -> usize {
        self.b2.len()
    }

    pub fn in_t1(&self, key: &K) -> bool {
        self.t1.contains(key)
    }

    pub fn in_t2(&self, key: &K) -> bool {
        self.t2.contains(key)
    }

    pub fn in_b1(&self, key: &K) -> bool {
        self.b1.contains(key)
    }

    pub fn in_b2(&self, key: &K) -> bool {
        self.b2.contains(key)
    }

    /// Demotes one resident key into its ghost list and returns it.
    fn replace(&mut self) -> Option<K> {
        let t1_len = self.t1.len();
        let t2_len = self.t2.len();
        let ghost_ratio = self.b2.len() as f64 / self.b1.len().max(1) as f64;
        let from_t1 =
            t1_len > 0 && (t2_len == 0 || (t1_len as f64 / t2_len as f64) > ghost_ratio);

        if from_t1 {
            let victim = self.t1.pop_back()?;
            self.metrics.record_t1_eviction();
            self.remember(victim.clone(), Ghost::B1);
            Some(victim)
        } else {
            let victim = self.t2.pop_back()?;
            self.metrics.record_t2_eviction();
            self.remember(victim.clone(), Ghost::B2);
            Some(victim)
        }
    }

    /// Records a ghost, trimming to the shared `capacity` budget first.
    fn remember(&mut self, key: K, into: Ghost) {
        let refresh = match into {
            Ghost::B1 => self.b1.contains(&key),
            Ghost::B2 => self.b2.contains(&key),
        };
        if !refresh && self.b1.len() + self.b2.len() >= self.capacity {
            let (same, other) = match into {
                Ghost::B1 => (&mut self.b1, &mut self.b2),
                Ghost::B2 => (&mut self.b2, &mut self.b1),
            };
            if same.pop_oldest().is_none() {
                other.pop_oldest();
            }
        }
        match into {
            Ghost::B1 => self.b1.record(key),
            Ghost::B2 => self.b2.record(key),
        };
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.t1.debug_validate_invariants();
        self.t2.debug_validate_invariants();
        self.b1.debug_validate_invariants();
        self.b2.debug_validate_invariants();
        assert!(self.t1.len() + self.t2.len() <= self.capacity);
        assert!(self.b1.len() + self.b2.len() <= self.capacity);
        for key in self.t1.iter() {
            assert!(!self.t2.contains(key));
        }
    }
}

impl<K> ReplacementPolicy<K> for ArcPolicy<K>
where
    K: Eq + Hash + Clone,
{
    fn name(&self) -> &'static str {
        "ARC"
    }

    fn access(&mut self, key: K) -> AccessOutcome<K> {
        if self.t1.remove(&key) {
            self.t2.push_front(key);
            self.hits += 1;
            self.metrics.record_hit();
            self.metrics.record_t1_to_t2_promotion();
            return AccessOutcome::Hit;
        }
        if self.t2.move_to_front(&key) {
            self.hits += 1;
            self.metrics.record_hit();
            return AccessOutcome::Hit;
        }

        self.metrics.record_miss();
        if self.b1.contains(&key) {
            self.metrics.record_b1_ghost_hit();
        }
        if self.b2.contains(&key) {
            self.metrics.record_b2_ghost_hit();
        }

        let evicted = if self.t1.len() + self.t2.len() >= self.capacity {
            self.replace()
        } else {
            None
        };
        if evicted.is_some() {
            self.metrics.record_eviction();
        }

        if self.t1.len() < self.capacity - self.t2.len() {
            self.t1.push_front(key);
        } else {
            self.t2.push_front(key);
        }
        self.metrics.record_insert();
        AccessOutcome::Miss { evicted }
    }

    fn clear(&mut self) {
        self.t1.clear();
        self.t2.clear();
        self.b1.clear();
        self.b2.clear();
        self.hits = 0;
        self.metrics.record_clear();
    }

    fn hits(&self) -> u64 {
        self.hits
    }

    fn len(&self) -> usize {
        self.t1.len() + self.t2.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn expected_len(&self) -> usize {
        self.expected_len
    }

    fn contains(&self, key: &K) -> bool {
        self.t1.contains(key) || self.t2.contains(key)
    }

    fn resident_keys(&self) -> Vec<K> {
        self.t1.iter().chain(self.t2.iter()).cloned().collect()
    }
}

impl<K> MetricsSnapshotProvider<PolicyMetricsSnapshot> for ArcPolicy<K>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> PolicyMetricsSnapshot {
        self.metrics
            .snapshot_with(self.t1.len() + self.t2.len(), self.capacity)
    }
}

impl<K> std::fmt::Debug for ArcPolicy<K>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArcPolicy")
            .field("capacity", &self.capacity)
            .field("t1_len", &self.t1.len())
            .field("t2_len", &self.t2.len())
            .field("b1_len", &self.b1.len())
            .field("b2_len", &self.b2.len())
            .field("hits", &self.hits)
            .finish_non_exhaustive()
    }
}
