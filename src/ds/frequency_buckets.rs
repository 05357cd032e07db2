//! Frequency buckets for LFU tracking.
//!
//! Tracks an access count per key and groups keys by count. Each bucket is an
//! [`IntrusiveList`] ordered by when the key *entered that frequency*, so the
//! eviction victim is the oldest key within the lowest non-empty bucket.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                    FrequencyBuckets<K> Layout                        │
//! │                                                                      │
//! │   index: FxHashMap<K, (freq, SlotId)>                                │
//! │   ┌───────────┬────────────────┐                                     │
//! │   │  "page_a" │  (2, id_0)     │                                     │
//! │   │  "page_b" │  (1, id_1)     │                                     │
//! │   │  "page_c" │  (1, id_2)     │                                     │
//! │   └───────────┴────────────────┘                                     │
//! │                                                                      │
//! │   buckets: BTreeMap<u64, IntrusiveList<K>>                           │
//! │                                                                      │
//! │   freq=1: front ──► [page_c] ◄──► [page_b] ◄── back                  │
//! │                      newest        oldest (evict first)              │
//! │   freq=2: front ──► [page_a] ◄── back                                │
//! └──────────────────────────────────────────────────────────────────────┘
//!
//! Touch Flow
//! ──────────
//!   touch("page_b"):
//!     1. Lookup (1, id_1) in index
//!     2. Remove id_1 from the freq=1 bucket; drop the bucket if empty
//!     3. Push page_b to the front of the freq=2 bucket
//!     4. Store (2, new id) in the index
//!
//! Eviction Flow
//! ─────────────
//!   pop_min():
//!     1. Take the first (lowest) bucket from the BTreeMap
//!     2. Pop its back (oldest at that frequency)
//!     3. Remove the key from the index; drop the bucket if empty
//! ```
//!
//! ## Operations
//!
//! | Operation   | Time      | Notes                                 |
//! |-------------|-----------|---------------------------------------|
//! | `insert`    | O(log F)  | New key starts at freq=1              |
//! | `touch`     | O(log F)  | Increment frequency, move to newest   |
//! | `remove`    | O(log F)  | Remove from tracking                  |
//! | `pop_min`   | O(log F)  | Evict LFU (FIFO tie-break)            |
//! | `frequency` | O(1)      | Query current frequency               |
//!
//! `F` is the number of distinct live frequencies, which stays small in
//! practice.
//!
//! ## Example Usage
//!
//! ```
//! use cachelab::ds::FrequencyBuckets;
//!
//! let mut freq = FrequencyBuckets::new();
//! freq.insert("page_a");
//! freq.insert("page_b");
//! freq.insert("page_c");
//!
//! freq.touch(&"page_a");
//! freq.touch(&"page_a");
//! assert_eq!(freq.frequency(&"page_a"), Some(3));
//!
//! // Lowest frequency, oldest among ties.
//! assert_eq!(freq.pop_min(), Some(("page_b", 1)));
//! ```
//!
//! `debug_validate_invariants()` is available in debug/test builds.
use std::collections::BTreeMap;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::intrusive_list::IntrusiveList;
use crate::ds::slot_arena::SlotId;

#[derive(Debug)]
pub struct FrequencyBuckets<K> {
    index: FxHashMap<K, (u64, SlotId)>,
    buckets: BTreeMap<u64, IntrusiveList<K>>,
}

impl<K> FrequencyBuckets<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            index: FxHashMap::default(),
            buckets: BTreeMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            buckets: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the access count recorded for `key`.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.index.get(key).map(|&(freq, _)| freq)
    }

    /// Returns the lowest live frequency.
    pub fn min_freq(&self) -> Option<u64> {
        self.buckets.keys().next().copied()
    }

    /// Returns the key `pop_min` would evict, without removing it.
    pub fn peek_min(&self) -> Option<(&K, u64)> {
        let (&freq, bucket) = self.buckets.iter().next()?;
        bucket.back().map(|key| (key, freq))
    }

    /// Starts tracking `key` at frequency 1; returns `false` if already tracked.
    pub fn insert(&mut self, key: K) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }
        let id = self.buckets.entry(1).or_default().push_front(key.clone());
        self.index.insert(key, (1, id));
        true
    }

    /// Increments the frequency of `key` and returns the new count.
    pub fn touch(&mut self, key: &K) -> Option<u64> {
        let (freq, id) = *self.index.get(key)?;
        let owned = self.detach(freq, id)?;
        let next = freq.saturating_add(1);
        let new_id = self.buckets.entry(next).or_default().push_front(owned);
        if let Some(slot) = self.index.get_mut(key) {
            *slot = (next, new_id);
        }
        Some(next)
    }

    /// Stops tracking `key`; returns its last frequency.
    pub fn remove(&mut self, key: &K) -> Option<u64> {
        let (freq, id) = self.index.remove(key)?;
        self.detach(freq, id)?;
        Some(freq)
    }

    /// Removes and returns the least frequently used key.
    ///
    /// Ties at the lowest frequency go to the key that reached it first.
    pub fn pop_min(&mut self) -> Option<(K, u64)> {
        let mut entry = self.buckets.first_entry()?;
        let freq = *entry.key();
        let key = entry.get_mut().pop_back()?;
        if entry.get().is_empty() {
            entry.remove();
        }
        self.index.remove(&key);
        Some((key, freq))
    }

    /// Iterates `(key, frequency)` from the lowest bucket upward, oldest first
    /// within a bucket.
    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.buckets.iter().flat_map(|(&freq, bucket)| {
            let keys: Vec<&K> = bucket.iter().collect();
            keys.into_iter().rev().map(move |key| (key, freq))
        })
    }

    pub fn clear(&mut self) {
        self.index.clear();
        self.buckets.clear();
    }

    fn detach(&mut self, freq: u64, id: SlotId) -> Option<K> {
        let bucket = self.buckets.get_mut(&freq)?;
        let key = bucket.remove(id)?;
        if bucket.is_empty() {
            self.buckets.remove(&freq);
        }
        Some(key)
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        let mut total = 0usize;
        for (freq, bucket) in &self.buckets {
            assert!(*freq >= 1);
            assert!(!bucket.is_empty(), "empty bucket left at freq {freq}");
            bucket.debug_validate_invariants();
            total += bucket.len();
        }
        assert_eq!(total, self.index.len());

        for (key, &(freq, id)) in &self.index {
            let bucket = self.buckets.get(&freq).expect("bucket missing");
            assert!(bucket.debug_value(id) == Some(key));
        }
    }
}

impl<K> Default for FrequencyBuckets<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
