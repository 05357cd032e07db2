//! Bounded recency list for ghost entries.
//!
//! Used by ARC to track recently evicted keys without storing values.
//! Implemented as a [`KeyedList`](crate::ds::KeyedList) with a capacity.
//!
//! ## Architecture
//!
//! ```text
//!   index: FxHashMap<K, SlotId>          list: IntrusiveList<K>
//!   ┌─────────┬─────────┐              head ─► [A] ◄──► [B] ◄──► [C] ◄── tail
//!   │  key A  │  id_1   │                newest                    oldest
//!   │  key B  │  id_2   │
//!   └─────────┴─────────┘
//! ```
//!
//! ## Behavior
//! - `record(k)`: moves key to the head, drops the oldest if at capacity
//! - `pop_oldest()`: drops the tail; used when ghosts share a budget
//! - `clear()`: resets both list and index
//!
//! ## Performance
//! - `record` / `contains` / `pop_oldest`: O(1) average
//!
//! `debug_validate_invariants()` is available in debug/test builds.
use std::hash::Hash;

use crate::ds::keyed_list::KeyedList;

#[derive(Debug)]
/// Bounded recency list of keys (no values), typically for ARC-style ghost tracking.
pub struct GhostList<K> {
    list: KeyedList<K>,
    capacity: usize,
}

impl<K> GhostList<K>
where
    K: Eq + Hash + Clone,
{
    /// Creates a new ghost list with a maximum of `capacity` keys.
    pub fn new(capacity: usize) -> Self {
        Self {
            list: KeyedList::with_capacity(capacity),
            capacity,
        }
    }

    /// Returns the configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of keys currently tracked.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if there are no keys tracked.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns `true` if `key` is present.
    pub fn contains(&self, key: &K) -> bool {
        self.list.contains(key)
    }

    /// Records `key` as most-recently-seen, dropping the oldest if needed.
    ///
    /// Returns the dropped key, if any.
    pub fn record(&mut self, key: K) -> Option<K> {
        if self.capacity == 0 {
            return None;
        }

        if self.list.move_to_front(&key) {
            return None;
        }

        let dropped = if self.list.len() >= self.capacity {
            self.list.pop_back()
        } else {
            None
        };

        self.list.push_front(key);
        dropped
    }

    /// Drops and returns the oldest ghost.
    pub fn pop_oldest(&mut self) -> Option<K> {
        self.list.pop_back()
    }

    /// Iterates ghosts from newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.list.iter()
    }

    /// Clears all tracked keys.
    pub fn clear(&mut self) {
        self.list.clear();
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.list.debug_validate_invariants();
        assert!(self.list.len() <= self.capacity);
        if self.capacity == 0 {
            assert!(self.list.is_empty());
        }
    }
}
