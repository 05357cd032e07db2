//! Ordered key list with O(1) lookup, removal and repositioning by key.
//!
//! Pairs an [`IntrusiveList`] with a key → [`SlotId`] index. This is the
//! ordered container behind FIFO, LRU, MRU and ARC's resident lists: each of
//! those policies removes or moves keys by value, which would otherwise be a
//! linear scan of a `VecDeque`.
//!
//! ## Architecture
//!
//! ```text
//!   index: FxHashMap<K, SlotId>          list: IntrusiveList<K>
//!   ┌─────────┬─────────┐               front ─► [A] ◄──► [B] ◄──► [C] ◄── back
//!   │  key A  │  id_1   │
//!   │  key B  │  id_2   │
//!   │  key C  │  id_3   │
//!   └─────────┴─────────┘
//! ```
//!
//! Which end means "newest" is up to the owning policy; the list itself has
//! no recency semantics.
//!
//! `debug_validate_invariants()` is available in debug/test builds.
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::intrusive_list::{IntrusiveList, IntrusiveListIter};
use crate::ds::slot_arena::SlotId;

#[derive(Debug)]
pub struct KeyedList<K> {
    list: IntrusiveList<K>,
    index: FxHashMap<K, SlotId>,
}

impl<K> KeyedList<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            list: IntrusiveList::new(),
            index: FxHashMap::default(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            list: IntrusiveList::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    pub fn front(&self) -> Option<&K> {
        self.list.front()
    }

    pub fn back(&self) -> Option<&K> {
        self.list.back()
    }

    /// Inserts `key` at the front; returns `false` (and changes nothing) if present.
    pub fn push_front(&mut self, key: K) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }
        let id = self.list.push_front(key.clone());
        self.index.insert(key, id);
        true
    }

    /// Inserts `key` at the back; returns `false` (and changes nothing) if present.
    pub fn push_back(&mut self, key: K) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }
        let id = self.list.push_back(key.clone());
        self.index.insert(key, id);
        true
    }

    pub fn pop_front(&mut self) -> Option<K> {
        let key = self.list.pop_front()?;
        self.index.remove(&key);
        Some(key)
    }

    pub fn pop_back(&mut self) -> Option<K> {
        let key = self.list.pop_back()?;
        self.index.remove(&key);
        Some(key)
    }

    /// Removes `key`; returns `true` if it was present.
    pub fn remove(&mut self, key: &K) -> bool {
        match self.index.remove(key) {
            Some(id) => self.list.remove(id).is_some(),
            None => false,
        }
    }

    pub fn move_to_front(&mut self, key: &K) -> bool {
        match self.index.get(key) {
            Some(&id) => self.list.move_to_front(id),
            None => false,
        }
    }

    pub fn move_to_back(&mut self, key: &K) -> bool {
        match self.index.get(key) {
            Some(&id) => self.list.move_to_back(id),
            None => false,
        }
    }

    /// Iterates keys from front to back.
    pub fn iter(&self) -> IntrusiveListIter<'_, K> {
        self.list.iter()
    }

    pub fn clear(&mut self) {
        self.list.clear();
        self.index.clear();
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.list.debug_validate_invariants();
        assert_eq!(self.list.len(), self.index.len());
        for (key, &id) in &self.index {
            assert!(self.list.debug_value(id) == Some(key));
        }
    }
}

impl<K> Default for KeyedList<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
