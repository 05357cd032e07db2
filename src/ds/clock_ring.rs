//! Clock-sweep ring for second-chance eviction.
//!
//! Uses a fixed-size slot array and a hand pointer to evict the first
//! unreferenced entry encountered. Reference bits belong to *slots*: each
//! slot carries the bit of the key it currently holds, and the sweep only
//! ever inspects the slot under the hand.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                          ClockRing<K>                                │
//!   │                                                                      │
//!   │   slots: Vec<Option<Entry<K>>>                                       │
//!   │   hand ──────────────────────────────────────────────┐               │
//!   │                                                      │               │
//!   │   index: FxHashMap<K, usize> (key -> slot index)     │               │
//!   │   ┌─────────┬─────────┐                              ▼               │
//!   │   │  key A  │   0     │   slot[0] = Entry { ref:1 }  [A]             │
//!   │   │  key B  │   1     │   slot[1] = Entry { ref:0 }  [B]             │
//!   │   │  key C  │   2     │   slot[2] = Entry { ref:1 }  [C]             │
//!   │   └─────────┴─────────┘   slot[3] = None             [ ]             │
//!   │                                                                      │
//!   │   Eviction scan (hand moves forward):                                │
//!   │   [A ref=1] -> clear ref, advance                                    │
//!   │   [B ref=0] -> evict B, insert new entry here (ref=1)                │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Sweep Rules
//!
//! ```text
//!   insert(key)            (key not present)
//!     loop at slot[hand]:
//!       empty  → place key (ref=1), advance hand, done
//!       ref=0  → evict occupant, place key (ref=1), advance hand, done
//!       ref=1  → clear ref, advance hand, continue
//! ```
//!
//! New entries start referenced, so a ring whose every slot was touched since
//! the last sweep clears all bits on one full revolution and evicts the slot
//! the hand started at. The scan therefore terminates within `capacity + 1`
//! steps.
//!
//! ## Performance Characteristics
//!
//! | Operation  | Time        | Notes                                   |
//! |-----------|-------------|-----------------------------------------|
//! | `insert`  | O(1) amort. | Bounded scan with reference clearing     |
//! | `touch`   | O(1)        | Sets reference bit                       |
//! | `contains`| O(1)        | Index lookup                             |
//!
//! `debug_validate_invariants()` is available in debug/test builds.
use std::hash::Hash;

use rustc_hash::FxHashMap;

#[derive(Debug)]
struct Entry<K> {
    referenced: bool,
    key: K,
}

/// Work done by the most recent [`ClockRing::insert`] sweep.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepStats {
    /// Slots the hand moved past (including the final placement).
    pub hand_advances: usize,
    /// Reference bits cleared on the way.
    pub ref_bit_resets: usize,
}

#[derive(Debug)]
/// Fixed-size ring implementing the CLOCK (second-chance) eviction algorithm.
pub struct ClockRing<K> {
    slots: Vec<Option<Entry<K>>>,
    index: FxHashMap<K, usize>,
    hand: usize,
    len: usize,
    last_sweep: SweepStats,
}

impl<K> ClockRing<K>
where
    K: Eq + Hash + Clone,
{
    /// Creates a new ring with `capacity` slots.
    pub fn new(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            slots,
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            hand: 0,
            len: 0,
            last_sweep: SweepStats::default(),
        }
    }

    /// Returns the configured capacity (number of slots).
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the slot index the hand currently points at.
    pub fn hand(&self) -> usize {
        self.hand
    }

    /// Returns the cost of the last sweep that placed a new key.
    pub fn last_sweep(&self) -> SweepStats {
        self.last_sweep
    }

    /// Returns `true` if `key` is present.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the reference bit of the slot holding `key`.
    pub fn is_referenced(&self, key: &K) -> Option<bool> {
        let idx = *self.index.get(key)?;
        self.slots.get(idx)?.as_ref().map(|entry| entry.referenced)
    }

    /// Sets the reference bit for `key`; returns `false` if missing.
    pub fn touch(&mut self, key: &K) -> bool {
        let idx = match self.index.get(key) {
            Some(idx) => *idx,
            None => return false,
        };
        if let Some(entry) = self.slots.get_mut(idx).and_then(|slot| slot.as_mut()) {
            entry.referenced = true;
            return true;
        }
        false
    }

    /// Inserts `key` with its reference bit set.
    ///
    /// If `key` is already present this only sets its reference bit. If the
    /// sweep lands on an occupied, unreferenced slot, its key is evicted and
    /// returned.
    pub fn insert(&mut self, key: K) -> Option<K> {
        if self.capacity() == 0 {
            return None;
        }

        if self.touch(&key) {
            return None;
        }

        self.last_sweep = SweepStats::default();
        loop {
            let idx = self.hand;
            let referenced = self.slots[idx].as_ref().map(|entry| entry.referenced);
            match referenced {
                Some(true) => {
                    if let Some(entry) = self.slots[idx].as_mut() {
                        entry.referenced = false;
                    }
                    self.last_sweep.ref_bit_resets += 1;
                    self.advance_hand();
                },
                Some(false) => {
                    let evicted = self.slots[idx].replace(Entry {
                        referenced: true,
                        key: key.clone(),
                    });
                    self.index.insert(key, idx);
                    self.advance_hand();
                    return evicted.map(|old| {
                        self.index.remove(&old.key);
                        old.key
                    });
                },
                None => {
                    self.slots[idx] = Some(Entry {
                        referenced: true,
                        key: key.clone(),
                    });
                    self.index.insert(key, idx);
                    self.len += 1;
                    self.advance_hand();
                    return None;
                },
            }
        }
    }

    /// Iterates resident keys in slot order (slot 0 first).
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.slots
            .iter()
            .filter_map(|slot| slot.as_ref().map(|entry| &entry.key))
    }

    /// Empties every slot and resets the hand to slot 0.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.index.clear();
        self.hand = 0;
        self.len = 0;
        self.last_sweep = SweepStats::default();
    }

    #[cfg(any(test, debug_assertions))]
    /// Returns a debug snapshot of slot occupancy in ring order.
    pub fn debug_snapshot_slots(&self) -> Vec<Option<(&K, bool)>> {
        self.slots
            .iter()
            .map(|slot| slot.as_ref().map(|entry| (&entry.key, entry.referenced)))
            .collect()
    }

    fn advance_hand(&mut self) {
        self.last_sweep.hand_advances += 1;
        let cap = self.capacity();
        if cap == 0 {
            self.hand = 0;
        } else {
            self.hand = (self.hand + 1) % cap;
        }
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        let slot_count = self.slots.iter().filter(|slot| slot.is_some()).count();
        assert_eq!(self.len, slot_count);
        assert_eq!(self.len, self.index.len());

        if self.capacity() == 0 {
            assert_eq!(self.hand, 0);
        } else {
            assert!(self.hand < self.capacity());
        }

        for (key, &idx) in &self.index {
            assert!(idx < self.slots.len());
            let entry = self.slots[idx]
                .as_ref()
                .expect("index points to empty slot");
            assert!(&entry.key == key);
        }
    }
}
