//! Arena-backed doubly linked list.
//!
//! Nodes live in a [`SlotArena`] and point at each other by [`SlotId`], so a
//! caller that keeps the id returned by a push can later unlink or move that
//! node in O(1). [`KeyedList`](crate::ds::KeyedList) and
//! [`FrequencyBuckets`](crate::ds::FrequencyBuckets) keep those ids in their
//! key indexes.
//!
//! ```text
//!   front                                            back
//!   head ─► [id_4] ◄──► [id_1] ◄──► [id_7] ◄── tail
//!
//!   push_front / pop_front        push_back / pop_back
//!   move_to_front(id)             move_to_back(id)
//!   remove(id)
//! ```
//!
//! Every operation except `iter` and `clear` is O(1).
use crate::ds::slot_arena::{SlotArena, SlotId};

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Doubly linked list addressed by stable [`SlotId`]s.
#[derive(Debug)]
pub struct IntrusiveList<T> {
    arena: SlotArena<Node<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<T> IntrusiveList<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|id| self.value(id))
    }

    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|id| self.value(id))
    }

    /// Iterates values from front to back.
    pub fn iter(&self) -> IntrusiveListIter<'_, T> {
        IntrusiveListIter {
            list: self,
            cursor: self.head,
        }
    }

    /// Links `value` at the front; the returned id stays valid until removal.
    pub fn push_front(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            prev: None,
            next: None,
        });
        self.link_front(id);
        id
    }

    /// Links `value` at the back; the returned id stays valid until removal.
    pub fn push_back(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            prev: None,
            next: None,
        });
        self.link_back(id);
        id
    }

    pub fn pop_front(&mut self) -> Option<T> {
        self.head.and_then(|id| self.remove(id))
    }

    pub fn pop_back(&mut self) -> Option<T> {
        self.tail.and_then(|id| self.remove(id))
    }

    /// Unlinks `id` and returns its value; `None` for a stale id.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        if !self.unlink(id) {
            return None;
        }
        self.arena.remove(id).map(|node| node.value)
    }

    /// Returns `false` for a stale id.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if self.head == Some(id) {
            return true;
        }
        if !self.unlink(id) {
            return false;
        }
        self.link_front(id);
        true
    }

    /// Returns `false` for a stale id.
    pub fn move_to_back(&mut self, id: SlotId) -> bool {
        if self.tail == Some(id) {
            return true;
        }
        if !self.unlink(id) {
            return false;
        }
        self.link_back(id);
        true
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    fn value(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    /// Splices `id` out of the chain, leaving it allocated with no links.
    fn unlink(&mut self, id: SlotId) -> bool {
        let Some(node) = self.arena.get_mut(id) else {
            return false;
        };
        let (prev, next) = (node.prev.take(), node.next.take());

        match prev.and_then(|p| self.arena.get_mut(p)) {
            Some(prev_node) => prev_node.next = next,
            None => self.head = next,
        }
        match next.and_then(|n| self.arena.get_mut(n)) {
            Some(next_node) => next_node.prev = prev,
            None => self.tail = prev,
        }
        true
    }

    /// Links an allocated, unlinked node at the head.
    fn link_front(&mut self, id: SlotId) {
        let old_head = self.head.replace(id);
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = old_head;
        }
        match old_head.and_then(|h| self.arena.get_mut(h)) {
            Some(head_node) => head_node.prev = Some(id),
            None => self.tail = Some(id),
        }
    }

    /// Links an allocated, unlinked node at the tail.
    fn link_back(&mut self, id: SlotId) {
        let old_tail = self.tail.replace(id);
        if let Some(node) = self.arena.get_mut(id) {
            node.next = None;
            node.prev = old_tail;
        }
        match old_tail.and_then(|t| self.arena.get_mut(t)) {
            Some(tail_node) => tail_node.next = Some(id),
            None => self.head = Some(id),
        }
    }

    /// Value stored at `id`, for index cross-checks in invariant validation.
    #[cfg(any(test, debug_assertions))]
    pub(crate) fn debug_value(&self, id: SlotId) -> Option<&T> {
        self.value(id)
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        let mut walked = 0usize;
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let node = self.arena.get(id).expect("linked id not in arena");
            assert_eq!(node.prev, prev, "broken back link");
            prev = Some(id);
            cursor = node.next;
            walked += 1;
            assert!(walked <= self.len(), "cycle in list");
        }
        assert_eq!(self.tail, prev, "tail is not the last node");
        assert_eq!(walked, self.len(), "unlinked nodes left in arena");
    }
}

pub struct IntrusiveListIter<'a, T> {
    list: &'a IntrusiveList<T>,
    cursor: Option<SlotId>,
}

impl<'a, T> Iterator for IntrusiveListIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.arena.get(self.cursor?)?;
        self.cursor = node.next;
        Some(&node.value)
    }
}

impl<T> Default for IntrusiveList<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values<T: Copy>(list: &IntrusiveList<T>) -> Vec<T> {
        list.iter().copied().collect()
    }

    #[test]
    fn pushes_and_pops_at_both_ends() {
        let mut list = IntrusiveList::new();
        list.push_back(2);
        list.push_front(1);
        list.push_back(3);
        assert_eq!(values(&list), vec![1, 2, 3]);
        assert_eq!(list.front(), Some(&1));
        assert_eq!(list.back(), Some(&3));

        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.pop_back(), Some(3));
        assert_eq!(list.pop_back(), Some(2));
        assert_eq!(list.pop_front(), None);
        assert!(list.is_empty());
        list.debug_validate_invariants();
    }

    #[test]
    fn moves_keep_links_consistent() {
        let mut list = IntrusiveList::new();
        let a = list.push_back('a');
        list.push_back('b');
        let c = list.push_back('c');

        assert!(list.move_to_back(a));
        assert_eq!(values(&list), vec!['b', 'c', 'a']);
        assert!(list.move_to_front(c));
        assert_eq!(values(&list), vec!['c', 'b', 'a']);
        // already in place
        assert!(list.move_to_front(c));
        assert!(list.move_to_back(a));
        assert_eq!(values(&list), vec!['c', 'b', 'a']);
        list.debug_validate_invariants();
    }

    #[test]
    fn remove_from_middle_and_ends() {
        let mut list = IntrusiveList::new();
        let ids: Vec<_> = (0..4).map(|v| list.push_back(v)).collect();

        assert_eq!(list.remove(ids[1]), Some(1));
        assert_eq!(values(&list), vec![0, 2, 3]);
        assert_eq!(list.remove(ids[0]), Some(0));
        assert_eq!(list.remove(ids[3]), Some(3));
        assert_eq!(list.front(), Some(&2));
        assert_eq!(list.back(), Some(&2));
        list.debug_validate_invariants();
    }

    #[test]
    fn stale_ids_are_rejected() {
        let mut list = IntrusiveList::new();
        let a = list.push_back(1);
        assert_eq!(list.remove(a), Some(1));
        assert_eq!(list.remove(a), None);
        assert!(!list.move_to_front(a));
        assert!(!list.move_to_back(a));
        assert_eq!(list.debug_value(a), None);
        list.debug_validate_invariants();
    }

    #[test]
    fn clear_allows_reuse() {
        let mut list = IntrusiveList::with_capacity(4);
        list.push_back(1);
        list.push_back(2);
        list.clear();
        assert_eq!(list.len(), 0);
        let id = list.push_front(9);
        assert_eq!(list.debug_value(id), Some(&9));
        assert_eq!(values(&list), vec![9]);
        list.debug_validate_invariants();
    }
}
