//! Recency-ordered list of cold entries.
//!
//! A doubly linked list whose nodes live in a [`SlotArena`] and link to each
//! other by [`SlotId`]. The head is the most recently touched value and the
//! tail the least recently touched one, which is the eviction victim.
//!
//! ## Architecture
//!
//! ```text
//!   nodes (SlotArena<Node<T>>)
//!   ┌────────┬─────────────────────────────────────────────┐
//!   │ SlotId │ Node { value, prev, next }                  │
//!   ├────────┼─────────────────────────────────────────────┤
//!   │ h_0    │ { value: e7, prev: None,     next: h_2 }    │
//!   │ h_1    │ { value: e2, prev: h_2,      next: None }   │
//!   │ h_2    │ { value: e5, prev: h_0,      next: h_1 }    │
//!   └────────┴─────────────────────────────────────────────┘
//!
//!   head (most recent) ─► [h_0] ◄──► [h_2] ◄──► [h_1] ◄── tail (victim)
//! ```
//!
//! In the cache, `T` is the entry's own `SlotId` and the handle returned by
//! [`push_most_recent`](RecencyList::push_most_recent) is stored in the entry.
//!
//! ## Performance
//! - `push_most_recent` / `move_to_most_recent` / `remove`: O(1)
//! - `evict_victim` / `peek_victim`: O(1)
//! - `iter`: O(n)

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::CacheError;

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Doubly linked recency list addressed by stable [`SlotId`] handles.
#[derive(Debug, Clone)]
pub struct RecencyList<T> {
    nodes: SlotArena<Node<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<T> RecencyList<T> {
    pub fn new() -> Self {
        Self {
            nodes: SlotArena::new(),
            head: None,
            tail: None,
        }
    }

    /// Creates an empty list with reserved node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns `true` if `handle` is currently linked into this list.
    pub fn contains(&self, handle: SlotId) -> bool {
        self.nodes.contains(handle)
    }

    pub fn get(&self, handle: SlotId) -> Option<&T> {
        self.nodes.get(handle).map(|node| &node.value)
    }

    /// Value at the head (most recently touched).
    pub fn most_recent(&self) -> Option<&T> {
        self.head.and_then(|id| self.get(id))
    }

    /// Value at the tail: what [`evict_victim`](Self::evict_victim) would return.
    pub fn peek_victim(&self) -> Option<&T> {
        self.tail.and_then(|id| self.get(id))
    }

    /// Links a new node at the head and returns its handle.
    pub fn push_most_recent(&mut self, value: T) -> SlotId {
        let id = self.nodes.insert(Node {
            value,
            prev: None,
            next: None,
        });
        self.attach_front(id);
        id
    }

    /// Moves an existing node to the head; returns `false` if `handle` is
    /// not in the list.
    pub fn move_to_most_recent(&mut self, handle: SlotId) -> bool {
        if !self.nodes.contains(handle) {
            return false;
        }
        if self.head == Some(handle) {
            return true;
        }
        self.detach(handle);
        self.attach_front(handle);
        true
    }

    /// Unlinks the node and frees its slot, returning the value.
    pub fn remove(&mut self, handle: SlotId) -> Option<T> {
        self.detach(handle)?;
        self.nodes.remove(handle).map(|node| node.value)
    }

    /// Removes and returns the least recently touched value.
    pub fn evict_victim(&mut self) -> Result<T, CacheError> {
        let tail = self.tail.ok_or(CacheError::EmptyList)?;
        self.remove(tail).ok_or(CacheError::InvalidEntry)
    }

    /// Iterates values from most to least recently touched.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.head,
        }
    }

    fn detach(&mut self, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let node = self.nodes.get(id)?;
            (node.prev, node.next)
        };

        match prev.and_then(|p| self.nodes.get_mut(p)) {
            Some(prev_node) => prev_node.next = next,
            None => self.head = next,
        }
        match next.and_then(|n| self.nodes.get_mut(n)) {
            Some(next_node) => next_node.prev = prev,
            None => self.tail = prev,
        }

        let node = self.nodes.get_mut(id)?;
        node.prev = None;
        node.next = None;
        Some(())
    }

    fn attach_front(&mut self, id: SlotId) {
        let old_head = self.head;
        if let Some(node) = self.nodes.get_mut(id) {
            node.prev = None;
            node.next = old_head;
        } else {
            return;
        }
        match old_head.and_then(|h| self.nodes.get_mut(h)) {
            Some(head_node) => head_node.prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if self.head.is_none() || self.tail.is_none() {
            assert!(self.head.is_none());
            assert!(self.tail.is_none());
            assert_eq!(self.len(), 0);
            return;
        }

        let mut count = 0usize;
        let mut current = self.head;
        let mut prev = None;
        while let Some(id) = current {
            let node = self.nodes.get(id).expect("linked node missing from arena");
            assert_eq!(node.prev, prev);
            if node.next.is_none() {
                assert_eq!(self.tail, Some(id));
            }
            prev = Some(id);
            current = node.next;
            count += 1;
            assert!(count <= self.len(), "cycle in recency list");
        }
        assert_eq!(count, self.len());
    }
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a [`RecencyList`], most recent first.
pub struct Iter<'a, T> {
    list: &'a RecencyList<T>,
    current: Option<SlotId>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.nodes.get(id)?;
        self.current = node.next;
        Some(&node.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents(list: &RecencyList<&'static str>) -> Vec<&'static str> {
        list.iter().copied().collect()
    }

    #[test]
    fn push_orders_most_recent_first() {
        let mut list = RecencyList::new();
        list.push_most_recent("a");
        list.push_most_recent("b");
        list.push_most_recent("c");

        assert_eq!(contents(&list), vec!["c", "b", "a"]);
        assert_eq!(list.most_recent(), Some(&"c"));
        assert_eq!(list.peek_victim(), Some(&"a"));
        list.debug_validate_invariants();
    }

    #[test]
    fn move_to_most_recent_reorders() {
        let mut list = RecencyList::new();
        let a = list.push_most_recent("a");
        let b = list.push_most_recent("b");
        list.push_most_recent("c");

        assert!(list.move_to_most_recent(a));
        assert_eq!(contents(&list), vec!["a", "c", "b"]);

        assert!(list.move_to_most_recent(a));
        assert_eq!(contents(&list), vec!["a", "c", "b"]);

        assert!(list.move_to_most_recent(b));
        assert_eq!(contents(&list), vec!["b", "a", "c"]);
        list.debug_validate_invariants();
    }

    #[test]
    fn remove_middle_and_ends() {
        let mut list = RecencyList::new();
        let a = list.push_most_recent("a");
        let b = list.push_most_recent("b");
        let c = list.push_most_recent("c");

        assert_eq!(list.remove(b), Some("b"));
        assert_eq!(contents(&list), vec!["c", "a"]);
        assert_eq!(list.remove(b), None);

        assert_eq!(list.remove(c), Some("c"));
        assert_eq!(list.most_recent(), Some(&"a"));
        assert_eq!(list.peek_victim(), Some(&"a"));

        assert_eq!(list.remove(a), Some("a"));
        assert!(list.is_empty());
        assert!(!list.move_to_most_recent(a));
        list.debug_validate_invariants();
    }

    #[test]
    fn evict_victim_pops_tail() {
        let mut list = RecencyList::new();
        list.push_most_recent(1);
        let two = list.push_most_recent(2);
        list.push_most_recent(3);
        list.move_to_most_recent(two);

        assert_eq!(list.evict_victim(), Ok(1));
        assert_eq!(list.evict_victim(), Ok(3));
        assert_eq!(list.evict_victim(), Ok(2));
        assert_eq!(list.evict_victim(), Err(CacheError::EmptyList));
    }

    #[test]
    fn handles_are_reused_after_remove() {
        let mut list = RecencyList::with_capacity(2);
        let a = list.push_most_recent('a');
        list.remove(a);
        let b = list.push_most_recent('b');
        assert_eq!(a, b);
        assert!(list.contains(b));
        assert_eq!(list.get(b), Some(&'b'));
    }
}
