//! Indexed binary min-heap of hot entries.
//!
//! The heap stores entry handles ([`SlotId`]) in a `Vec` laid out as an
//! implicit binary tree. It does not own the priorities: the key of each
//! handle is read through [`HeapSlots`], and every time a handle lands at a
//! new position the heap reports that position back through the same trait.
//! The owner therefore always knows where each of its entries sits, which is
//! what makes [`fix`](EvictionHeap::fix) O(log n) without a search.
//!
//! ## Architecture
//!
//! ```text
//!   items: [ e3 | e1 | e4 | e9 ]          slots (owned elsewhere)
//!            0    1    2    3             ┌────┬──────────┬──────────┐
//!                                         │ id │ heap_key │ position │
//!                e3 (key 2)               ├────┼──────────┼──────────┤
//!               /        \                │ e1 │    5     │    1     │
//!          e1 (5)        e4 (7)           │ e3 │    2     │    0     │
//!          /                              │ e4 │    7     │    2     │
//!      e9 (8)                             │ e9 │    8     │    3     │
//!                                         └────┴──────────┴──────────┘
//! ```
//!
//! ## Operations
//!
//! | Operation | Description                                  | Complexity |
//! |-----------|----------------------------------------------|------------|
//! | `push`    | Append and sift up                           | O(log n)   |
//! | `fix`     | Restore order after a key changed in place   | O(log n)   |
//! | `pop_min` | Remove the smallest key                      | O(log n)   |
//! | `peek_min`| Smallest key without removing                | O(1)       |
//!
//! Ties between equal keys are resolved by tree shape only. Under a strictly
//! increasing clock two hot entries never share an oldest timestamp.

use crate::ds::slot_arena::SlotId;
use crate::error::CacheError;

/// Owner-side view of the heap's elements.
///
/// Implemented by whatever stores the entries the heap refers to.
pub trait HeapSlots {
    /// Ordering key of `id`; smaller keys are popped first.
    fn heap_key(&self, id: SlotId) -> u64;

    /// Records that `id` now lives at `position` in the heap array.
    fn set_heap_position(&mut self, id: SlotId, position: usize);
}

/// Binary min-heap of [`SlotId`]s with externally tracked positions.
#[derive(Debug, Clone, Default)]
pub struct EvictionHeap {
    items: Vec<SlotId>,
}

impl EvictionHeap {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Handle at `position`, if any.
    pub fn get(&self, position: usize) -> Option<SlotId> {
        self.items.get(position).copied()
    }

    /// Handle with the smallest key.
    pub fn peek_min(&self) -> Option<SlotId> {
        self.items.first().copied()
    }

    /// Inserts `id` and records its final position in `slots`.
    pub fn push<S: HeapSlots + ?Sized>(&mut self, id: SlotId, slots: &mut S) {
        let position = self.items.len();
        self.items.push(id);
        slots.set_heap_position(id, position);
        self.sift_up(position, slots);
    }

    /// Re-establishes heap order after the key of the handle at `position`
    /// changed.
    pub fn fix<S: HeapSlots + ?Sized>(
        &mut self,
        position: usize,
        slots: &mut S,
    ) -> Result<(), CacheError> {
        if position >= self.items.len() {
            return Err(CacheError::InvalidEntry);
        }
        if !self.sift_down(position, slots) {
            self.sift_up(position, slots);
        }
        Ok(())
    }

    /// Removes and returns the handle with the smallest key.
    pub fn pop_min<S: HeapSlots + ?Sized>(&mut self, slots: &mut S) -> Result<SlotId, CacheError> {
        let last = self.items.len().checked_sub(1).ok_or(CacheError::EmptyHeap)?;
        self.swap(0, last, slots);
        let min = self.items.pop().ok_or(CacheError::EmptyHeap)?;
        if !self.items.is_empty() {
            self.sift_down(0, slots);
        }
        Ok(min)
    }

    /// Iterates handles in array order (not sorted).
    pub fn iter(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.items.iter().copied()
    }

    fn less<S: HeapSlots + ?Sized>(&self, a: usize, b: usize, slots: &S) -> bool {
        slots.heap_key(self.items[a]) < slots.heap_key(self.items[b])
    }

    fn swap<S: HeapSlots + ?Sized>(&mut self, a: usize, b: usize, slots: &mut S) {
        self.items.swap(a, b);
        slots.set_heap_position(self.items[a], a);
        slots.set_heap_position(self.items[b], b);
    }

    fn sift_up<S: HeapSlots + ?Sized>(&mut self, mut position: usize, slots: &mut S) {
        while position > 0 {
            let parent = (position - 1) / 2;
            if !self.less(position, parent, slots) {
                break;
            }
            self.swap(position, parent, slots);
            position = parent;
        }
    }

    /// Returns `true` if the element moved.
    fn sift_down<S: HeapSlots + ?Sized>(&mut self, start: usize, slots: &mut S) -> bool {
        let len = self.items.len();
        let mut position = start;
        loop {
            let left = 2 * position + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let smallest = if right < len && self.less(right, left, slots) {
                right
            } else {
                left
            };
            if !self.less(smallest, position, slots) {
                break;
            }
            self.swap(position, smallest, slots);
            position = smallest;
        }
        position > start
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants<S: HeapSlots + ?Sized>(&self, slots: &S) {
        for child in 1..self.items.len() {
            let parent = (child - 1) / 2;
            assert!(
                slots.heap_key(self.items[parent]) <= slots.heap_key(self.items[child]),
                "heap order violated between positions {parent} and {child}"
            );
        }
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::ds::slot_arena::SlotArena;
    use proptest::prelude::*;

    struct Keyed {
        key: u64,
        position: usize,
    }

    impl HeapSlots for SlotArena<Keyed> {
        fn heap_key(&self, id: SlotId) -> u64 {
            self.get(id).map_or(u64::MAX, |k| k.key)
        }

        fn set_heap_position(&mut self, id: SlotId, position: usize) {
            if let Some(k) = self.get_mut(id) {
                k.position = position;
            }
        }
    }

    proptest! {
        /// Property: after arbitrary pushes and in-place key bumps, pops come
        /// out sorted and every recorded position matches the array
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_fix_keeps_heap_sorted(
            keys in prop::collection::vec(0u64..1000, 1..64),
            bumps in prop::collection::vec((any::<usize>(), 0u64..1000), 0..64)
        ) {
            let mut arena = SlotArena::new();
            let mut heap = EvictionHeap::new();
            let mut ids = Vec::new();
            for key in keys {
                let id = arena.insert(Keyed { key, position: 0 });
                heap.push(id, &mut arena);
                ids.push(id);
            }

            for (which, new_key) in bumps {
                let id = ids[which % ids.len()];
                arena.get_mut(id).unwrap().key = new_key;
                let pos = arena.get(id).unwrap().position;
                prop_assert_eq!(heap.get(pos), Some(id));
                heap.fix(pos, &mut arena).unwrap();
                heap.debug_validate_invariants(&arena);
            }

            let mut last = 0u64;
            while let Ok(id) = heap.pop_min(&mut arena) {
                let key = arena.get(id).unwrap().key;
                prop_assert!(key >= last);
                last = key;
                for (pos, live) in heap.iter().enumerate() {
                    prop_assert_eq!(arena.get(live).unwrap().position, pos);
                }
            }
        }
    }
}
