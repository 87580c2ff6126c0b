//! Bounded per-key access history.
//!
//! An [`AccessRegister`] keeps the last `K` logical timestamps at which a key
//! was touched. It is a ring buffer that grows to K slots as accesses arrive;
//! recording into a full register overwrites the oldest timestamp, so the
//! register always holds a sliding window of the K most recent accesses.
//!
//! ## Architecture
//!
//! ```text
//!   AccessRegister (capacity = 3)
//!
//!   record(4), record(7), record(9), record(12)
//!
//!   Index:     0     1     2
//!            ┌─────┬─────┬─────┐
//!   slots:   │ 12  │  7  │  9  │        head = 1 (oldest), len = 3
//!            └─────┴─────┴─────┘
//!                    ▲
//!                    └── oldest() = 7   (backward K-distance numerator)
//!
//!   logical view (oldest first): [7, 9, 12]
//!   position(i) = slots[(head + i) % capacity]
//! ```
//!
//! ## Operations
//!
//! | Operation      | Description                              | Complexity |
//! |----------------|------------------------------------------|------------|
//! | `record`       | Append, dropping the oldest when full    | O(1)       |
//! | `oldest`       | Logical position 0                       | O(1)       |
//! | `most_recent`  | Logical position `len - 1`               | O(1)       |
//! | `iter`         | Oldest to newest                         | O(K)       |
//!
//! ## Example Usage
//!
//! ```
//! use lrukit::ds::AccessRegister;
//!
//! let mut register = AccessRegister::new(2);
//! register.record(1);
//! assert!(!register.is_full());
//!
//! register.record(5);
//! register.record(8);
//! assert!(register.is_full());
//! assert_eq!(register.oldest(), Some(5));
//! assert_eq!(register.to_vec(), vec![5, 8]);
//! ```
//!
//! ## Thread Safety
//!
//! Not synchronized; registers live inside cache entries and are protected by
//! the cache lock.

/// Slots reserved up front; storage grows past this only as accesses arrive.
const INITIAL_SLOTS: usize = 4;

/// Ring buffer of the last `capacity` access timestamps, oldest first.
///
/// Storage grows one slot per access until `capacity` is reached, so a large
/// K costs memory only for keys that are actually touched that often.
#[derive(Debug, Clone)]
pub struct AccessRegister {
    slots: Vec<u64>,
    capacity: usize,
    head: usize,
}

impl AccessRegister {
    /// Creates an empty register that retains up to `capacity` timestamps.
    ///
    /// A zero-capacity register ignores every `record`.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity.min(INITIAL_SLOTS)),
            capacity,
            head: 0,
        }
    }

    /// Maximum number of timestamps retained (the cache's K).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns `true` once K timestamps have been recorded.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.slots.len() == self.capacity
    }

    /// Appends `timestamp`, dropping the oldest one first when full.
    pub fn record(&mut self, timestamp: u64) {
        let cap = self.capacity;
        if cap == 0 {
            return;
        }
        if self.slots.len() < cap {
            // head stays 0 until the ring is full
            self.slots.push(timestamp);
        } else {
            self.slots[self.head] = timestamp;
            self.head = (self.head + 1) % cap;
        }
    }

    /// Timestamp at logical position `idx` (0 = oldest).
    pub fn get(&self, idx: usize) -> Option<u64> {
        if idx >= self.slots.len() {
            return None;
        }
        Some(self.slots[(self.head + idx) % self.slots.len()])
    }

    /// Oldest retained timestamp; the eviction heap orders by this.
    #[inline]
    pub fn oldest(&self) -> Option<u64> {
        self.get(0)
    }

    #[inline]
    pub fn most_recent(&self) -> Option<u64> {
        self.slots.len().checked_sub(1).and_then(|idx| self.get(idx))
    }

    /// Iterates timestamps from oldest to newest.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            register: self,
            front: 0,
            back: self.slots.len(),
        }
    }

    /// Collects the timestamps oldest first.
    pub fn to_vec(&self) -> Vec<u64> {
        self.iter().collect()
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert!(self.slots.len() <= self.capacity);
        if self.slots.len() < self.capacity {
            assert_eq!(self.head, 0);
        } else if self.capacity > 0 {
            assert!(self.head < self.capacity);
        }
    }
}

/// Iterator over an [`AccessRegister`], oldest first.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    register: &'a AccessRegister,
    front: usize,
    back: usize,
}

impl Iterator for Iter<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.front >= self.back {
            return None;
        }
        let value = self.register.get(self.front);
        self.front += 1;
        value
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<u64> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.register.get(self.back)
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a AccessRegister {
    type Item = u64;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_fills_then_slides() {
        let mut register = AccessRegister::new(3);
        register.record(1);
        register.record(2);
        assert_eq!(register.to_vec(), vec![1, 2]);
        assert!(!register.is_full());

        register.record(3);
        assert!(register.is_full());
        assert_eq!(register.oldest(), Some(1));

        register.record(4);
        assert_eq!(register.to_vec(), vec![2, 3, 4]);
        assert_eq!(register.oldest(), Some(2));
        assert_eq!(register.most_recent(), Some(4));
        assert_eq!(register.len(), 3);
    }

    #[test]
    fn register_empty_has_no_oldest() {
        let register = AccessRegister::new(2);
        assert!(register.is_empty());
        assert_eq!(register.oldest(), None);
        assert_eq!(register.most_recent(), None);
        assert_eq!(register.iter().count(), 0);
    }

    #[test]
    fn register_capacity_one_keeps_latest() {
        let mut register = AccessRegister::new(1);
        register.record(10);
        assert!(register.is_full());
        register.record(20);
        assert_eq!(register.to_vec(), vec![20]);
        assert_eq!(register.oldest(), Some(20));
    }

    #[test]
    fn register_zero_capacity_ignores_records() {
        let mut register = AccessRegister::new(0);
        register.record(1);
        assert!(register.is_empty());
        assert!(register.is_full());
        register.debug_validate_invariants();
    }

    #[test]
    fn register_huge_capacity_allocates_per_access() {
        let mut register = AccessRegister::new(usize::MAX / 2);
        assert_eq!(register.capacity(), usize::MAX / 2);
        register.record(3);
        register.record(5);
        assert!(!register.is_full());
        assert_eq!(register.to_vec(), vec![3, 5]);
        register.debug_validate_invariants();
    }

    #[test]
    fn register_zero_timestamp_is_a_real_value() {
        let mut register = AccessRegister::new(2);
        register.record(0);
        assert_eq!(register.oldest(), Some(0));
    }

    #[test]
    fn iter_is_double_ended_and_exact() {
        let mut register = AccessRegister::new(4);
        for t in 1..=6 {
            register.record(t);
        }
        let mut iter = register.iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some(3));
        assert_eq!(iter.next_back(), Some(6));
        assert_eq!(iter.len(), 2);
        let rest: Vec<_> = iter.collect();
        assert_eq!(rest, vec![4, 5]);

        let newest_first: Vec<_> = register.iter().rev().collect();
        assert_eq!(newest_first, vec![6, 5, 4, 3]);
    }

    #[test]
    fn ref_into_iter_for_loop() {
        let mut register = AccessRegister::new(2);
        register.record(7);
        register.record(9);
        let mut sum = 0;
        for t in &register {
            sum += t;
        }
        assert_eq!(sum, 16);
    }
}
