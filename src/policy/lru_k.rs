//! # LRU-K Store
//!
//! A key/value store of `i64` keys and values that evicts by backward
//! K-distance: the victim is the entry whose K-th most recent access lies
//! furthest in the past. Entries that have not yet been accessed K times are
//! treated as having an infinite K-distance and are always evicted first.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────────┐
//!   │                         LrukCache (Arc<Mutex<_>>)                        │
//!   │  ┌────────────────────────────────────────────────────────────────────┐  │
//!   │  │                            LrukCore                                │  │
//!   │  │                                                                    │  │
//!   │  │  index: FxHashMap<i64, SlotId>       clock: u64 (starts at 0)      │  │
//!   │  │                                                                    │  │
//!   │  │  entries: SlotArena<Entry>                                         │  │
//!   │  │  ┌────────┬─────┬───────┬──────────────┬───────────────────────┐   │  │
//!   │  │  │ SlotId │ key │ value │ register     │ location              │   │  │
//!   │  │  ├────────┼─────┼───────┼──────────────┼───────────────────────┤   │  │
//!   │  │  │ e0     │  1  │  10   │ [4, 5]       │ Hot(0)                │   │  │
//!   │  │  │ e1     │  2  │  20   │ [2]          │ Cold(h1)              │   │  │
//!   │  │  │ e2     │  3  │  30   │ [3]          │ Cold(h0)              │   │  │
//!   │  │  └────────┴─────┴───────┴──────────────┴───────────────────────┘   │  │
//!   │  │                                                                    │  │
//!   │  │  cold: RecencyList<SlotId>        hot: EvictionHeap                │  │
//!   │  │  head ─► [e2] ◄──► [e1] ◄─ tail   [e0]  keyed by register[0]       │  │
//!   │  │          (< K accesses)           (K accesses)                     │  │
//!   │  └────────────────────────────────────────────────────────────────────┘  │
//!   └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Tier Transitions
//!
//! ```text
//!   new key ──► Cold (head of recency list)
//!
//!   after every recorded access:
//!     Cold and register.len() <  K  ──► move to head of recency list
//!     Cold and register.len() == K  ──► unlink from list, push into heap  (Hot)
//!     Hot                           ──► heap.fix(position)
//!
//!   Hot never goes back to Cold.
//! ```
//!
//! ## Eviction
//!
//! ```text
//!   set(new key) on a full store:
//!     recency list non-empty  ──► evict its tail (least recently touched cold entry)
//!     otherwise               ──► pop heap minimum (oldest K-th most recent access)
//! ```
//!
//! ## Operations
//!
//! | Method              | Complexity | Description                                |
//! |---------------------|------------|--------------------------------------------|
//! | `get(key)`          | O(log n)   | Read, record access, maybe promote         |
//! | `set(key, value)`   | O(log n)   | Write, maybe evict, record access          |
//! | `peek(key)`         | O(1)       | Read without recording an access           |
//! | `peek_victim()`     | O(1)       | Key the next eviction would remove         |
//! | `access_history()`  | O(K)       | Retained timestamps, oldest first          |
//! | `k_distance()`      | O(1)       | Oldest retained timestamp of a hot entry   |
//! | `check_invariants()`| O(n)       | Structural self-check                      |
//!
//! `O(log n)` comes from the heap; cold-tier work is O(1).
//!
//! ## Thread Safety
//!
//! [`LrukCore`] is a plain `&mut self` structure. [`LrukCache`] wraps it in a
//! single `parking_lot::Mutex`; every call holds the lock for its whole
//! duration, so concurrent callers observe some sequential order of calls.
//!
//! ## Example Usage
//!
//! ```
//! use lrukit::policy::lru_k::LrukCache;
//!
//! let cache = LrukCache::new(3, 2);
//! cache.set(1, 10).unwrap();
//! cache.set(2, 20).unwrap();
//! cache.set(3, 30).unwrap();
//!
//! // Two reads make key 1 hot.
//! cache.get(1).unwrap();
//! cache.get(1).unwrap();
//!
//! // The least recently touched cold key goes first.
//! cache.set(4, 40).unwrap();
//! assert!(!cache.contains(2));
//! assert!(cache.contains(1));
//! ```

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tracing::{debug, error, trace, warn};

use crate::ds::{AccessRegister, EvictionHeap, HeapSlots, RecencyList, SlotArena, SlotId};
use crate::error::{CacheError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::{LrukMetrics, LrukMetricsSnapshot};
use crate::traits::KeyValueCache;

/// Which tier currently owns an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Fewer than K recorded accesses; lives in the recency list.
    Cold,
    /// K recorded accesses; lives in the eviction heap.
    Hot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Location {
    /// Handle of the node in the recency list.
    Cold(SlotId),
    /// Current index in the heap array.
    Hot(usize),
}

impl Location {
    fn tier(self) -> Tier {
        match self {
            Location::Cold(_) => Tier::Cold,
            Location::Hot(_) => Tier::Hot,
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    key: i64,
    value: i64,
    register: AccessRegister,
    location: Location,
}

impl HeapSlots for SlotArena<Entry> {
    fn heap_key(&self, id: SlotId) -> u64 {
        self.get(id)
            .and_then(|entry| entry.register.oldest())
            .unwrap_or(u64::MAX)
    }

    fn set_heap_position(&mut self, id: SlotId, position: usize) {
        if let Some(entry) = self.get_mut(id) {
            entry.location = Location::Hot(position);
        }
    }
}

/// Upper bound on slots reserved by [`LrukCore::new`]; larger stores grow on
/// demand.
const PREALLOC_LIMIT: usize = 4096;

fn defect(err: CacheError) -> CacheError {
    error!(error = %err, "lru-k invariant violated");
    err
}

/// Unsynchronized LRU-K store.
///
/// Holds the key index, the entry arena, both tiers and the logical clock.
/// Use [`LrukCache`] to share one store between threads.
///
/// # Example
///
/// ```
/// use lrukit::policy::lru_k::{LrukCore, Tier};
///
/// let mut core = LrukCore::new(2, 1);
/// core.set(1, 10).unwrap();
///
/// // With K = 1 the first access already completes the register.
/// assert_eq!(core.tier(1), Some(Tier::Hot));
/// assert_eq!(core.clock(), 1);
/// ```
pub struct LrukCore {
    capacity: usize,
    k: usize,
    clock: u64,
    index: FxHashMap<i64, SlotId>,
    entries: SlotArena<Entry>,
    cold: RecencyList<SlotId>,
    hot: EvictionHeap,
    #[cfg(feature = "metrics")]
    metrics: LrukMetrics,
}

impl LrukCore {
    /// Creates a store holding up to `capacity` keys and tracking the last `k`
    /// accesses per key.
    ///
    /// Zero values are accepted here and rejected with
    /// [`CacheError::NotInitialized`] by every later operation. Any positive
    /// values are accepted; memory is reserved for at most a few thousand
    /// entries up front and grows with use.
    pub fn new(capacity: usize, k: usize) -> Self {
        let reserve = capacity.min(PREALLOC_LIMIT);
        LrukCore {
            capacity,
            k,
            clock: 0,
            index: FxHashMap::with_capacity_and_hasher(reserve, Default::default()),
            entries: SlotArena::with_capacity(reserve),
            cold: RecencyList::with_capacity(reserve),
            hot: EvictionHeap::with_capacity(reserve),
            #[cfg(feature = "metrics")]
            metrics: LrukMetrics::default(),
        }
    }

    /// Returns the value for `key` and records an access.
    pub fn get(&mut self, key: i64) -> Result<i64, CacheError> {
        self.validate()?;

        let Some(&id) = self.index.get(&key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return Err(CacheError::KeyNotFound(key));
        };

        self.record_access(id)?;

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.entries
            .get(id)
            .map(|entry| entry.value)
            .ok_or_else(|| defect(CacheError::InvalidEntry))
    }

    /// Stores `value` under `key`, evicting one entry first if a new key
    /// arrives at a full store. Returns `key`.
    pub fn set(&mut self, key: i64, value: i64) -> Result<i64, CacheError> {
        self.validate()?;

        if let Some(&id) = self.index.get(&key) {
            let entry = self
                .entries
                .get_mut(id)
                .ok_or_else(|| defect(CacheError::InvalidEntry))?;
            entry.value = value;
            self.record_access(id)?;

            #[cfg(feature = "metrics")]
            self.metrics.record_set_update();

            return Ok(key);
        }

        if self.index.len() >= self.capacity {
            self.evict()?;
        }

        let register = AccessRegister::new(self.k);
        let cold = &mut self.cold;
        let id = self.entries.insert_with(|id| Entry {
            key,
            value,
            register,
            location: Location::Cold(cold.push_most_recent(id)),
        });
        self.index.insert(key, id);
        self.record_access(id)?;

        #[cfg(feature = "metrics")]
        self.metrics.record_set_new();

        Ok(key)
    }

    /// Returns the value for `key` without recording an access.
    pub fn peek(&self, key: i64) -> Option<i64> {
        self.entry(key).map(|entry| entry.value)
    }

    pub fn contains(&self, key: i64) -> bool {
        self.index.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of accesses retained per key.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Timestamp of the most recent successful `get`/`set`; 0 before any.
    pub fn clock(&self) -> u64 {
        self.clock
    }

    /// Number of entries with fewer than K accesses.
    pub fn cold_len(&self) -> usize {
        self.cold.len()
    }

    /// Number of entries with K accesses.
    pub fn hot_len(&self) -> usize {
        self.hot.len()
    }

    pub fn tier(&self, key: i64) -> Option<Tier> {
        self.entry(key).map(|entry| entry.location.tier())
    }

    /// Number of retained accesses for `key` (at most K).
    pub fn access_count(&self, key: i64) -> Option<usize> {
        self.entry(key).map(|entry| entry.register.len())
    }

    /// Retained access timestamps for `key`, oldest first.
    pub fn access_history(&self, key: i64) -> Option<Vec<u64>> {
        self.entry(key).map(|entry| entry.register.to_vec())
    }

    /// Timestamp of the K-th most recent access; `None` for cold or absent
    /// keys.
    pub fn k_distance(&self, key: i64) -> Option<u64> {
        self.entry(key)
            .filter(|entry| entry.location.tier() == Tier::Hot)
            .and_then(|entry| entry.register.oldest())
    }

    /// Key the next eviction would remove, without removing it.
    pub fn peek_victim(&self) -> Option<i64> {
        let id = match self.cold.peek_victim() {
            Some(&id) => id,
            None => self.hot.peek_min()?,
        };
        self.entries.get(id).map(|entry| entry.key)
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> LrukMetricsSnapshot {
        LrukMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            set_calls: self.metrics.set_calls,
            set_updates: self.metrics.set_updates,
            set_new: self.metrics.set_new,
            evicted_cold: self.metrics.evicted_cold,
            evicted_hot: self.metrics.evicted_hot,
            promotions: self.metrics.promotions,
            rejected_uninitialized: self.metrics.rejected_uninitialized,
            cache_len: self.index.len(),
            cold_len: self.cold.len(),
            hot_len: self.hot.len(),
            capacity: self.capacity,
            clock: self.clock,
        }
    }

    /// Checks every cross-link between index, arena, recency list and heap.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.index.len() != self.entries.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but arena holds {} entries",
                self.index.len(),
                self.entries.len()
            )));
        }
        if self.capacity > 0 && self.index.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "{} entries exceed capacity {}",
                self.index.len(),
                self.capacity
            )));
        }
        if self.cold.len() + self.hot.len() != self.entries.len() {
            return Err(InvariantError::new(format!(
                "tiers hold {} cold + {} hot entries, arena holds {}",
                self.cold.len(),
                self.hot.len(),
                self.entries.len()
            )));
        }

        for (id, entry) in self.entries.iter() {
            let key = entry.key;
            if self.index.get(&key) != Some(&id) {
                return Err(InvariantError::new(format!("key {key} not indexed to its slot")));
            }

            let len = entry.register.len();
            if len == 0 || len > self.k {
                return Err(InvariantError::new(format!(
                    "key {key} register length {len} outside 1..={}",
                    self.k
                )));
            }
            let history = entry.register.to_vec();
            if history.windows(2).any(|w| w[0] >= w[1]) {
                return Err(InvariantError::new(format!(
                    "key {key} register not strictly increasing: {history:?}"
                )));
            }
            if history.last().is_some_and(|&t| t > self.clock) {
                return Err(InvariantError::new(format!(
                    "key {key} register is ahead of clock {}",
                    self.clock
                )));
            }

            match entry.location {
                Location::Cold(handle) => {
                    if entry.register.is_full() {
                        return Err(InvariantError::new(format!(
                            "key {key} has K accesses but is still cold"
                        )));
                    }
                    if self.cold.get(handle) != Some(&id) {
                        return Err(InvariantError::new(format!(
                            "key {key} list handle does not point back at it"
                        )));
                    }
                },
                Location::Hot(position) => {
                    if !entry.register.is_full() {
                        return Err(InvariantError::new(format!(
                            "key {key} is hot with only {len} accesses"
                        )));
                    }
                    if self.hot.get(position) != Some(id) {
                        return Err(InvariantError::new(format!(
                            "key {key} heap position {position} is stale"
                        )));
                    }
                },
            }
        }

        for child in 1..self.hot.len() {
            let parent = (child - 1) / 2;
            let (Some(p), Some(c)) = (self.hot.get(parent), self.hot.get(child)) else {
                continue;
            };
            if self.entries.heap_key(p) > self.entries.heap_key(c) {
                return Err(InvariantError::new(format!(
                    "heap order violated between positions {parent} and {child}"
                )));
            }
        }

        Ok(())
    }

    fn entry(&self, key: i64) -> Option<&Entry> {
        self.index.get(&key).and_then(|&id| self.entries.get(id))
    }

    fn validate(&mut self) -> Result<(), CacheError> {
        if self.capacity == 0 || self.k == 0 {
            warn!(
                capacity = self.capacity,
                k = self.k,
                "rejecting operation on uninitialized cache"
            );
            #[cfg(feature = "metrics")]
            self.metrics.record_rejected();
            return Err(CacheError::NotInitialized);
        }
        Ok(())
    }

    /// Advances the clock, records it on `id` and moves the entry to where
    /// its new access count says it belongs.
    fn record_access(&mut self, id: SlotId) -> Result<(), CacheError> {
        self.clock += 1;
        let timestamp = self.clock;

        let entry = self
            .entries
            .get_mut(id)
            .ok_or_else(|| defect(CacheError::InvalidEntry))?;
        entry.register.record(timestamp);
        let key = entry.key;
        let accesses = entry.register.len();
        let complete = entry.register.is_full();
        let location = entry.location;
        trace!(key, timestamp, accesses, "recorded access");

        match location {
            Location::Cold(handle) if complete => {
                self.cold
                    .remove(handle)
                    .ok_or_else(|| defect(CacheError::InvalidEntry))?;
                self.hot.push(id, &mut self.entries);
                debug!(key, k_distance = self.entries.heap_key(id), "promoted to hot tier");

                #[cfg(feature = "metrics")]
                self.metrics.record_promotion();
            },
            Location::Cold(handle) => {
                if !self.cold.move_to_most_recent(handle) {
                    return Err(defect(CacheError::InvalidEntry));
                }
            },
            Location::Hot(position) => {
                self.hot
                    .fix(position, &mut self.entries)
                    .map_err(defect)?;
            },
        }
        Ok(())
    }

    /// Removes one entry: the cold tail if any cold entry exists, otherwise
    /// the hot entry with the oldest K-th most recent access.
    fn evict(&mut self) -> Result<(), CacheError> {
        let (id, tier) = if !self.cold.is_empty() {
            (self.cold.evict_victim().map_err(defect)?, Tier::Cold)
        } else if !self.hot.is_empty() {
            (self.hot.pop_min(&mut self.entries).map_err(defect)?, Tier::Hot)
        } else {
            return Err(defect(CacheError::EvictionExhausted));
        };

        let entry = self
            .entries
            .remove(id)
            .ok_or_else(|| defect(CacheError::InvalidEntry))?;
        self.index.remove(&entry.key);
        debug!(
            key = entry.key,
            tier = ?tier,
            oldest = ?entry.register.oldest(),
            "evicted entry"
        );

        #[cfg(feature = "metrics")]
        self.metrics.record_eviction(tier);

        Ok(())
    }
}

impl Default for LrukCore {
    /// The zero-value store: every operation fails with `NotInitialized`.
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl fmt::Debug for LrukCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LrukCore")
            .field("capacity", &self.capacity)
            .field("k", &self.k)
            .field("clock", &self.clock)
            .field("cold_len", &self.cold.len())
            .field("hot_len", &self.hot.len())
            .finish_non_exhaustive()
    }
}

/// Thread-safe LRU-K store: one [`LrukCore`] behind one mutex.
///
/// Cloning is cheap and yields another handle to the same store.
///
/// # Example
///
/// ```
/// use std::thread;
/// use lrukit::policy::lru_k::LrukCache;
///
/// let cache = LrukCache::new(64, 2);
/// let workers: Vec<_> = (0..4)
///     .map(|t| {
///         let cache = cache.clone();
///         thread::spawn(move || {
///             for i in 0..8 {
///                 cache.set(t * 100 + i, i).unwrap();
///             }
///         })
///     })
///     .collect();
/// for w in workers {
///     w.join().unwrap();
/// }
/// assert_eq!(cache.len(), 32);
/// assert_eq!(cache.clock(), 32);
/// ```
#[derive(Clone)]
pub struct LrukCache {
    inner: Arc<Mutex<LrukCore>>,
}

impl LrukCache {
    /// Creates a shared store; see [`LrukCore::new`].
    pub fn new(capacity: usize, k: usize) -> Self {
        Self::from_core(LrukCore::new(capacity, k))
    }

    /// Wraps an existing core, keeping its entries and clock.
    pub fn from_core(core: LrukCore) -> Self {
        LrukCache {
            inner: Arc::new(Mutex::new(core)),
        }
    }

    /// Returns the value for `key` and records an access.
    ///
    /// ```
    /// use lrukit::error::CacheError;
    /// use lrukit::policy::lru_k::LrukCache;
    ///
    /// let cache = LrukCache::new(2, 2);
    /// cache.set(1, 10).unwrap();
    /// assert_eq!(cache.get(1), Ok(10));
    /// assert_eq!(cache.get(2), Err(CacheError::KeyNotFound(2)));
    /// ```
    pub fn get(&self, key: i64) -> Result<i64, CacheError> {
        self.inner.lock().get(key)
    }

    /// Stores `value` under `key`; returns `key`.
    pub fn set(&self, key: i64, value: i64) -> Result<i64, CacheError> {
        self.inner.lock().set(key, value)
    }

    /// See [`LrukCore::peek`]; does not record an access.
    pub fn peek(&self, key: i64) -> Option<i64> {
        self.inner.lock().peek(key)
    }

    pub fn contains(&self, key: i64) -> bool {
        self.inner.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    pub fn k(&self) -> usize {
        self.inner.lock().k()
    }

    /// See [`LrukCore::clock`].
    pub fn clock(&self) -> u64 {
        self.inner.lock().clock()
    }

    /// Tier currently holding `key`; see [`LrukCore::tier`].
    pub fn tier(&self, key: i64) -> Option<Tier> {
        self.inner.lock().tier(key)
    }

    /// See [`LrukCore::access_count`].
    pub fn access_count(&self, key: i64) -> Option<usize> {
        self.inner.lock().access_count(key)
    }

    /// Retained timestamps for `key`, oldest first; see
    /// [`LrukCore::access_history`].
    pub fn access_history(&self, key: i64) -> Option<Vec<u64>> {
        self.inner.lock().access_history(key)
    }

    /// See [`LrukCore::k_distance`].
    pub fn k_distance(&self, key: i64) -> Option<u64> {
        self.inner.lock().k_distance(key)
    }

    pub fn cold_len(&self) -> usize {
        self.inner.lock().cold_len()
    }

    pub fn hot_len(&self) -> usize {
        self.inner.lock().hot_len()
    }

    /// Key the next eviction would remove; see [`LrukCore::peek_victim`].
    pub fn peek_victim(&self) -> Option<i64> {
        self.inner.lock().peek_victim()
    }

    /// Runs [`LrukCore::check_invariants`] under the lock.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.inner.lock().check_invariants()
    }

    /// Counters and gauges captured under the lock.
    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> LrukMetricsSnapshot {
        self.inner.lock().metrics_snapshot()
    }

    /// Runs `f` with the lock held, for reads that must see one consistent
    /// state across several accessors.
    pub fn with_core<R>(&self, f: impl FnOnce(&LrukCore) -> R) -> R {
        let core = self.inner.lock();
        f(&*core)
    }
}

impl Default for LrukCache {
    /// The zero-value store: every operation fails with `NotInitialized`.
    fn default() -> Self {
        Self::from_core(LrukCore::default())
    }
}

impl fmt::Debug for LrukCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let core = self.inner.lock();
        f.debug_struct("LrukCache")
            .field("len", &core.len())
            .field("capacity", &core.capacity())
            .field("k", &core.k())
            .finish_non_exhaustive()
    }
}

impl KeyValueCache for LrukCache {
    fn get(&self, key: i64) -> Result<i64, CacheError> {
        LrukCache::get(self, key)
    }

    fn set(&self, key: i64, value: i64) -> Result<i64, CacheError> {
        LrukCache::set(self, key, value)
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Get(i64),
        Set(i64, i64),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0i64..24).prop_map(Op::Get),
            (0i64..24, any::<i64>()).prop_map(|(k, v)| Op::Set(k, v)),
        ]
    }

    proptest! {
        /// Property: structural invariants, capacity and one-way promotion
        /// hold after every operation
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_invariants_hold(
            capacity in 1usize..12,
            k in 1usize..5,
            ops in prop::collection::vec(op_strategy(), 0..256)
        ) {
            let mut core = LrukCore::new(capacity, k);
            let mut seen_hot = std::collections::HashSet::new();

            for op in ops {
                let before_clock = core.clock();
                let before_len = core.len();
                match op {
                    Op::Get(key) => {
                        let present = core.contains(key);
                        let result = core.get(key);
                        prop_assert_eq!(result.is_ok(), present);
                        if present {
                            prop_assert_eq!(core.clock(), before_clock + 1);
                        } else {
                            prop_assert_eq!(result, Err(CacheError::KeyNotFound(key)));
                            prop_assert_eq!(core.clock(), before_clock);
                        }
                        prop_assert_eq!(core.len(), before_len);
                    }
                    Op::Set(key, value) => {
                        let present = core.contains(key);
                        prop_assert_eq!(core.set(key, value), Ok(key));
                        prop_assert_eq!(core.clock(), before_clock + 1);
                        prop_assert_eq!(core.peek(key), Some(value));
                        if !present && before_len == capacity {
                            prop_assert_eq!(core.len(), capacity);
                        }
                    }
                }

                prop_assert!(core.len() <= capacity);
                for &key in &seen_hot {
                    if core.contains(key) {
                        prop_assert_eq!(core.tier(key), Some(Tier::Hot));
                    }
                }
                for key in 0..24 {
                    if core.tier(key) == Some(Tier::Hot) {
                        seen_hot.insert(key);
                    }
                }
                seen_hot.retain(|&key| core.contains(key));
                if let Err(err) = core.check_invariants() {
                    return Err(TestCaseError::fail(err.to_string()));
                }
            }
        }
    }
}
