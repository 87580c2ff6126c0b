//! # Cache Traits
//!
//! The caller-facing contract of a shared key/value store.
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │            KeyValueCache                │
//!   │                                         │
//!   │  get(&, i64) → Result<i64, CacheError>  │
//!   │  set(&, i64, i64) → Result<i64, _>      │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!               LrukCache (Mutex-guarded)
//! ```
//!
//! Both methods take `&self`: implementations synchronize internally, so a
//! single instance can be shared behind an `Arc` or cloned handle. Every call
//! is linearizable with respect to every other call on the same instance.
//!
//! ## Example Usage
//!
//! ```
//! use lrukit::policy::lru_k::LrukCache;
//! use lrukit::traits::KeyValueCache;
//!
//! fn warm<C: KeyValueCache>(cache: &C, keys: &[i64]) {
//!     for &k in keys {
//!         cache.set(k, k * 10).unwrap();
//!     }
//! }
//!
//! let cache = LrukCache::new(8, 2);
//! warm(&cache, &[1, 2, 3]);
//! assert_eq!(KeyValueCache::get(&cache, 2), Ok(20));
//! ```

use crate::error::CacheError;

/// Shared, internally synchronized `i64 -> i64` store.
pub trait KeyValueCache: Send + Sync {
    /// Returns the value for `key`, counting the call as an access.
    ///
    /// Fails with [`CacheError::KeyNotFound`] for absent keys; a miss leaves
    /// the store unchanged.
    fn get(&self, key: i64) -> Result<i64, CacheError>;

    /// Stores `value` under `key` and returns `key`.
    ///
    /// May evict another key when `key` is new and the store is full.
    fn set(&self, key: i64, value: i64) -> Result<i64, CacheError>;

    /// Returns the cached value or stores `default` and returns it.
    fn get_or_set(&self, key: i64, default: i64) -> Result<i64, CacheError> {
        match self.get(key) {
            Err(CacheError::KeyNotFound(_)) => self.set(key, default).map(|_| default),
            other => other,
        }
    }
}
