//! lrukit: a bounded `i64 -> i64` store with LRU-K eviction.
//!
//! Keys accessed fewer than K times sit in a recency list and are evicted
//! first; keys with K accesses sit in a min-heap ordered by their K-th most
//! recent access. See [`policy::lru_k`] for the full layout.

pub mod builder;
pub mod ds;
pub mod error;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod policy;
pub mod prelude;
pub mod traits;

pub use builder::{LrukBuilder, LrukConfig};
pub use error::{CacheError, ConfigError, InvariantError};
pub use policy::lru_k::{LrukCache, LrukCore, Tier};
pub use traits::KeyValueCache;
