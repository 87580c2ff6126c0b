//! Error types for the lrukit library.
//!
//! ## Key Components
//!
//! - [`CacheError`]: Returned by cache operations (`get`/`set`) and by the
//!   tier structures when an eviction precondition does not hold.
//! - [`ConfigError`]: Returned when cache configuration parameters are invalid
//!   (zero capacity or zero K).
//! - [`InvariantError`]: Returned by `check_invariants` when the cross-links
//!   between index, recency list and eviction heap are inconsistent.
//!
//! ## Example Usage
//!
//! ```
//! use lrukit::error::CacheError;
//! use lrukit::policy::lru_k::LrukCache;
//!
//! let cache = LrukCache::new(2, 2);
//! assert_eq!(cache.get(7), Err(CacheError::KeyNotFound(7)));
//!
//! // A zero-sized store is accepted at construction and rejected on use.
//! let broken = LrukCache::new(0, 2);
//! assert_eq!(broken.set(1, 1), Err(CacheError::NotInitialized));
//! ```

use thiserror::Error;

// ---------------------------------------------------------------------------
// CacheError
// ---------------------------------------------------------------------------

/// Error returned by cache operations.
///
/// Only [`KeyNotFound`](CacheError::KeyNotFound) is an expected outcome.
/// [`NotInitialized`](CacheError::NotInitialized) reports a misconfigured
/// store; every other variant means an internal invariant was broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CacheError {
    /// Capacity or K is zero.
    #[error("cache is not initialized: capacity and k must both be non-zero")]
    NotInitialized,

    /// `get` on a key that is not resident.
    #[error("key {0} does not exist in cache")]
    KeyNotFound(i64),

    /// Tail eviction was attempted on an empty recency list.
    #[error("recency list is empty")]
    EmptyList,

    /// Minimum pop was attempted on an empty eviction heap.
    #[error("eviction heap is empty")]
    EmptyHeap,

    /// The store reports itself full but neither tier yields a victim.
    #[error("unable to evict from cache: both tiers are empty")]
    EvictionExhausted,

    /// A list or heap handle does not resolve to a live entry.
    #[error("tier structure handle does not refer to a live entry")]
    InvalidEntry,
}

impl CacheError {
    /// Returns `true` for variants that indicate a logic error in the cache
    /// itself rather than a caller mistake or a plain miss.
    ///
    /// ```
    /// use lrukit::error::CacheError;
    ///
    /// assert!(!CacheError::KeyNotFound(1).is_defect());
    /// assert!(!CacheError::NotInitialized.is_defect());
    /// assert!(CacheError::EvictionExhausted.is_defect());
    /// ```
    pub fn is_defect(&self) -> bool {
        !matches!(self, CacheError::KeyNotFound(_) | CacheError::NotInitialized)
    }
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by [`LrukConfig::validate`](crate::builder::LrukConfig::validate)
/// and the builder's `try_build*` methods. Carries a human-readable
/// description of which parameter failed validation.
///
/// # Example
///
/// ```
/// use lrukit::builder::LrukBuilder;
///
/// let err = LrukBuilder::new(0).try_build().unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by [`LrukCore::check_invariants`](crate::policy::lru_k::LrukCore::check_invariants).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- CacheError -------------------------------------------------------

    #[test]
    fn cache_error_display_names_missing_key() {
        let err = CacheError::KeyNotFound(42);
        assert_eq!(err.to_string(), "key 42 does not exist in cache");
    }

    #[test]
    fn cache_error_defect_classification() {
        assert!(!CacheError::KeyNotFound(0).is_defect());
        assert!(!CacheError::NotInitialized.is_defect());
        for err in [
            CacheError::EmptyList,
            CacheError::EmptyHeap,
            CacheError::EvictionExhausted,
            CacheError::InvalidEntry,
        ] {
            assert!(err.is_defect(), "{err:?} should be a defect");
        }
    }

    #[test]
    fn cache_error_implements_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<CacheError>();
    }

    // -- ConfigError ------------------------------------------------------

    #[test]
    fn config_display_shows_message() {
        let err = ConfigError::new("k must be > 0");
        assert_eq!(err.to_string(), "k must be > 0");
        assert_eq!(err.message(), "k must be > 0");
    }

    #[test]
    fn config_clone_and_eq() {
        let a = ConfigError::new("x");
        assert_eq!(a.clone(), a);
    }

    // -- InvariantError ---------------------------------------------------

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("heap position mismatch");
        assert_eq!(err.to_string(), "heap position mismatch");
        assert!(format!("{err:?}").contains("heap position mismatch"));
    }
}
