//! Configuration and builder for LRU-K stores.
//!
//! [`LrukCore::new`]/[`LrukCache::new`] accept any parameters and defer the
//! zero check to the first operation. The builder validates up front instead.
//!
//! ## Example
//!
//! ```rust
//! use lrukit::builder::LrukBuilder;
//!
//! let cache = LrukBuilder::new(100).k(3).build();
//! cache.set(1, 42).unwrap();
//! assert_eq!(cache.k(), 3);
//!
//! assert!(LrukBuilder::new(100).k(0).try_build().is_err());
//! ```

use crate::error::ConfigError;
use crate::policy::lru_k::{LrukCache, LrukCore};

/// Sizing parameters of an LRU-K store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LrukConfig {
    /// Maximum number of resident keys.
    pub capacity: usize,
    /// Number of accesses retained per key.
    pub k: usize,
}

impl LrukConfig {
    pub fn new(capacity: usize, k: usize) -> Self {
        Self { capacity, k }
    }

    /// Rejects zero capacity or zero K.
    ///
    /// ```
    /// use lrukit::builder::LrukConfig;
    ///
    /// assert!(LrukConfig::new(10, 2).validate().is_ok());
    /// let err = LrukConfig::new(10, 0).validate().unwrap_err();
    /// assert!(err.message().contains("k"));
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::new("capacity must be greater than zero"));
        }
        if self.k == 0 {
            return Err(ConfigError::new("k must be greater than zero"));
        }
        Ok(())
    }
}

impl Default for LrukConfig {
    /// 1000 keys, K = 2.
    fn default() -> Self {
        Self {
            capacity: 1000,
            k: 2,
        }
    }
}

/// Builder for [`LrukCache`] and [`LrukCore`].
#[derive(Debug, Clone)]
pub struct LrukBuilder {
    config: LrukConfig,
}

impl LrukBuilder {
    /// Starts from `capacity` and the default K of 2.
    pub fn new(capacity: usize) -> Self {
        Self {
            config: LrukConfig {
                capacity,
                ..LrukConfig::default()
            },
        }
    }

    pub fn from_config(config: LrukConfig) -> Self {
        Self { config }
    }

    pub fn k(mut self, k: usize) -> Self {
        self.config.k = k;
        self
    }

    pub fn config(&self) -> LrukConfig {
        self.config
    }

    /// Builds without validating; a zero parameter yields a store that
    /// rejects every operation with `NotInitialized`.
    pub fn build(self) -> LrukCache {
        LrukCache::new(self.config.capacity, self.config.k)
    }

    pub fn try_build(self) -> Result<LrukCache, ConfigError> {
        self.config.validate()?;
        Ok(self.build())
    }

    pub fn build_core(self) -> LrukCore {
        LrukCore::new(self.config.capacity, self.config.k)
    }

    pub fn try_build_core(self) -> Result<LrukCore, ConfigError> {
        self.config.validate()?;
        Ok(self.build_core())
    }
}

impl From<LrukConfig> for LrukBuilder {
    fn from(config: LrukConfig) -> Self {
        Self::from_config(config)
    }
}
