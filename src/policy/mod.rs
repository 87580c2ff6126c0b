//! Eviction policies.

pub mod lru_k;
