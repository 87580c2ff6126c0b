//! Operation counters for the LRU-K store (feature `metrics`).
//!
//! Recording is split from reading: the store bumps counters on
//! [`LrukMetrics`] under its own lock, and callers read a
//! [`LrukMetricsSnapshot`] copy that also carries gauges captured at snapshot
//! time.

pub mod metrics_impl;
pub mod snapshot;

pub use metrics_impl::LrukMetrics;
pub use snapshot::LrukMetricsSnapshot;
