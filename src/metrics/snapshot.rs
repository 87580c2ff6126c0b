/// Point-in-time copy of [`LrukMetrics`](super::LrukMetrics) plus gauges.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LrukMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub set_calls: u64,
    pub set_updates: u64,
    pub set_new: u64,

    pub evicted_cold: u64,
    pub evicted_hot: u64,
    pub promotions: u64,
    pub rejected_uninitialized: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub cold_len: usize,
    pub hot_len: usize,
    pub capacity: usize,
    pub clock: u64,
}

impl LrukMetricsSnapshot {
    /// Total entries evicted from either tier.
    pub fn evicted_entries(&self) -> u64 {
        self.evicted_cold + self.evicted_hot
    }

    /// Fraction of `get` calls that hit; `0.0` before any call.
    pub fn hit_rate(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }
}
