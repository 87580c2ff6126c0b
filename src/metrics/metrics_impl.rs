use crate::policy::lru_k::Tier;

/// Counters bumped by [`LrukCore`](crate::policy::lru_k::LrukCore).
#[derive(Debug, Default, Clone)]
pub struct LrukMetrics {
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
}

impl LrukMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }

    #[inline]
    pub fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }

    #[inline]
    pub fn record_set_update(&mut self) {
        self.set_calls += 1;
        self.set_updates += 1;
    }

    #[inline]
    pub fn record_set_new(&mut self) {
        self.set_calls += 1;
        self.set_new += 1;
    }

    #[inline]
    pub fn record_eviction(&mut self, from: Tier) {
        match from {
            Tier::Cold => self.evicted_cold += 1,
            Tier::Hot => self.evicted_hot += 1,
        }
    }

    #[inline]
    pub fn record_promotion(&mut self) {
        self.promotions += 1;
    }

    #[inline]
    pub fn record_rejected(&mut self) {
        self.rejected_uninitialized += 1;
    }
}
