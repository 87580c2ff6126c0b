pub use crate::builder::{LrukBuilder, LrukConfig};
pub use crate::ds::{AccessRegister, EvictionHeap, HeapSlots, RecencyList, SlotArena, SlotId};
pub use crate::error::{CacheError, ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::LrukMetricsSnapshot;
pub use crate::policy::lru_k::{LrukCache, LrukCore, Tier};
pub use crate::traits::KeyValueCache;
