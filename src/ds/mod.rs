//! Building blocks for the LRU-K store.
//!
//! - [`AccessRegister`]: per-key sliding window of the last K timestamps
//! - [`RecencyList`]: cold tier, most recently touched first
//! - [`EvictionHeap`]: hot tier, smallest oldest-timestamp first
//! - [`SlotArena`]: stable-handle storage shared by the tiers

pub mod access_register;
pub mod eviction_heap;
pub mod recency_list;
pub mod slot_arena;

pub use access_register::AccessRegister;
pub use eviction_heap::{EvictionHeap, HeapSlots};
pub use recency_list::RecencyList;
pub use slot_arena::{SlotArena, SlotId};
