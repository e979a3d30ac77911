//! Value Cache - per-instance method memoization
//!
//! Computes a self-only method once and reuses the result, keeping it either
//! in a named slot on the owning instance or in a key-value store with a TTL.

pub mod config;
pub mod error;
pub mod memo;
pub mod store;
pub mod tasks;

pub use config::Config;
pub use error::{MemoError, Result};
pub use memo::{
    ExternalValueCache, HasSlots, KeyValueStore, MemoSlot, Slots, ValueCache, SLOT_PREFIX,
};
pub use store::{MemoryStore, StoreStats};
pub use tasks::spawn_sweep_task;
