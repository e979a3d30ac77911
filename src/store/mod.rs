//! Store Module
//!
//! In-process key-value backend with TTL expiration.

mod entry;
mod memory;
mod stats;

// Re-export public types
pub use entry::{current_timestamp_ms, duration_ms, StoreEntry};
pub use memory::MemoryStore;
pub use stats::StoreStats;

// == Public Constants ==
/// Maximum allowed key length in bytes (the memcached limit)
pub const MAX_KEY_LENGTH: usize = 250;
