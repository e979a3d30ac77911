//! Background Tasks Module
//!
//! # Tasks
//! - TTL Sweep: Removes expired entries from a [`MemoryStore`](crate::MemoryStore)

mod sweep;

pub use sweep::spawn_sweep_task;
