//! Error types for the memoizer
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Memo Error Enum ==
/// Unified error type for slots, memoizers and stores.
///
/// Errors raised by a memoized method itself never pass through this type;
/// they are returned to the caller unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoError {
    /// Slot has not been populated yet
    #[error("Slot not found: {0}")]
    SlotNotFound(String),

    /// Slot holds a value of a different type
    #[error("Slot {slot} does not hold a value of type {expected}")]
    SlotType {
        slot: String,
        expected: &'static str,
    },

    /// Explicit slot name or store key is unusable
    #[error("Invalid slot name: {0:?}")]
    InvalidSlotName(String),

    /// Key rejected by the store
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Key not present in the store
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// Key was present but its TTL has elapsed
    #[error("Key expired: {0}")]
    KeyExpired(String),
}

// == Result Type Alias ==
/// Convenience Result type for the crate.
pub type Result<T> = std::result::Result<T, MemoError>;
