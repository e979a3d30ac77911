//! Memo Module
//!
//! Method value memoization, either on the owning instance or in a
//! key-value store with a TTL.

mod external;
mod macros;
mod slot;
mod slots;
mod value_cache;


// Re-export public types
pub use external::{ExternalValueCache, KeyValueStore, DEFAULT_TTL};
pub use slot::MemoSlot;
pub use slots::{HasSlots, Slots};
pub use value_cache::{is_blank, ValueCache};

// == Public Constants ==
/// Prefix of derived slot names: a bare `multiply` is kept in `_val_multiply`.
pub const SLOT_PREFIX: &str = "_val_";
