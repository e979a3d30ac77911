//! Slot Map Module
//!
//! Per-instance storage of memoized values keyed by slot name.

use std::any::{type_name, Any};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{MemoError, Result};

type SlotValue = Arc<dyn Any + Send + Sync>;

// == Slots ==
/// Named memo slots owned by a single instance.
///
/// Slots are created lazily by [`ValueCache`](crate::memo::ValueCache) on the
/// first successful call and live as long as the owner does. Reading a slot
/// that has not been populated yields [`MemoError::SlotNotFound`].
#[derive(Default)]
pub struct Slots {
    values: RwLock<HashMap<String, SlotValue>>,
}

impl Slots {
    pub fn new() -> Self {
        Self::default()
    }

    // == Get ==
    /// Returns a clone of the value stored under `name`.
    ///
    /// # Errors
    /// - [`MemoError::SlotNotFound`] if the slot has not been populated
    /// - [`MemoError::SlotType`] if the slot holds a value of another type
    pub fn get<T>(&self, name: &str) -> Result<T>
    where
        T: Any + Clone,
    {
        let values = self.read();
        let value = values
            .get(name)
            .ok_or_else(|| MemoError::SlotNotFound(name.to_string()))?;

        value
            .downcast_ref::<T>()
            .cloned()
            .ok_or_else(|| MemoError::SlotType {
                slot: name.to_string(),
                expected: type_name::<T>(),
            })
    }

    // == Store ==
    /// Stores `value` under `name`, replacing whatever the slot held.
    pub fn store<T>(&self, name: &str, value: T)
    where
        T: Any + Send + Sync,
    {
        self.write().insert(name.to_string(), Arc::new(value));
    }

    // == Remove ==
    /// Clears a slot so the next memoized call recomputes it.
    ///
    /// Returns whether the slot was populated.
    pub fn remove(&self, name: &str) -> bool {
        self.write().remove(name).is_some()
    }

    pub fn clear(&self) {
        self.write().clear();
    }

    pub fn contains(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    /// Names of populated slots, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, SlotValue>> {
        self.values.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, SlotValue>> {
        self.values.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Slots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slots")
            .field("names", &self.names())
            .finish()
    }
}

// == Has Slots ==
/// Implemented by types whose methods are memoized with
/// [`ValueCache`](crate::memo::ValueCache).
pub trait HasSlots {
    fn slots(&self) -> &Slots;
}

impl HasSlots for Slots {
    fn slots(&self) -> &Slots {
        self
    }
}
