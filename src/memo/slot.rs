//! Typed Slot Module
//!
//! A single memo slot declared as a field, for owners that do not want
//! name-keyed [`Slots`](crate::memo::Slots).

use std::fmt;
use std::sync::{PoisonError, RwLock};

use tracing::debug;

// == Memo Slot ==
/// Optional field holding one memoized value.
///
/// ```
/// use value_cache::MemoSlot;
///
/// struct Invoice {
///     lines: Vec<u32>,
///     total: MemoSlot<u32>,
/// }
///
/// impl Invoice {
///     fn total(&self) -> u32 {
///         self.total.get_or_compute(|| self.lines.iter().sum())
///     }
/// }
///
/// let invoice = Invoice { lines: vec![2, 3], total: MemoSlot::new() };
/// assert_eq!(invoice.total(), 5);
/// assert_eq!(invoice.total.peek(), Some(5));
/// ```
pub struct MemoSlot<T> {
    value: RwLock<Option<T>>,
}

impl<T> MemoSlot<T> {
    pub const fn new() -> Self {
        Self {
            value: RwLock::new(None),
        }
    }

    pub fn is_populated(&self) -> bool {
        self.value
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Empties the slot, returning the value it held.
    pub fn clear(&self) -> Option<T> {
        self.value
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

impl<T: Clone> MemoSlot<T> {
    pub fn peek(&self) -> Option<T> {
        self.value
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    // == Get Or Compute ==
    /// Returns the stored value, computing and storing it on first use.
    pub fn get_or_compute<F>(&self, compute: F) -> T
    where
        F: FnOnce() -> T,
    {
        if let Some(value) = self.peek() {
            return value;
        }

        let value = compute();
        self.fill(value.clone());
        value
    }

    /// Fallible form of [`get_or_compute`](Self::get_or_compute).
    ///
    /// An error leaves the slot empty so the next call retries.
    pub fn try_get_or_compute<F, E>(&self, compute: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        if let Some(value) = self.peek() {
            return Ok(value);
        }

        let value = compute()?;
        self.fill(value.clone());
        Ok(value)
    }

    fn fill(&self, value: T) {
        // Lock is not held across compute: racing first calls both compute, last write wins.
        let mut slot = self.value.write().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            debug!("memo slot overwritten by concurrent first call");
        }
        *slot = Some(value);
    }
}

impl<T> Default for MemoSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for MemoSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.value.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_tuple("MemoSlot").field(&*value).finish()
    }
}
