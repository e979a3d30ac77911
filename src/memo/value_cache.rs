//! Value Cache Module
//!
//! Memoizes a self-only method into a named slot on its owner.

use std::any::Any;
use std::convert::Infallible;

use tracing::{debug, warn};

use crate::error::{MemoError, Result};
use crate::memo::{HasSlots, SLOT_PREFIX};

// == Value Cache ==
/// Memoizer bound to one method and one slot name.
///
/// Values are cached per owner, never per argument: once the slot is
/// populated, every later call returns the stored value even if the owner's
/// state has changed since.
///
/// ```
/// use value_cache::{HasSlots, Slots, ValueCache};
///
/// struct Box3 { a: i64, b: i64, c: i64, slots: Slots }
///
/// impl HasSlots for Box3 {
///     fn slots(&self) -> &Slots { &self.slots }
/// }
///
/// impl Box3 {
///     fn volume(&self) -> i64 {
///         ValueCache::memoize("volume").call(self, || self.a * self.b * self.c)
///     }
/// }
///
/// let mut b = Box3 { a: 1, b: 2, c: 3, slots: Slots::new() };
/// assert_eq!(b.volume(), 6);
/// b.a = 10;
/// assert_eq!(b.volume(), 6);
/// assert_eq!(b.slots.get::<i64>("_val_volume").unwrap(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueCache {
    slot_name: String,
}

impl ValueCache {
    // == Bare Form ==
    /// Memoizes `method_name` into the derived slot `_val_<method_name>`.
    pub fn memoize(method_name: &str) -> Self {
        Self {
            slot_name: Self::resolve_slot_name(None, method_name),
        }
    }

    // == Named Form ==
    /// Memoizes into an explicitly named slot.
    ///
    /// # Errors
    /// [`MemoError::InvalidSlotName`] if `name` is [blank](is_blank).
    pub fn memoize_named(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_slot_name(&name)?;
        Ok(Self { slot_name: name })
    }

    /// Named form for a literal already checked by `value_cache!` at compile time.
    #[doc(hidden)]
    pub fn from_checked_literal(name: &'static str) -> Self {
        Self {
            slot_name: name.to_string(),
        }
    }

    /// The explicit name when given, otherwise `_val_` followed by the method name.
    pub fn resolve_slot_name(explicit: Option<&str>, method_name: &str) -> String {
        match explicit {
            Some(name) => name.to_string(),
            None => format!("{}{}", SLOT_PREFIX, method_name),
        }
    }

    pub fn slot_name(&self) -> &str {
        &self.slot_name
    }

    // == Call ==
    /// Returns the owner's memoized value, running `compute` only when the
    /// slot is empty.
    pub fn call<O, T, F>(&self, owner: &O, compute: F) -> T
    where
        O: HasSlots + ?Sized,
        T: Any + Clone + Send + Sync,
        F: FnOnce() -> T,
    {
        match self.try_call(owner, || Ok::<T, Infallible>(compute())) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    // == Try Call ==
    /// Fallible form of [`call`](Self::call).
    ///
    /// An error from `compute` is returned unchanged and leaves the slot
    /// unpopulated, so the next call computes again.
    pub fn try_call<O, T, E, F>(&self, owner: &O, compute: F) -> std::result::Result<T, E>
    where
        O: HasSlots + ?Sized,
        T: Any + Clone + Send + Sync,
        F: FnOnce() -> std::result::Result<T, E>,
    {
        let slots = owner.slots();

        match slots.get::<T>(&self.slot_name) {
            Ok(value) => {
                debug!(slot = %self.slot_name, "memoized value hit");
                return Ok(value);
            }
            Err(MemoError::SlotNotFound(_)) => {
                debug!(slot = %self.slot_name, "memoized value miss");
            }
            Err(err) => {
                warn!(slot = %self.slot_name, error = %err, "slot collision, recomputing");
            }
        }

        let value = compute()?;
        slots.store(&self.slot_name, value.clone());
        Ok(value)
    }

    /// Clears the owner's slot so the next call recomputes.
    pub fn invalidate<O>(&self, owner: &O) -> bool
    where
        O: HasSlots + ?Sized,
    {
        owner.slots().remove(&self.slot_name)
    }
}

/// Whether `name` is empty or made only of ASCII whitespace.
///
/// Usable in const context, so `value_cache!` rejects blank slot literals at
/// compile time with the same rule `memoize_named` applies at run time.
pub const fn is_blank(name: &str) -> bool {
    let bytes = name.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_whitespace() {
            return false;
        }
        i += 1;
    }
    true
}

pub(crate) fn validate_slot_name(name: &str) -> Result<()> {
    if is_blank(name) {
        return Err(MemoError::InvalidSlotName(name.to_string()));
    }
    Ok(())
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::memo::Slots;
    use std::cell::Cell;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;
    use std::thread;

    #[test]
    fn test_bare_form_slot_name() {
        assert_eq!(ValueCache::memoize("multiply").slot_name(), "_val_multiply");
    }

    #[test]
    fn test_named_form_slot_name() {
        let cache = ValueCache::memoize_named("cache_decorator").unwrap();
        assert_eq!(cache.slot_name(), "cache_decorator");
    }

    #[test]
    fn test_named_form_rejects_blank_names() {
        assert_eq!(
            ValueCache::memoize_named(""),
            Err(MemoError::InvalidSlotName(String::new()))
        );
        assert!(matches!(
            ValueCache::memoize_named("  "),
            Err(MemoError::InvalidSlotName(_))
        ));
        assert!(matches!(
            ValueCache::memoize_named("\t\n"),
            Err(MemoError::InvalidSlotName(_))
        ));
    }

    #[test]
    fn test_is_blank() {
        const EMPTY: bool = is_blank("");
        assert!(EMPTY);
        assert!(is_blank(" "));
        assert!(is_blank(" \t\r\n"));
        assert!(!is_blank("cache_decorator"));
        assert!(!is_blank(" x "));
    }

    #[test]
    fn test_nested_call_on_same_owner() {
        let slots = Slots::new();
        let outer = ValueCache::memoize("outer");
        let inner = ValueCache::memoize("inner");

        // Outer body reads another slot of the same owner while computing
        let value = outer.call(&slots, || inner.call(&slots, || 3_i64) * 2);

        assert_eq!(value, 6);
        assert_eq!(slots.get::<i64>("_val_inner").unwrap(), 3);
        assert_eq!(slots.get::<i64>("_val_outer").unwrap(), 6);
    }

    #[test]
    fn test_racing_first_calls_both_compute() {
        let slots = Slots::new();
        let cache = ValueCache::memoize("racy");
        let barrier = Barrier::new(2);
        let computes = AtomicUsize::new(0);

        // Both threads must be inside compute at once to pass the barrier
        let results: Vec<usize> = thread::scope(|scope| {
            let handles: Vec<_> = (1..=2_usize)
                .map(|id| {
                    let (slots, cache, barrier, computes) = (&slots, &cache, &barrier, &computes);
                    scope.spawn(move || {
                        cache.call(slots, || {
                            computes.fetch_add(1, Ordering::SeqCst);
                            barrier.wait();
                            id
                        })
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(computes.load(Ordering::SeqCst), 2);
        assert_eq!(results.len(), 2);

        // Last write wins; every later call sees that one value
        let stored = cache.call(&slots, || {
            computes.fetch_add(1, Ordering::SeqCst);
            0_usize
        });
        assert!(results.contains(&stored));
        assert_eq!(cache.call(&slots, || 0_usize), stored);
        assert_eq!(computes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_resolve_slot_name() {
        assert_eq!(ValueCache::resolve_slot_name(None, "area"), "_val_area");
        assert_eq!(ValueCache::resolve_slot_name(Some("cached"), "area"), "cached");
    }

    #[test]
    fn test_call_computes_once() {
        let slots = Slots::new();
        let cache = ValueCache::memoize("multiply");
        let calls = Cell::new(0);

        let compute = |v: i64| {
            calls.set(calls.get() + 1);
            v
        };

        assert_eq!(cache.call(&slots, || compute(6)), 6);
        assert_eq!(cache.call(&slots, || compute(15)), 6);
        assert_eq!(calls.get(), 1);
        assert_eq!(slots.get::<i64>("_val_multiply").unwrap(), 6);
    }

    #[test]
    fn test_falsy_values_are_cached() {
        let slots = Slots::new();
        let cache = ValueCache::memoize("count");

        assert_eq!(cache.call(&slots, || 0_u32), 0);
        assert_eq!(cache.call(&slots, || 5_u32), 0);

        let empty = ValueCache::memoize("names");
        assert_eq!(empty.call(&slots, String::new), "");
        assert_eq!(empty.call(&slots, || "x".to_string()), "");
    }

    #[test]
    fn test_error_does_not_cache() {
        let slots = Slots::new();
        let cache = ValueCache::memoize("parse");

        let failed: std::result::Result<i64, String> =
            cache.try_call(&slots, || Err("bad input".to_string()));
        assert_eq!(failed, Err("bad input".to_string()));
        assert!(!slots.contains("_val_parse"));

        let retried: std::result::Result<i64, String> = cache.try_call(&slots, || Ok(42));
        assert_eq!(retried, Ok(42));
        assert_eq!(slots.get::<i64>("_val_parse").unwrap(), 42);
    }

    #[test]
    fn test_slot_collision_recomputes() {
        let slots = Slots::new();
        slots.store("_val_label", 7_i64);

        let cache = ValueCache::memoize("label");
        assert_eq!(cache.call(&slots, || "seven".to_string()), "seven");
        assert_eq!(slots.get::<String>("_val_label").unwrap(), "seven");
    }

    #[test]
    fn test_invalidate() {
        let slots = Slots::new();
        let cache = ValueCache::memoize("multiply");

        cache.call(&slots, || 6_i64);
        assert!(cache.invalidate(&slots));
        assert!(!cache.invalidate(&slots));
        assert_eq!(cache.call(&slots, || 9_i64), 9);
    }

    #[test]
    fn test_named_and_bare_slots_are_independent() {
        let slots = Slots::new();
        let named = ValueCache::memoize_named("cache_decorator").unwrap();

        named.call(&slots, || 6_i64);

        assert!(slots.contains("cache_decorator"));
        assert!(!slots.contains("_val_multiply"));
    }
}
