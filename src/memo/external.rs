//! External Value Cache Module
//!
//! Memoizes a method's result in an injected key-value store with a TTL.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::DEFAULT_TTL_SECS;
use crate::error::{MemoError, Result};
use crate::memo::value_cache::validate_slot_name;
use crate::memo::ValueCache;
use crate::store::MAX_KEY_LENGTH;

/// TTL used when none is configured.
pub const DEFAULT_TTL: Duration = Duration::from_secs(DEFAULT_TTL_SECS);

// == Key Value Store ==
/// Storage collaborator for [`ExternalValueCache`].
///
/// Persistence, eviction and distribution are entirely the store's concern.
pub trait KeyValueStore<V> {
    /// Returns the live value under `key`, or None if absent or expired.
    fn get(&self, key: &str) -> Option<V>;

    /// Stores `value` under `key` for `ttl`.
    fn set(&self, key: &str, value: V, ttl: Duration) -> Result<()>;
}

impl<V, S> KeyValueStore<V> for &S
where
    S: KeyValueStore<V> + ?Sized,
{
    fn get(&self, key: &str) -> Option<V> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: V, ttl: Duration) -> Result<()> {
        (**self).set(key, value, ttl)
    }
}

impl<V, S> KeyValueStore<V> for Arc<S>
where
    S: KeyValueStore<V> + ?Sized,
{
    fn get(&self, key: &str) -> Option<V> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: V, ttl: Duration) -> Result<()> {
        (**self).set(key, value, ttl)
    }
}

// == External Value Cache ==
/// Memoizer whose slot is a key in a shared store.
///
/// Keys are global to the store, not to an owner: two instances memoizing
/// under the same key share one value.
///
/// A key the store refuses on `set` is never cached: each failed write is
/// logged and the method recomputes on every call. Explicit keys are held to
/// [`MAX_KEY_LENGTH`] up front; a bare-form key derived from a very long
/// method name is not.
#[derive(Debug, Clone)]
pub struct ExternalValueCache<S> {
    store: S,
    key: String,
    ttl: Duration,
}

impl<S> ExternalValueCache<S> {
    // == Bare Form ==
    /// Memoizes `method_name` under the key `_val_<method_name>`.
    pub fn memoize(store: S, method_name: &str) -> Self {
        Self {
            store,
            key: ValueCache::resolve_slot_name(None, method_name),
            ttl: DEFAULT_TTL,
        }
    }

    // == Named Form ==
    /// Memoizes under an explicit key.
    ///
    /// # Errors
    /// - [`MemoError::InvalidSlotName`] if `key` is empty or whitespace
    /// - [`MemoError::InvalidKey`] if `key` is longer than [`MAX_KEY_LENGTH`] bytes
    pub fn memoize_named(store: S, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        validate_slot_name(&key)?;
        if key.len() > MAX_KEY_LENGTH {
            return Err(MemoError::InvalidKey(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            )));
        }
        Ok(Self {
            store,
            key,
            ttl: DEFAULT_TTL,
        })
    }

    /// Overrides the TTL passed to the store on every write.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // == Call ==
    /// Returns the stored value, running `compute` and writing the result
    /// with the configured TTL when the store has none.
    pub fn call<V, F>(&self, compute: F) -> V
    where
        S: KeyValueStore<V>,
        V: Clone,
        F: FnOnce() -> V,
    {
        match self.try_call(|| Ok::<V, Infallible>(compute())) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    // == Try Call ==
    /// Fallible form of [`call`](Self::call). An error is returned unchanged
    /// and nothing is written to the store.
    ///
    /// A failed store write is logged and the computed value still returned.
    pub fn try_call<V, E, F>(&self, compute: F) -> std::result::Result<V, E>
    where
        S: KeyValueStore<V>,
        V: Clone,
        F: FnOnce() -> std::result::Result<V, E>,
    {
        if let Some(value) = self.store.get(&self.key) {
            debug!(key = %self.key, "store value hit");
            return Ok(value);
        }
        debug!(key = %self.key, "store value miss");

        let value = compute()?;
        if let Err(err) = self.store.set(&self.key, value.clone(), self.ttl) {
            warn!(key = %self.key, error = %err, "failed to store memoized value");
        }
        Ok(value)
    }
}
