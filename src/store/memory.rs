//! Memory Store Module
//!
//! In-process key-value store with per-entry TTL, usable as the backend of
//! an [`ExternalValueCache`](crate::memo::ExternalValueCache).

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use crate::config::Config;
use crate::error::{MemoError, Result};
use crate::memo::KeyValueStore;
use crate::store::{StoreEntry, StoreStats, MAX_KEY_LENGTH};

#[derive(Debug)]
struct Inner<V> {
    entries: HashMap<String, StoreEntry<V>>,
    stats: StoreStats,
}

// == Memory Store ==
/// Thread-safe in-memory store with lazy and sweep-based expiry.
#[derive(Debug)]
pub struct MemoryStore<V> {
    inner: RwLock<Inner<V>>,
    /// TTL applied by [`insert`](Self::insert) when none is given
    default_ttl: Duration,
}

impl<V> MemoryStore<V> {
    // == Constructor ==
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            inner: RwLock::new(Inner {
                entries: HashMap::new(),
                stats: StoreStats::new(),
            }),
            default_ttl,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.default_ttl_duration())
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    // == Insert ==
    /// Stores a value under `key`, replacing any previous entry and its TTL.
    ///
    /// # Arguments
    /// * `key` - Non-empty key of at most [`MAX_KEY_LENGTH`] bytes
    /// * `value` - The value to store
    /// * `ttl` - Optional lifetime (uses the store's default TTL if None)
    pub fn insert(&self, key: &str, value: V, ttl: Option<Duration>) -> Result<()> {
        validate_key(key)?;

        let entry = StoreEntry::new(value, Some(ttl.unwrap_or(self.default_ttl)));

        let mut inner = self.write();
        inner.entries.insert(key.to_string(), entry);
        let len = inner.entries.len();
        inner.stats.set_total_entries(len);

        Ok(())
    }

    // == Remove ==
    /// Removes an entry by key, returning whether it existed.
    pub fn remove(&self, key: &str) -> bool {
        let mut inner = self.write();
        let removed = inner.entries.remove(key).is_some();
        let len = inner.entries.len();
        inner.stats.set_total_entries(len);
        removed
    }

    // == Purge Expired ==
    /// Removes all expired entries and returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let mut inner = self.write();
        let before = inner.entries.len();
        inner.entries.retain(|_, entry| !entry.is_expired());

        let removed = before - inner.entries.len();
        let len = inner.entries.len();
        inner.stats.record_expirations(removed);
        inner.stats.set_total_entries(len);
        removed
    }

    pub fn stats(&self) -> StoreStats {
        self.read().stats.clone()
    }

    pub fn len(&self) -> usize {
        self.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().entries.is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner<V>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner<V>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<V: Clone> MemoryStore<V> {
    // == Fetch ==
    /// Retrieves a live value by key.
    ///
    /// Expired entries are removed on access and counted as misses.
    pub fn fetch(&self, key: &str) -> Result<V> {
        let mut guard = self.write();
        let inner = &mut *guard;

        let expired = match inner.entries.get(key) {
            Some(entry) if !entry.is_expired() => {
                let value = entry.value.clone();
                inner.stats.record_hit();
                return Ok(value);
            }
            Some(_) => true,
            None => false,
        };

        inner.stats.record_miss();
        if expired {
            inner.entries.remove(key);
            let len = inner.entries.len();
            inner.stats.record_expirations(1);
            inner.stats.set_total_entries(len);
            Err(MemoError::KeyExpired(key.to_string()))
        } else {
            Err(MemoError::KeyNotFound(key.to_string()))
        }
    }
}

impl<V> Default for MemoryStore<V> {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl<V: Clone> KeyValueStore<V> for MemoryStore<V> {
    fn get(&self, key: &str) -> Option<V> {
        self.fetch(key).ok()
    }

    fn set(&self, key: &str, value: V, ttl: Duration) -> Result<()> {
        self.insert(key, value, Some(ttl))
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(MemoError::InvalidKey("Key cannot be empty".to_string()));
    }
    if key.len() > MAX_KEY_LENGTH {
        return Err(MemoError::InvalidKey(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        )));
    }
    Ok(())
}
