//! TTL Sweep Task
//!
//! Background task that periodically removes expired store entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::store::{duration_ms, MemoryStore};

/// Spawns a background task that periodically purges expired entries.
///
/// Expired entries are also dropped lazily on read; the sweep bounds how long
/// unread ones keep their memory.
///
/// # Arguments
/// * `store` - Shared store to sweep
/// * `interval` - Time between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task; abort it to stop sweeping.
///
/// # Example
/// ```ignore
/// let store = Arc::new(MemoryStore::<i64>::from_config(&config));
/// let sweeper = spawn_sweep_task(store.clone(), config.sweep_interval_duration());
/// // Later, during shutdown:
/// sweeper.abort();
/// ```
pub fn spawn_sweep_task<V>(store: Arc<MemoryStore<V>>, interval: Duration) -> JoinHandle<()>
where
    V: Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!(interval_ms = duration_ms(interval), "Starting TTL sweep task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = store.purge_expired();

            if removed > 0 {
                info!("TTL sweep: removed {} expired entries", removed);
            } else {
                debug!("TTL sweep: no expired entries found");
            }
        }
    })
}
