//! Configuration Module
//!
//! Loads memoizer and store defaults from environment variables.

use std::env;
use std::time::Duration;

/// Default time-to-live, in seconds, for externally stored values.
pub const DEFAULT_TTL_SECS: u64 = 300;

/// Default interval, in seconds, between background sweeps.
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

/// Memoizer configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// TTL in seconds for store entries written without an explicit TTL
    pub default_ttl: u64,
    /// Background sweep interval in seconds
    pub sweep_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `VALUE_CACHE_DEFAULT_TTL` - Default TTL in seconds (default: 300)
    /// - `VALUE_CACHE_SWEEP_INTERVAL` - Sweep frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        Self {
            default_ttl: read_env("VALUE_CACHE_DEFAULT_TTL").unwrap_or(DEFAULT_TTL_SECS),
            sweep_interval: read_env("VALUE_CACHE_SWEEP_INTERVAL")
                .unwrap_or(DEFAULT_SWEEP_INTERVAL_SECS),
        }
    }

    pub fn default_ttl_duration(&self) -> Duration {
        Duration::from_secs(self.default_ttl)
    }

    pub fn sweep_interval_duration(&self) -> Duration {
        Duration::from_secs(self.sweep_interval)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_ttl: DEFAULT_TTL_SECS,
            sweep_interval: DEFAULT_SWEEP_INTERVAL_SECS,
        }
    }
}

fn read_env(name: &str) -> Option<u64> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
