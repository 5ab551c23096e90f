//! Configuration management for the dashboard binary.
//!
//! Loads configuration from environment variables with sensible defaults.

use freelance_runtime::StoreConfig;
use std::env;
use std::path::PathBuf;

/// Default `tracing` filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "freelance_dashboard=info,freelance_runtime=info";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// JSON seed file; the built-in dataset is used when unset
    pub seed_path: Option<PathBuf>,
    /// `tracing` filter directives
    pub log_filter: String,
    /// Snapshot broadcast capacity for the store
    pub broadcast_capacity: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// - `FREELANCE_SEED_PATH`: optional seed file
    /// - `RUST_LOG`: log filter (default [`DEFAULT_LOG_FILTER`])
    /// - `FREELANCE_BROADCAST_CAPACITY`: snapshot buffer size (default 16)
    ///
    /// Unparseable numbers fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            seed_path: lookup("FREELANCE_SEED_PATH")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            log_filter: lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            broadcast_capacity: lookup("FREELANCE_BROADCAST_CAPACITY")
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(|| StoreConfig::default().broadcast_capacity),
        }
    }

    /// Store settings derived from this configuration
    #[must_use]
    pub const fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.broadcast_capacity)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
