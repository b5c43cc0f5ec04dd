//! Change cache configuration.

use serde::{Deserialize, Serialize};

/// Backing store for the change cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// In-process map; state is lost on restart.
    #[default]
    Memory,
    Redis,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    pub backend: CacheBackend,
    /// Overridden by `NFLSYNC_REDIS_URL`.
    pub redis_url: String,
    pub key_prefix: String,
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Memory,
            redis_url: "redis://127.0.0.1:6379".into(),
            key_prefix: "nfl:".into(),
            ttl_secs: 86_400,
        }
    }
}
