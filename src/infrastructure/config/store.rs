//! Document store configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// SQLite database path. Overridden by `NFLSYNC_DATABASE`.
    pub database: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database: "nflsync.db".into(),
        }
    }
}
