//! Canonical test configurations.

use crate::infrastructure::config::Config;

/// In-memory cache, scheduler and server off, database at `database`.
pub fn offline_config(database: &str) -> Config {
    let mut config = Config::default();
    config.sync.enabled = false;
    config.server.enabled = false;
    config.store.database = database.to_string();
    config
}

/// Minimal valid TOML file content.
pub const MINIMAL_TOML: &str = r#"
[logging]
level = "warn"

[sync]
enabled = false
live_interval_secs = 30

[server]
enabled = false
"#;
