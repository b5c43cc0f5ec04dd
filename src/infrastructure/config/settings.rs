//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file with environment variable overrides
//! for deployment-specific values (`NFLSYNC_REDIS_URL`, `NFLSYNC_DATABASE`).
//!
//! # Example
//!
//! ```no_run
//! use nflsync::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::cache::{CacheBackend, CacheConfig};
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::source::SourceConfig;
use super::store::StoreConfig;
use super::sync::SyncConfig;
use crate::error::{ConfigError, Result};

/// Environment variable overriding [`CacheConfig::redis_url`].
pub const REDIS_URL_ENV: &str = "NFLSYNC_REDIS_URL";

/// Environment variable overriding [`StoreConfig::database`].
pub const DATABASE_ENV: &str = "NFLSYNC_DATABASE";

/// Main application configuration.
///
/// Every section is optional; an empty file yields the defaults. Load from a
/// TOML file using [`Config::load`] or parse directly with [`Config::parse_toml`].
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Job schedules, history size and scoring format.
    #[serde(default)]
    pub sync: SyncConfig,

    /// Change cache backend and key layout.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Upstream data feed.
    #[serde(default)]
    pub source: SourceConfig,

    /// Persistent document store.
    #[serde(default)]
    pub store: StoreConfig,

    /// WebSocket push server.
    #[serde(default)]
    pub server: ServerConfig,
}

impl Config {
    /// Parse configuration from TOML content, then apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TOML content is malformed
    /// - Validation fails (e.g., a zero polling interval)
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(REDIS_URL_ENV) {
            self.cache.redis_url = url;
        }
        if let Ok(path) = std::env::var(DATABASE_ENV) {
            self.store.database = path;
        }
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.source.base_url.is_empty() {
            return Err(ConfigError::MissingField { field: "base_url" }.into());
        }
        if let Err(e) = url::Url::parse(&self.source.base_url) {
            return Err(ConfigError::InvalidValue {
                field: "base_url",
                reason: e.to_string(),
            }
            .into());
        }
        if self.source.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.cache.backend == CacheBackend::Redis && self.cache.redis_url.is_empty() {
            return Err(ConfigError::MissingField { field: "redis_url" }.into());
        }
        if self.cache.ttl_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "ttl_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.store.database.is_empty() {
            return Err(ConfigError::MissingField { field: "database" }.into());
        }

        if self.sync.live_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "live_interval_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.sync.history_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "history_capacity",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        for (field, expr) in [
            ("roster_cron", &self.sync.roster_cron),
            ("schedule_cron", &self.sync.schedule_cron),
        ] {
            let fields = expr.split_whitespace().count();
            if !(6..=7).contains(&fields) {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("expected 6 or 7 cron fields, found {fields}"),
                }
                .into());
            }
        }

        if self.server.enabled && self.server.bind.is_empty() {
            return Err(ConfigError::MissingField { field: "bind" }.into());
        }
        if self.server.send_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "send_timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.server.channel_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "channel_capacity",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ScoringFormat;
    use crate::error::Error;

    fn invalid_field(result: Result<Config>) -> &'static str {
        match result {
            Err(Error::Config(ConfigError::InvalidValue { field, .. }))
            | Err(Error::Config(ConfigError::MissingField { field })) => field,
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn empty_file_yields_defaults() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(config.sync.live_interval_secs, 60);
        assert_eq!(config.sync.scoring_format, ScoringFormat::Ppr);
        assert_eq!(config.cache.backend, CacheBackend::Memory);
        assert_eq!(config.cache.key_prefix, "nfl:");
        assert_eq!(config.cache.ttl_secs, 86_400);
        assert_eq!(config.server.send_timeout_ms, 5_000);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn sections_override_defaults() {
        let toml = r#"
            [logging]
            level = "debug"
            format = "json"

            [sync]
            live_interval_secs = 15
            scoring_format = "half_ppr"

            [cache]
            backend = "redis"
            key_prefix = "test:"

            [server]
            bind = "0.0.0.0:9000"
        "#;
        let config = Config::parse_toml(toml).unwrap();
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.sync.live_interval_secs, 15);
        assert_eq!(config.sync.scoring_format, ScoringFormat::HalfPpr);
        assert_eq!(config.cache.backend, CacheBackend::Redis);
        assert_eq!(config.cache.key_prefix, "test:");
        assert_eq!(config.server.bind, "0.0.0.0:9000");
        assert_eq!(config.sync.roster_cron, "0 0 6 * * *");
    }

    #[test]
    fn zero_interval_is_rejected() {
        let result = Config::parse_toml("[sync]\nlive_interval_secs = 0\n");
        assert_eq!(invalid_field(result), "live_interval_secs");
    }

    #[test]
    fn short_cron_is_rejected() {
        let result = Config::parse_toml("[sync]\nroster_cron = \"0 6 * * *\"\n");
        assert_eq!(invalid_field(result), "roster_cron");
    }

    #[test]
    fn bad_base_url_is_rejected() {
        let result = Config::parse_toml("[source]\nbase_url = \"not a url\"\n");
        assert_eq!(invalid_field(result), "base_url");
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let result = Config::parse_toml("[sync\n");
        assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
    }
}
