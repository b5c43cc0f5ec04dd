//! Handler for `config show`.

use std::path::Path;

use crate::adapter::inbound::cli::output;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::Config;

/// Print the effective configuration with defaults and overrides applied.
///
/// A missing file shows the defaults.
pub fn execute_show<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    let config = if path.exists() {
        Config::load(path)?
    } else {
        output::warning(&format!("{} not found, showing defaults", path.display()));
        Config::parse_toml("")?
    };

    let rendered = toml::to_string_pretty(&config).map_err(|e| ConfigError::InvalidValue {
        field: "config",
        reason: e.to_string(),
    })?;
    output::document("config", &rendered, serde_json::to_value(&config)?);
    Ok(())
}
