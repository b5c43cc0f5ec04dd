//! Handler for `check config`.

use std::path::Path;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::cache::CacheBackend;
use crate::infrastructure::config::Config;

/// Validate a configuration file without starting anything.
pub fn execute_config<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    let config = Config::load(path)?;

    output::section("Configuration Check");
    output::field("Config", path.display());
    output::success("Configuration file is valid");

    output::section("Summary");
    output::field("Source", &config.source.base_url);
    output::field("Database", &config.store.database);
    output::field("Cache", format!("{:?}", config.cache.backend).to_lowercase());
    output::field("Scoring", config.sync.scoring_format);
    output::field(
        "Live every",
        format!("{}s", config.sync.live_interval_secs),
    );
    output::field("Rosters", &config.sync.roster_cron);
    output::field("Schedules", &config.sync.schedule_cron);

    if config.server.enabled {
        output::field("Server", &config.server.bind);
    } else {
        output::warning("WebSocket server disabled; no live updates will be pushed");
    }
    if !config.sync.enabled {
        output::warning("Scheduled sync disabled; only manual triggers will run");
    }
    if config.cache.backend == CacheBackend::Memory {
        output::field("Note", "memory cache resets on restart (first cycle re-broadcasts)");
    }

    output::success("Configuration check complete");
    Ok(())
}
