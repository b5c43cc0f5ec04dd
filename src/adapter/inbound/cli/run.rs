//! Handler for the `run` command.

use std::path::Path;

use tokio::signal;
use tokio::sync::watch;
use tracing::info;

use crate::adapter::inbound::cli::command::RunArgs;
use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::Config;
use crate::infrastructure::runtime;

/// Execute the run command.
pub async fn execute(args: &RunArgs) -> Result<()> {
    let mut config = Config::load(&args.config)?;
    apply_overrides(&mut config, args, output::is_json());
    config.init_logging();

    print_startup(&config, &args.config);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut app = tokio::spawn(async move { runtime::run_with_shutdown(config, shutdown_rx).await });

    tokio::select! {
        result = &mut app => {
            return finish(result);
        }
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received (Ctrl+C)");
            let _ = shutdown_tx.send(true);
        }
    }

    finish(app.await)
}

fn finish(result: std::result::Result<Result<()>, tokio::task::JoinError>) -> Result<()> {
    match result {
        Ok(result) => {
            result?;
            info!("nflsync stopped");
            Ok(())
        }
        Err(e) => Err(std::io::Error::other(e.to_string()).into()),
    }
}

fn apply_overrides(config: &mut Config, args: &RunArgs, force_json_logs: bool) {
    if let Some(level) = &args.log_level {
        config.logging.level.clone_from(level);
    }
    if args.json_logs || force_json_logs {
        config.logging.format = "json".into();
    }
    if let Some(bind) = &args.bind {
        config.server.bind.clone_from(bind);
    }
    if let Some(database) = &args.database {
        config.store.database = database.to_string_lossy().to_string();
    }
    if args.no_scheduler {
        config.sync.enabled = false;
    }
    if args.no_server {
        config.server.enabled = false;
    }
}

fn print_startup(config: &Config, path: &Path) {
    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Config", path.display());
    output::field("Source", &config.source.base_url);
    output::field("Database", &config.store.database);
    output::field("Scoring", config.sync.scoring_format);
    if config.server.enabled {
        output::field("Listening", &config.server.bind);
    }
    if config.sync.enabled {
        output::field(
            "Live every",
            format!("{}s", config.sync.live_interval_secs),
        );
    } else {
        output::warning("Scheduled sync disabled");
    }
    if output::verbosity() > 0 {
        output::field("Rosters", &config.sync.roster_cron);
        output::field("Schedules", &config.sync.schedule_cron);
        output::field("Cache TTL", format!("{}s", config.cache.ttl_secs));
    }
}
