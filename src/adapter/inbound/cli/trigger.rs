//! Handler for the `trigger` command.

use crate::adapter::inbound::cli::command::TriggerArgs;
use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::bootstrap::build_services;
use crate::infrastructure::config::Config;
use crate::port::SyncOperator;

/// Run one job to completion and print its record.
///
/// A job that ends `failed` is still printed; the command itself only
/// errors when the services cannot be built.
pub async fn execute(args: &TriggerArgs) -> Result<()> {
    let config = Config::load(&args.config)?;
    config.init_logging();

    let services = build_services(&config).await?;
    let job = services.sync.trigger(args.job_type).await?;

    output::section("Sync Job");
    output::job(&job);
    match &job.error_message {
        None if job.records_failed == 0 => output::success("Sync completed"),
        None => output::warning("Sync completed with record failures"),
        Some(message) => output::error(message),
    }
    Ok(())
}
