//! Command-line interface definitions.
//!
//! Defines the CLI structure for the nflsync application using `clap`.
//! Subcommands run the sync service, trigger a one-shot job, and inspect
//! configuration.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::SyncJobType;

/// Default configuration file path, relative to the working directory.
pub const DEFAULT_CONFIG: &str = "config.toml";

/// Scheduled NFL data sync with live fantasy scoring updates
#[derive(Parser, Debug)]
#[command(name = "nflsync")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Apply the choice to terminal styling.
    pub fn apply(&self) {
        match self {
            Self::Auto => owo_colors::unset_override(),
            Self::Always => owo_colors::set_override(true),
            Self::Never => owo_colors::set_override(false),
        }
    }
}

/// Top-level subcommands for the nflsync CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the scheduler and live event server (foreground)
    Run(RunArgs),

    /// Run one sync job immediately and print its record
    Trigger(TriggerArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `nflsync check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate the configuration file syntax and semantics.
    Config(ConfigPathArg),
}

/// Subcommands for `nflsync config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the effective configuration with defaults applied.
    Show(ConfigPathArg),
}

/// Shared argument for commands that only need a config path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to the configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Override the log level (e.g. debug, info, warn).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines.
    #[arg(long)]
    pub json_logs: bool,

    /// Override the WebSocket bind address.
    #[arg(long)]
    pub bind: Option<String>,

    /// Override the SQLite database path.
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// Disable the scheduled triggers (manual triggers only).
    #[arg(long)]
    pub no_scheduler: bool,

    /// Disable the WebSocket server.
    #[arg(long)]
    pub no_server: bool,
}

/// Arguments for the `trigger` subcommand.
#[derive(Parser, Debug)]
pub struct TriggerArgs {
    /// Job to run: players, schedules, live-scores or player-stats.
    pub job_type: SyncJobType,

    /// Path to the configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,
}
