use clap::Parser;

use nflsync::adapter::inbound::cli::command::{CheckCommand, Cli, Commands, ConfigCommand};
use nflsync::adapter::inbound::cli::diagnostic::ConfigError;
use nflsync::adapter::inbound::cli::output::{self, OutputConfig};
use nflsync::adapter::inbound::cli::{check, config, run, trigger};
use nflsync::error::Error;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    cli.color.apply();
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    let (result, config_path) = match &cli.command {
        Commands::Run(args) => (run::execute(args).await, Some(&args.config)),
        Commands::Trigger(args) => (trigger::execute(args).await, Some(&args.config)),
        Commands::Check(CheckCommand::Config(args)) => {
            (check::execute_config(&args.config), Some(&args.config))
        }
        Commands::Config(ConfigCommand::Show(args)) => {
            (config::execute_show(&args.config), Some(&args.config))
        }
    };

    if let Err(e) = result {
        report(&e, config_path.map(|p| p.as_path()));
        std::process::exit(1);
    }
}

/// Print a failure, with source context for locatable config errors.
fn report(error: &Error, config_path: Option<&std::path::Path>) {
    if !output::is_json() {
        let diagnostic = config_path
            .and_then(|path| std::fs::read_to_string(path).ok())
            .and_then(|src| ConfigError::from_load_error(error, &src));
        if let Some(diagnostic) = diagnostic {
            eprintln!("{:?}", miette::Report::new(diagnostic));
            return;
        }
    }
    output::error(&error.to_string());
}
