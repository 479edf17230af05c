//! ngtest -- functional-test runner for syslog-ng.

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::Parser;

use ngtest_core::config::{GeneralConfig, NgtestConfig};

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Commands reload the configuration themselves, so a broken file is
    // reported there with its proper exit code.
    let mut general = NgtestConfig::load_or_default(&cli.config)
        .await
        .map(|config| config.general)
        .unwrap_or_else(|_| GeneralConfig::default());
    if let Some(ref level) = cli.log_level {
        general.log_level = level.clone();
    }

    if let Err(e) = logging::init_tracing(&general) {
        eprintln!("error: {e:#}");
        std::process::exit(2);
    }

    if let Err(e) = run(cli).await {
        tracing::debug!(error = %e, exit_code = e.exit_code(), "command failed");
        eprintln!("error: {e}");
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let writer = OutputWriter::new(cli.output);

    match cli.command {
        Commands::Run(args) => commands::run::execute(args, &cli.config, &writer).await,
        Commands::Render(args) => commands::render::execute(args, &writer).await,
        Commands::Version(args) => commands::version::execute(args, &cli.config, &writer).await,
        Commands::Config(args) => commands::config::execute(args, &cli.config, &writer).await,
    }
}
