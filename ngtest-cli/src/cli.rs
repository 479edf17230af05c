//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// ngtest -- functional-test runner for syslog-ng.
///
/// Use `ngtest <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "ngtest", version, about, long_about = None)]
pub struct Cli {
    /// Path to the ngtest.toml configuration file.
    #[arg(short, long, default_value = "ngtest.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the scenarios found in a directory.
    Run(RunArgs),

    /// Print the configuration a scenario renders to.
    Render(RenderArgs),

    /// Print the version of an installed syslog-ng.
    Version(VersionArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- run ----

/// Run functional-test scenarios.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Directory containing YAML scenario files.
    #[arg(default_value = "scenarios")]
    pub scenarios: PathBuf,

    /// Run scenarios marked as slow.
    #[arg(long)]
    pub runslow: bool,

    /// Run syslog-ng behind valgrind.
    #[arg(long)]
    pub run_with_valgrind: bool,

    /// Install directory of the syslog-ng under test (e.g. /home/user/syslog-ng/installdir/).
    #[arg(long)]
    pub installdir: Option<PathBuf>,

    /// Report directory (default: reports/<current_date>).
    #[arg(long)]
    pub reports: Option<PathBuf>,

    /// Only run scenarios whose name contains this string.
    #[arg(short = 'k', long)]
    pub filter: Option<String>,
}

// ---- render ----

/// Render one scenario without running it.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Scenario YAML file.
    pub scenario: PathBuf,

    /// Directory relative file paths are resolved against (default: current directory).
    #[arg(long)]
    pub working_dir: Option<PathBuf>,

    /// `@version:` value used when the scenario does not set one.
    #[arg(long)]
    pub config_version: Option<String>,
}

// ---- version ----

/// Query the installed syslog-ng version.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Install directory (default: `harness.installdir` from the configuration).
    #[arg(long)]
    pub installdir: Option<PathBuf>,
}

// ---- config ----

/// Manage ngtest configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, harness, valgrind).
        #[arg(long)]
        section: Option<String>,
    },
}
