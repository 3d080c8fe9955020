//! # pwa-studio CLI entry point
//!
//! Parses command-line arguments, loads configuration, installs the
//! tracing subscriber and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pwa_cli::config::StudioConfig;
use pwa_cli::field::{run_field, FieldArgs};
use pwa_cli::fix::{run_fix, FixArgs};
use pwa_cli::missing::{run_missing, MissingArgs};
use pwa_cli::rules::run_rules;
use pwa_cli::validate::{run_validate, ValidateArgs};
use pwa_cli::EXIT_GATE_FAILED;

/// PWA Studio: web app manifest validation.
///
/// Checks a manifest against the PWA rule catalog, reports what blocks
/// packaging, and applies the fixes it can.
#[derive(Parser, Debug)]
#[command(name = "pwa-studio", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a manifest and print the report.
    Validate(ValidateArgs),

    /// Apply quick fixes and write the manifest back.
    Fix(FixArgs),

    /// Check one member value in isolation.
    Field(FieldArgs),

    /// List members the manifest does not declare.
    Missing(MissingArgs),

    /// Print the rule catalog.
    Rules,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("pwa-studio starting");

    let config = match StudioConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::from(EXIT_GATE_FAILED);
        }
    };

    let result = match &cli.command {
        Commands::Validate(args) => run_validate(args, &config),
        Commands::Fix(args) => run_fix(args, &config),
        Commands::Field(args) => run_field(args, &config),
        Commands::Missing(args) => run_missing(args, &config),
        Commands::Rules => run_rules(&config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_GATE_FAILED)
        }
    }
}
