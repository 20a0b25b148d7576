//! # lifecycle CLI entry point
//!
//! Parses command-line arguments, loads configuration, initializes
//! logging, and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lifecycle_cli::config::CliConfig;
use lifecycle_cli::normalize::{run_normalize, NormalizeArgs};
use lifecycle_cli::validate::{run_validate, ValidateArgs};

/// Check and canonicalize storage lifecycle `<Transition>` rules.
#[derive(Parser, Debug)]
#[command(name = "lifecycle", version, about, long_about = None)]
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
    /// Decode and validate Transition fragments.
    Validate(ValidateArgs),

    /// Print the canonical form of a Transition fragment.
    Normalize(NormalizeArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Without -v, RUST_LOG decides; otherwise the flag count does.
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match CliConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::from(2);
        }
    };

    tracing::debug!(?config, "loaded configuration");

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args, &config),
        Commands::Normalize(args) => run_normalize(&args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
