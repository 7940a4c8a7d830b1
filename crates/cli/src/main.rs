//! # Multi-services dispatcher
//!
//! Command-line entry point.
//!
//! Provides:
//! - Option parsing (`--services-version`, `--arch`)
//! - Exit status: 0 once the service is spawned, 1 on any failure
//! - Spawning the versioned service, which outlives this process

mod cli;
mod commands;
mod error;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use observability::ObservabilityConfig;
use tracing::debug;

use cli::Cli;
use commands::{run_dispatch, run_list_versions};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli) {
        eprintln!("{e:#}");
        return ExitCode::FAILURE;
    }

    debug!(
        version = env!("CARGO_PKG_VERSION"),
        "Multi-services dispatcher starting"
    );

    let result = if cli.list_versions {
        run_list_versions(&cli)
    } else {
        run_dispatch(&cli)
    };

    exit_status(result)
}

/// Log a failure and map the outcome to the process exit status
fn exit_status(result: error::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging based on CLI options
fn init_logging(cli: &Cli) -> Result<()> {
    let config = ObservabilityConfig {
        log_format: cli.log_format.into(),
        ..ObservabilityConfig::default()
    }
    .with_verbosity(cli.quiet, cli.verbose);

    observability::init_with_config(config)
}
