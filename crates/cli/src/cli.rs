//! CLI argument definitions using clap.

use clap::{Parser, ValueEnum};

/// Multiplexer for versioned knowledge services
#[derive(Parser, Debug)]
#[command(
    name = "eks-multi-services-dispatcher",
    author,
    version,
    about = "Multiplexer for versioned knowledge services",
    long_about = "Picks the highest-priority installed SDK for the requested services \n\
                  version, sets PATH, LD_LIBRARY_PATH and XDG_DATA_DIRS accordingly and \n\
                  spawns the versioned service binary. The service inherits every open \n\
                  file descriptor and outlives this process."
)]
pub struct Cli {
    /// The arch to use when searching library paths with an arch-triple
    #[arg(long, value_name = "ARCH")]
    pub arch: Option<String>,

    /// The services version to dispatch to
    #[arg(long, value_name = "VERSION", required_unless_present = "list_versions")]
    pub services_version: Option<String>,

    /// Resolve the SDK and print the spawn request without spawning
    #[arg(long, conflicts_with = "list_versions")]
    pub dry_run: bool,

    /// Print the active dispatch table and exit
    #[arg(long)]
    pub list_versions: bool,

    /// Print `--dry-run` / `--list-versions` output as JSON
    #[arg(long)]
    pub json: bool,

    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, env = "EKS_DISPATCHER_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "compact",
        env = "EKS_DISPATCHER_LOG_FORMAT"
    )]
    pub log_format: LogFormat,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}
