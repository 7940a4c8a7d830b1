//! Error types for CLI operations.

use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Dispatch failed for the requested version
    #[error("Failed to dispatch correct service for version {version}: {source}")]
    Dispatch {
        version: String,
        #[source]
        source: dispatcher::DispatcherError,
    },

    /// Output serialization error
    #[error("Failed to serialize output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    pub fn dispatch(version: impl Into<String>, source: dispatcher::DispatcherError) -> Self {
        Self::Dispatch {
            version: version.into(),
            source,
        }
    }
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
