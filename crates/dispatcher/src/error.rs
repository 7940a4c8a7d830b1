//! Dispatcher error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Dispatcher-specific errors
///
/// Every variant is terminal for the invocation.
#[derive(Debug, Error)]
pub enum DispatcherError {
    /// No table entry for the requested version
    #[error("Don't know how to spawn services version {version}")]
    UnknownVersion { version: String },

    /// The arch tag would not form a single library subdirectory
    #[error("invalid arch '{arch}': must not contain '/', ':' or NUL")]
    InvalidArch { arch: String },

    /// Every SDK candidate was absent or empty
    #[error("Could not find candidate SDK for services version {version}")]
    NoCandidateSdk { version: String },

    /// A candidate could not be listed for a reason other than absence
    #[error("failed to enumerate SDK directory '{}': {source}", .path.display())]
    SdkEnumeration {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The OS refused to create the child process
    #[error("failed to spawn '{}': {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Search path rendering error (from contract)
    #[error("{0}")]
    Contract(#[from] contracts::ContractError),
}

impl DispatcherError {
    pub fn unknown_version(version: impl Into<String>) -> Self {
        Self::UnknownVersion {
            version: version.into(),
        }
    }

    pub fn invalid_arch(arch: impl Into<String>) -> Self {
        Self::InvalidArch { arch: arch.into() }
    }

    pub fn no_candidate_sdk(version: impl Into<String>) -> Self {
        Self::NoCandidateSdk {
            version: version.into(),
        }
    }
}
