//! Contract error definitions

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    /// A search-path list could not be rendered into its variable
    #[error("cannot render {variable}: {message}")]
    InvalidSearchPath { variable: String, message: String },
}

impl ContractError {
    /// Create search-path rendering error
    pub fn invalid_search_path(variable: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSearchPath {
            variable: variable.into(),
            message: message.into(),
        }
    }
}
