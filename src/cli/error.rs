//! CLI error types and conversions

use crate::config::ConfigError;
use crate::fetcher::{FetcherError, SourceError};

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration error, raised before any fetch
    #[error("configuration error: {0}")]
    ConfigurationError(#[from] ConfigError),

    /// Fetcher error
    #[error("fetcher error: {0}")]
    FetcherError(#[from] FetcherError),

    /// Report serialization error
    #[error("output error: {0}")]
    OutputError(String),
}

impl From<SourceError> for CliError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Config(e) => CliError::ConfigurationError(e),
            SourceError::Fetcher(e) => CliError::FetcherError(e),
        }
    }
}
