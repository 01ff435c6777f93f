//! Error types for the CLI.

use minio_artifacts_config::ConfigError;
use minio_artifacts_core::ConfigurationError;
use minio_artifacts_s3::ProviderError;
use thiserror::Error;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// IO error (log file, stdout)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration store could not be opened
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A setting was rejected or not saved
    #[error("{0}")]
    Settings(#[from] ConfigurationError),

    /// Object store operation failed
    #[error("{0}")]
    Provider(#[from] ProviderError),

    /// Output could not be rendered
    #[error("Output error: {0}")]
    Json(#[from] serde_json::Error),

    /// Validation or probe reported an error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
