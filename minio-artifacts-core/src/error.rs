//! Configuration error types.

use minio_artifacts_config::ConfigError;
use thiserror::Error;

use crate::{Field, ValidationError};

/// Result type for configuration mutations.
pub type Result<T> = std::result::Result<T, ConfigurationError>;

/// A configuration mutation did not take effect.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The new value failed validation. Nothing changed.
    #[error("{0}")]
    Rejected(#[from] ValidationError),

    /// The new value was valid but could not be saved. Memory still holds
    /// `kept`, the last persisted value of `field`.
    #[error("Failed to persist {field} (kept '{kept}'): {source}")]
    Persistence {
        /// Field being set.
        field: Field,
        /// Value still in effect.
        kept: String,
        /// Underlying store error.
        #[source]
        source: ConfigError,
    },
}

impl ConfigurationError {
    /// Check if this is a validation rejection.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    /// Check if this is a persistence failure.
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence { .. })
    }

    /// Field the failed mutation targeted.
    pub fn field(&self) -> Field {
        match self {
            Self::Rejected(err) => err.field,
            Self::Persistence { field, .. } => *field,
        }
    }

    /// Human-readable reason, straight from the validator when rejected.
    pub fn reason(&self) -> String {
        match self {
            Self::Rejected(err) => err.message.clone(),
            Self::Persistence { source, .. } => source.to_string(),
        }
    }
}
