// Error types for configuration loading and persistence

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration '{id}': {reason}")]
    SaveError { id: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    #[error("Environment variable error: {0}")]
    EnvError(#[from] std::env::VarError),
}

impl ConfigError {
    /// Check if this error came from writing persisted state.
    pub fn is_save(&self) -> bool {
        matches!(self, Self::SaveError { .. })
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
