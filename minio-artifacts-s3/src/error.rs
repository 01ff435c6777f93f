//! Provider error types.

use http::Method;
use minio_artifacts_core::ValidationError;
use std::io;
use thiserror::Error;

/// Result type for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Credentials could not be obtained.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// Nothing is configured.
    #[error("No credentials available: {0}")]
    Missing(String),

    /// Something is configured but unusable.
    #[error("Invalid credentials: {0}")]
    Invalid(String),
}

/// Blob store provider errors.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// I/O-kind failure. Credential lookup failures surface here.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration value rejected before any network call.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Presigning is only offered for GET and PUT.
    #[error("HTTP Method {0} not supported for S3")]
    UnsupportedMethod(Method),

    /// Presigned request could not be produced.
    #[error("Presign error: {0}")]
    Presign(String),

    /// A reference URI could not be built.
    #[error("Invalid URI '{uri}': {reason}")]
    InvalidUri {
        /// Rejected URI text.
        uri: String,
        /// Parser message.
        reason: String,
    },

    /// The object store returned an error or could not be reached.
    #[error("S3 {operation} failed: {message}")]
    Service {
        /// Operation name.
        operation: &'static str,
        /// Full error context from the SDK.
        message: String,
    },
}

impl ProviderError {
    /// Wrap an SDK error, keeping its whole source chain in the message.
    pub fn service<E>(operation: &'static str, err: E) -> Self
    where
        E: std::error::Error,
    {
        Self::Service {
            operation,
            message: aws_sdk_s3::error::DisplayErrorContext(&err).to_string(),
        }
    }

    /// Check if this wraps a credential lookup failure.
    pub fn is_credentials(&self) -> bool {
        match self {
            Self::Io(err) => err
                .get_ref()
                .is_some_and(|inner| inner.is::<CredentialError>()),
            _ => false,
        }
    }

    /// Check if this is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an unsupported presign method.
    pub fn is_unsupported_method(&self) -> bool {
        matches!(self, Self::UnsupportedMethod(_))
    }

    /// Check if this came from the object store.
    pub fn is_service(&self) -> bool {
        matches!(self, Self::Service { .. })
    }
}

impl From<CredentialError> for ProviderError {
    fn from(err: CredentialError) -> Self {
        Self::Io(io::Error::new(io::ErrorKind::NotFound, err))
    }
}
