//! Credential resolution.
//!
//! Access keys are looked up every time a client is built, never cached, so
//! rotated keys are picked up by the next request.

use minio_artifacts_config::EnvLoader;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::CredentialError;

pub const ACCESS_KEY_VAR: &str = "AWS_ACCESS_KEY_ID";
pub const SECRET_KEY_VAR: &str = "AWS_SECRET_ACCESS_KEY";
pub const SESSION_TOKEN_VAR: &str = "AWS_SESSION_TOKEN";

/// An access key pair, optionally with a session token.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessKeys {
    access_key_id: String,
    secret_key: String,
    session_token: Option<String>,
}

impl AccessKeys {
    pub fn new(access_key_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_key: secret_key.into(),
            session_token: None,
        }
    }

    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }
}

impl fmt::Debug for AccessKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessKeys")
            .field("access_key_id", &self.access_key_id)
            .field("secret_key", &"<redacted>")
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Supplies access keys on demand.
pub trait CredentialResolver: Send + Sync {
    fn resolve(&self) -> Result<AccessKeys, CredentialError>;
}

impl<F> CredentialResolver for F
where
    F: Fn() -> Result<AccessKeys, CredentialError> + Send + Sync,
{
    fn resolve(&self) -> Result<AccessKeys, CredentialError> {
        self()
    }
}

/// Where access keys come from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CredentialsSource {
    /// Standard AWS environment variables.
    #[default]
    Environment,
    /// Fixed keys.
    Explicit {
        access_key_id: String,
        secret_key: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        session_token: Option<String>,
    },
    /// No credentials; every lookup fails.
    None,
}

impl CredentialsSource {
    pub fn explicit(access_key_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self::Explicit {
            access_key_id: access_key_id.into(),
            secret_key: secret_key.into(),
            session_token: None,
        }
    }

    fn from_environment() -> Result<AccessKeys, CredentialError> {
        let env = EnvLoader::new(None);
        let access_key_id = env
            .load_opt(ACCESS_KEY_VAR)
            .ok_or_else(|| CredentialError::Missing(format!("{ACCESS_KEY_VAR} is not set")))?;
        let secret_key = env
            .load_opt(SECRET_KEY_VAR)
            .ok_or_else(|| CredentialError::Missing(format!("{SECRET_KEY_VAR} is not set")))?;

        let keys = AccessKeys::new(access_key_id, secret_key);
        Ok(match env.load_opt(SESSION_TOKEN_VAR) {
            Some(token) => keys.with_session_token(token),
            None => keys,
        })
    }
}

impl CredentialResolver for CredentialsSource {
    fn resolve(&self) -> Result<AccessKeys, CredentialError> {
        let keys = match self {
            Self::Environment => Self::from_environment()?,
            Self::Explicit {
                access_key_id,
                secret_key,
                session_token,
            } => {
                if access_key_id.trim().is_empty() || secret_key.trim().is_empty() {
                    return Err(CredentialError::Invalid(
                        "access key id and secret key must not be blank".into(),
                    ));
                }
                AccessKeys {
                    access_key_id: access_key_id.clone(),
                    secret_key: secret_key.clone(),
                    session_token: session_token.clone(),
                }
            }
            Self::None => {
                return Err(CredentialError::Missing("no credentials configured".into()));
            }
        };

        debug!(access_key_id = %keys.access_key_id, "Resolved credentials");
        Ok(keys)
    }
}
