// Environment variable loading

use crate::{ConfigError, Result};
use std::env;

/// Prefix shared by every variable the provider reads.
pub const ENV_PREFIX: &str = "MINIO_ARTIFACTS";

/// Environment variable loader
pub struct EnvLoader {
    prefix: Option<String>,
}

impl EnvLoader {
    /// Create a new environment loader
    pub fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    /// Loader scoped to [`ENV_PREFIX`].
    pub fn scoped() -> Self {
        Self::new(Some(ENV_PREFIX.to_string()))
    }

    /// Full variable name for a key, with the prefix applied
    pub fn var_name(&self, key: &str) -> String {
        if let Some(ref prefix) = self.prefix {
            format!("{}_{}", prefix, key.to_uppercase())
        } else {
            key.to_uppercase()
        }
    }

    /// Load a specific environment variable
    pub fn load_var(&self, key: &str) -> Result<String> {
        env::var(self.var_name(key)).map_err(ConfigError::EnvError)
    }

    /// Load a variable, treating unset and blank the same way
    pub fn load_opt(&self, key: &str) -> Option<String> {
        self.load_var(key).ok().filter(|v| !v.trim().is_empty())
    }

    /// Load with default value
    pub fn load_var_or(&self, key: &str, default: &str) -> String {
        self.load_opt(key).unwrap_or_else(|| default.to_string())
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::scoped()
    }
}

/// Load a `.env` file into the process environment.
///
/// A missing default `.env` is not an error; an explicit path that cannot be
/// read is.
pub fn load_dotenv(path: Option<&str>) -> Result<()> {
    if let Some(path) = path {
        dotenvy::from_path(path).map_err(|e| ConfigError::LoadError(e.to_string()))?;
    } else {
        dotenvy::dotenv().ok();
    }
    Ok(())
}
