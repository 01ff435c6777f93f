//! Persistence collaborators for configuration entities.
//!
//! A [`ConfigStore`] keeps one serialized document per identity. The
//! identity is chosen by the owning type, so several configuration entities
//! can share one store without colliding.

use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::{ConfigError, ConfigLoader, EnvLoader, FileFormat, Result};

/// Load/save facility keyed by configuration identity.
pub trait ConfigStore: Send + Sync {
    /// Load the persisted document for `id`, or `None` if nothing was saved yet.
    fn load(&self, id: &str) -> Result<Option<Value>>;

    /// Replace the persisted document for `id`.
    fn save(&self, id: &str, value: &Value) -> Result<()>;
}

/// File-backed store: one `<id>.<ext>` file per identity inside a directory.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    directory: PathBuf,
    format: FileFormat,
}

impl FileConfigStore {
    /// Create a store rooted at `directory`.
    pub fn new(directory: impl Into<PathBuf>, format: FileFormat) -> Self {
        Self {
            directory: directory.into(),
            format,
        }
    }

    /// Build a store from `MINIO_ARTIFACTS_CONFIG_DIR` and
    /// `MINIO_ARTIFACTS_CONFIG_FORMAT`.
    pub fn from_env() -> Result<Self> {
        let env = EnvLoader::scoped();
        let directory = env.load_var_or("CONFIG_DIR", ".");
        let format = match env.load_opt("CONFIG_FORMAT") {
            Some(raw) => FileFormat::from_extension(&raw)
                .ok_or(ConfigError::UnsupportedFormat(raw))?,
            None => FileFormat::default(),
        };
        Ok(Self::new(directory, format))
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the file holding `id`.
    pub fn path_for(&self, id: &str) -> PathBuf {
        self.directory
            .join(format!("{}.{}", id, self.format.extension()))
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self, id: &str) -> Result<Option<Value>> {
        let path = self.path_for(id);
        if !path.exists() {
            debug!(path = %path.display(), "No persisted configuration");
            return Ok(None);
        }

        ConfigLoader::new(self.format).load_file(&path).map(Some)
    }

    fn save(&self, id: &str, value: &Value) -> Result<()> {
        let save_error = |reason: String| ConfigError::SaveError {
            id: id.to_string(),
            reason,
        };

        let rendered = ConfigLoader::new(self.format).render(value)?;

        fs::create_dir_all(&self.directory).map_err(|e| save_error(e.to_string()))?;

        // Write next to the target and rename so readers never see a torn file.
        let mut tmp = tempfile::NamedTempFile::new_in(&self.directory)
            .map_err(|e| save_error(e.to_string()))?;
        tmp.write_all(rendered.as_bytes())
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| save_error(e.to_string()))?;

        let path = self.path_for(id);
        tmp.persist(&path).map_err(|e| save_error(e.error.to_string()))?;

        info!(path = %path.display(), "Configuration saved");
        Ok(())
    }
}

/// In-memory store for hosts that persist elsewhere, and for tests.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    documents: RwLock<HashMap<String, Value>>,
    read_only: bool,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one document.
    pub fn with_document(id: impl Into<String>, value: Value) -> Self {
        let store = Self::new();
        store.documents.write().insert(id.into(), value);
        store
    }

    /// Store whose saves always fail.
    pub fn read_only() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
            read_only: true,
        }
    }

    /// Current document for `id`, if any.
    pub fn document(&self, id: &str) -> Option<Value> {
        self.documents.read().get(id).cloned()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self, id: &str) -> Result<Option<Value>> {
        Ok(self.document(id))
    }

    fn save(&self, id: &str, value: &Value) -> Result<()> {
        if self.read_only {
            return Err(ConfigError::SaveError {
                id: id.to_string(),
                reason: "store is read-only".to_string(),
            });
        }
        self.documents.write().insert(id.to_string(), value.clone());
        Ok(())
    }
}
