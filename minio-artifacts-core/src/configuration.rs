//! The persisted store configuration.
//!
//! One [`StoreConfiguration`] lives per process, held by the global
//! [`Registry`]. Every setter validates its value, saves the whole
//! configuration through the [`ConfigStore`], and only then updates memory,
//! all under one mutex. A rejected or unsaved value never becomes visible.

use minio_artifacts_config::{ConfigError, ConfigStore, FileConfigStore, MemoryConfigStore};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{
    BucketAddress, BucketSettings, ConfigurationError, Field, Registry, Result, ValidationResult,
    validate_container, validate_endpoint, validate_prefix,
};

/// Identity under which the configuration is persisted.
pub const PERSISTENCE_ID: &str = "minio-s3-blob-store";

/// Display name of the configuration page.
pub const DISPLAY_NAME: &str = "Minio S3 Bucket Access settings";

/// Serialized form of the configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(flatten)]
    pub address: BucketAddress,
    /// Delete artifacts when their build is deleted.
    #[serde(default)]
    pub delete_artifacts: bool,
    /// Delete stashes when their build completes.
    #[serde(default)]
    pub delete_stashes: bool,
}

impl StoreSettings {
    fn value_of(&self, field: Field) -> String {
        match field {
            Field::Endpoint => self.address.endpoint.clone(),
            Field::Container => self.address.container.clone(),
            Field::Prefix => self.address.prefix.clone(),
            Field::DeleteArtifacts => self.delete_artifacts.to_string(),
            Field::DeleteStashes => self.delete_stashes.to_string(),
        }
    }
}

/// Mutable, persisted configuration of the blob store.
pub struct StoreConfiguration {
    settings: Mutex<StoreSettings>,
    store: Arc<dyn ConfigStore>,
}

impl StoreConfiguration {
    /// Load persisted state from `store`, falling back to defaults.
    ///
    /// The returned instance is not registered; use [`StoreConfiguration::install`]
    /// to make it the process-wide one.
    pub fn load(store: Arc<dyn ConfigStore>) -> Self {
        let settings = match store.load(PERSISTENCE_ID) {
            Ok(Some(document)) => match serde_json::from_value(document) {
                Ok(settings) => settings,
                Err(e) => {
                    warn!(error = %e, "Persisted configuration is unreadable, using defaults");
                    StoreSettings::default()
                }
            },
            Ok(None) => {
                debug!("No persisted configuration, using defaults");
                StoreSettings::default()
            }
            Err(e) => {
                warn!(error = %e, "Failed to load configuration, using defaults");
                StoreSettings::default()
            }
        };

        Self {
            settings: Mutex::new(settings),
            store,
        }
    }

    /// The process-wide configuration, loaded on first access.
    ///
    /// Without a prior [`StoreConfiguration::install`], state is loaded from
    /// [`FileConfigStore::from_env`].
    pub fn get() -> Arc<Self> {
        Registry::global().get_or_init(|| match FileConfigStore::from_env() {
            Ok(store) => Self::load(Arc::new(store)),
            Err(e) => {
                warn!(error = %e, "Configuration directory unavailable, keeping settings in memory");
                Self::load(Arc::new(MemoryConfigStore::new()))
            }
        })
    }

    /// Load from `store` and make the result the process-wide configuration.
    pub fn install(store: Arc<dyn ConfigStore>) -> Arc<Self> {
        let configuration = Arc::new(Self::load(store));
        Registry::global().register(configuration.clone());
        configuration
    }

    /// Copy of the current settings.
    pub fn snapshot(&self) -> StoreSettings {
        self.settings.lock().clone()
    }

    /// A container has been configured.
    pub fn is_configured(&self) -> bool {
        self.settings.lock().address.has_container()
    }

    pub fn display_name(&self) -> &'static str {
        DISPLAY_NAME
    }

    pub fn set_endpoint(&self, endpoint: impl Into<String>) -> Result<()> {
        let endpoint = endpoint.into();
        let check = validate_endpoint(&endpoint);
        self.update(Field::Endpoint, check, |s| s.address.endpoint = endpoint)
    }

    pub fn set_container(&self, container: impl Into<String>) -> Result<()> {
        let container = container.into();
        let check = validate_container(&container);
        self.update(Field::Container, check, |s| s.address.container = container)
    }

    pub fn set_prefix(&self, prefix: impl Into<String>) -> Result<()> {
        let prefix = prefix.into();
        let check = validate_prefix(&prefix);
        self.update(Field::Prefix, check, |s| s.address.prefix = prefix)
    }

    pub fn set_delete_artifacts(&self, delete_artifacts: bool) -> Result<()> {
        self.update(Field::DeleteArtifacts, ValidationResult::ok(), |s| {
            s.delete_artifacts = delete_artifacts
        })
    }

    pub fn set_delete_stashes(&self, delete_stashes: bool) -> Result<()> {
        self.update(Field::DeleteStashes, ValidationResult::ok(), |s| {
            s.delete_stashes = delete_stashes
        })
    }

    /// Validate, persist, then commit one field change.
    fn update<F>(&self, field: Field, check: ValidationResult, apply: F) -> Result<()>
    where
        F: FnOnce(&mut StoreSettings),
    {
        let mut settings = self.settings.lock();

        if let Err(rejected) = check.into_result(field) {
            debug!(field = %field, reason = %rejected.message, "Configuration change rejected");
            return Err(rejected.into());
        }

        let mut candidate = settings.clone();
        apply(&mut candidate);

        let saved = serde_json::to_value(&candidate)
            .map_err(|e| ConfigError::SerializationError(e.to_string()))
            .and_then(|document| self.store.save(PERSISTENCE_ID, &document));

        if let Err(source) = saved {
            warn!(field = %field, error = %source, "Configuration change not persisted");
            return Err(ConfigurationError::Persistence {
                field,
                kept: settings.value_of(field),
                source,
            });
        }

        *settings = candidate;
        info!(field = %field, "Configuration updated");
        Ok(())
    }
}

impl BucketSettings for StoreConfiguration {
    fn address(&self) -> BucketAddress {
        self.settings.lock().address.clone()
    }

    fn delete_artifacts(&self) -> bool {
        self.settings.lock().delete_artifacts
    }

    fn delete_stashes(&self) -> bool {
        self.settings.lock().delete_stashes
    }

    fn snapshot(&self) -> StoreSettings {
        StoreConfiguration::snapshot(self)
    }
}

/// Production settings source: reads through to [`StoreConfiguration::get`]
/// on every access, so a re-installed configuration is picked up.
#[derive(Debug, Clone, Copy, Default)]
pub struct SharedConfiguration;

impl BucketSettings for SharedConfiguration {
    fn address(&self) -> BucketAddress {
        StoreConfiguration::get().address()
    }

    fn delete_artifacts(&self) -> bool {
        StoreConfiguration::get().delete_artifacts()
    }

    fn delete_stashes(&self) -> bool {
        StoreConfiguration::get().delete_stashes()
    }

    fn snapshot(&self) -> StoreSettings {
        StoreConfiguration::get().snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn configuration() -> (Arc<MemoryConfigStore>, StoreConfiguration) {
        let store = Arc::new(MemoryConfigStore::new());
        let configuration = StoreConfiguration::load(store.clone());
        (store, configuration)
    }

    #[test]
    fn test_defaults_when_nothing_persisted() {
        let (_, configuration) = configuration();

        assert_eq!(configuration.snapshot(), StoreSettings::default());
        assert!(!configuration.is_configured());
    }

    #[test]
    fn test_setters_persist() {
        let (store, configuration) = configuration();

        configuration.set_endpoint("http://minio.local:9000").unwrap();
        configuration.set_container("my-bucket").unwrap();
        configuration.set_prefix("builds/").unwrap();
        configuration.set_delete_artifacts(true).unwrap();
        configuration.set_delete_stashes(true).unwrap();

        assert_eq!(configuration.container(), "my-bucket");
        assert!(configuration.is_configured());
        assert_eq!(
            store.document(PERSISTENCE_ID).unwrap(),
            json!({
                "endpoint": "http://minio.local:9000",
                "container": "my-bucket",
                "prefix": "builds/",
                "delete_artifacts": true,
                "delete_stashes": true,
            })
        );
    }

    #[test]
    fn test_rejected_container_leaves_state_unchanged() {
        let (store, configuration) = configuration();
        configuration.set_container("my-bucket").unwrap();
        let persisted = store.document(PERSISTENCE_ID);

        let err = configuration.set_container("BAD_NAME!").unwrap_err();

        assert!(err.is_rejected());
        assert_eq!(err.field(), Field::Container);
        assert_eq!(err.reason(), crate::validation::CONTAINER_INVALID);
        assert_eq!(configuration.container(), "my-bucket");
        assert_eq!(store.document(PERSISTENCE_ID), persisted);
    }

    #[test]
    fn test_rejected_prefix_and_endpoint() {
        let (_, configuration) = configuration();

        let err = configuration.set_prefix("noslash").unwrap_err();
        assert!(err.reason().contains("must end with a slash"));
        assert_eq!(configuration.prefix(), "");

        assert!(configuration.set_endpoint("not a url").is_err());
        assert_eq!(configuration.endpoint(), "");
    }

    #[test]
    fn test_warnings_are_accepted() {
        let (_, configuration) = configuration();
        configuration.set_container("my-bucket").unwrap();

        configuration.set_container("").unwrap();
        configuration.set_prefix("").unwrap();

        assert_eq!(configuration.container(), "");
        assert!(!configuration.is_configured());
    }

    #[test]
    fn test_persistence_failure_keeps_memory() {
        let store = Arc::new(MemoryConfigStore::with_document(
            PERSISTENCE_ID,
            json!({"container": "old-bucket"}),
        ));
        let seeded = StoreConfiguration::load(store);
        assert_eq!(seeded.container(), "old-bucket");

        let configuration = StoreConfiguration {
            settings: Mutex::new(seeded.snapshot()),
            store: Arc::new(MemoryConfigStore::read_only()),
        };

        let err = configuration.set_container("new-bucket").unwrap_err();
        match &err {
            ConfigurationError::Persistence { field, kept, source } => {
                assert_eq!(*field, Field::Container);
                assert_eq!(kept, "old-bucket");
                assert!(source.is_save());
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(configuration.container(), "old-bucket");
    }

    #[test]
    fn test_unreadable_document_falls_back_to_defaults() {
        let store = Arc::new(MemoryConfigStore::with_document(
            PERSISTENCE_ID,
            json!({"delete_artifacts": "sometimes"}),
        ));
        let configuration = StoreConfiguration::load(store);
        assert_eq!(configuration.snapshot(), StoreSettings::default());
    }

    #[test]
    fn test_concurrent_setters_serialize() {
        let (store, configuration) = configuration();
        let configuration = Arc::new(configuration);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let configuration = configuration.clone();
                std::thread::spawn(move || {
                    configuration.set_container(format!("bucket-{i}")).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let persisted = store.document(PERSISTENCE_ID).unwrap();
        assert_eq!(persisted["container"], json!(configuration.container()));
    }

    #[test]
    fn test_settings_snapshot_is_one_read() {
        let (_store, configuration) = configuration();
        configuration.set_container("my-bucket").unwrap();
        configuration.set_delete_stashes(true).unwrap();

        let settings = BucketSettings::snapshot(&configuration);
        assert_eq!(settings, configuration.snapshot());
        assert_eq!(settings.address.container, "my-bucket");
        assert!(settings.delete_stashes);
    }
}
