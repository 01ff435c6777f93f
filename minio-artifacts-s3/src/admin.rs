//! Administrative validation surface.
//!
//! What a settings form calls while the user is typing: per-field checks,
//! a full connectivity probe of unsaved values and bucket creation.

use minio_artifacts_core::{
    BucketSettings, SharedConfiguration, ValidationResult, abbreviate, validate_container,
    validate_endpoint, validate_prefix,
};
use std::sync::Arc;
use tracing::warn;

use crate::{
    BlobStoreProvider, ConfigTester, CreatedBucket, CredentialResolver, MESSAGE_LIMIT, ProbeResult,
    Result,
};

pub struct AdminService<C = SharedConfiguration> {
    provider: BlobStoreProvider<C>,
    credentials: Arc<dyn CredentialResolver>,
}

impl AdminService<SharedConfiguration> {
    pub fn new(credentials: Arc<dyn CredentialResolver>) -> Self {
        Self::with_settings(SharedConfiguration, credentials)
    }
}

impl<C: BucketSettings> AdminService<C> {
    pub fn with_settings(settings: C, credentials: Arc<dyn CredentialResolver>) -> Self {
        Self {
            provider: BlobStoreProvider::with_settings(settings, credentials.clone()),
            credentials,
        }
    }

    pub fn provider(&self) -> &BlobStoreProvider<C> {
        &self.provider
    }

    pub fn validate_endpoint(&self, endpoint: &str) -> ValidationResult {
        validate_endpoint(endpoint)
    }

    pub fn validate_container(&self, container: &str) -> ValidationResult {
        validate_container(container)
    }

    pub fn validate_prefix(&self, prefix: &str) -> ValidationResult {
        validate_prefix(prefix)
    }

    /// Probe the given values without saving them.
    pub async fn probe_configuration(
        &self,
        endpoint: &str,
        container: &str,
        prefix: &str,
    ) -> ProbeResult {
        ConfigTester::new(endpoint, container, prefix, self.credentials.clone())
            .probe()
            .await
    }

    /// Create `name` on the endpoint of the saved configuration.
    pub async fn create_bucket(&self, name: &str) -> Result<CreatedBucket> {
        self.provider.create_bucket(name).await
    }

    /// [`AdminService::create_bucket`] reported as a form result.
    pub async fn check_create_bucket(&self, name: &str) -> ValidationResult {
        match self.create_bucket(name).await {
            Ok(_) => ValidationResult::ok_with("success"),
            Err(e) => {
                warn!(bucket = %name, error = %e, "Failed to create bucket");
                ValidationResult::error(abbreviate(&e.to_string(), MESSAGE_LIMIT))
            }
        }
    }
}
