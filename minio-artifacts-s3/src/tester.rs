//! Connectivity probe for unsaved settings.

use minio_artifacts_core::{BucketAddress, CandidateConfiguration, ValidationResult, abbreviate};
use serde::Serialize;
use std::{fmt, sync::Arc};
use tracing::{debug, info, warn};

use crate::{BlobStoreProvider, CredentialResolver, Result};

/// Longest listing failure message reported to the caller.
pub const MESSAGE_LIMIT: usize = 200;

/// Outcome of one probe step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "lowercase")]
pub enum ProbeStatus {
    Passed,
    Failed(String),
    /// Not attempted because an earlier check failed.
    Skipped,
}

impl ProbeStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => f.write_str("passed"),
            Self::Failed(message) => write!(f, "failed: {message}"),
            Self::Skipped => f.write_str("skipped"),
        }
    }
}

/// Aggregated probe outcome.
///
/// A listing failure blocks saving the settings. A location failure alone is
/// only worth a warning: some servers do not implement GetBucketLocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeResult {
    pub listing: ProbeStatus,
    pub location: ProbeStatus,
}

impl ProbeResult {
    pub fn is_blocking(&self) -> bool {
        self.listing.is_failed()
    }

    pub fn to_validation(&self) -> ValidationResult {
        if let Some(message) = self.listing.message() {
            return ValidationResult::error(abbreviate(message, MESSAGE_LIMIT));
        }
        if let Some(message) = self.location.message() {
            return ValidationResult::warning(format!("GetBucketLocation failed: {message}"));
        }
        ValidationResult::ok_with("success")
    }
}

/// Probes a candidate endpoint / container / prefix without persisting it.
pub struct ConfigTester {
    provider: BlobStoreProvider<CandidateConfiguration>,
}

impl ConfigTester {
    pub fn new(
        endpoint: impl Into<String>,
        container: impl Into<String>,
        prefix: impl Into<String>,
        credentials: Arc<dyn CredentialResolver>,
    ) -> Self {
        Self::for_address(BucketAddress::new(endpoint, container, prefix), credentials)
    }

    pub fn for_address(address: BucketAddress, credentials: Arc<dyn CredentialResolver>) -> Self {
        Self {
            provider: BlobStoreProvider::with_settings(
                CandidateConfiguration::new(address),
                credentials,
            ),
        }
    }

    pub fn candidate(&self) -> &CandidateConfiguration {
        self.provider.settings()
    }

    /// Validate, list the container under the prefix, then ask for the
    /// bucket location.
    pub async fn probe(&self) -> ProbeResult {
        if let Err(rejected) = self.candidate().validate() {
            debug!(field = %rejected.field, "Probe skipped, settings rejected");
            return ProbeResult {
                listing: ProbeStatus::Failed(abbreviate(&rejected.to_string(), MESSAGE_LIMIT)),
                location: ProbeStatus::Skipped,
            };
        }

        let container = self.provider.container();
        let listing = match self.list(&container).await {
            Ok(entries) => {
                debug!(container = %container, entries, "Listing probe passed");
                ProbeStatus::Passed
            }
            Err(e) => {
                warn!(container = %container, error = %e, "Listing probe failed");
                ProbeStatus::Failed(abbreviate(&e.to_string(), MESSAGE_LIMIT))
            }
        };

        let location = match self.provider.bucket_location(&container).await {
            Ok(region) => {
                debug!(container = %container, region = ?region, "Location probe passed");
                ProbeStatus::Passed
            }
            Err(e) => {
                warn!(container = %container, error = %e, "GetBucketLocation failed");
                ProbeStatus::Failed(e.to_string())
            }
        };

        let result = ProbeResult { listing, location };
        info!(
            endpoint = %self.provider.endpoint(),
            container = %container,
            blocking = result.is_blocking(),
            "Configuration probe finished"
        );
        result
    }

    async fn list(&self, container: &str) -> Result<usize> {
        let prefix = self.provider.prefix();
        let entries = self.provider.context()?.list(container, &prefix).await?;
        Ok(entries.len())
    }
}
