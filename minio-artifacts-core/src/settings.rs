//! Read-only view over a store configuration.

use std::sync::Arc;

use crate::{
    BucketAddress, Field, StoreSettings, ValidationError, validate_container, validate_endpoint,
    validate_prefix,
};

/// Read accessors shared by the persisted configuration and by throwaway
/// candidates, so the same provider logic can run against either.
pub trait BucketSettings: Send + Sync {
    /// Current bucket address.
    fn address(&self) -> BucketAddress;

    /// Delete artifacts when their build is deleted.
    fn delete_artifacts(&self) -> bool;

    /// Delete stashes when their build completes.
    fn delete_stashes(&self) -> bool;

    fn endpoint(&self) -> String {
        self.address().endpoint
    }

    fn container(&self) -> String {
        self.address().container
    }

    fn prefix(&self) -> String {
        self.address().prefix
    }

    /// Every setting read at once.
    ///
    /// Implementations behind a lock override this so a concurrent update is
    /// seen entirely or not at all.
    fn snapshot(&self) -> StoreSettings {
        StoreSettings {
            address: self.address(),
            delete_artifacts: self.delete_artifacts(),
            delete_stashes: self.delete_stashes(),
        }
    }
}

impl<T: BucketSettings + ?Sized> BucketSettings for Arc<T> {
    fn address(&self) -> BucketAddress {
        (**self).address()
    }

    fn delete_artifacts(&self) -> bool {
        (**self).delete_artifacts()
    }

    fn delete_stashes(&self) -> bool {
        (**self).delete_stashes()
    }

    fn snapshot(&self) -> StoreSettings {
        (**self).snapshot()
    }
}

/// A configuration that was never persisted.
///
/// Retention flags are always off: a candidate only exists to be probed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateConfiguration {
    address: BucketAddress,
}

impl CandidateConfiguration {
    pub fn new(address: BucketAddress) -> Self {
        Self { address }
    }

    /// Run the same checks the persisted setters run, stopping at the first
    /// error.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_endpoint(&self.address.endpoint).into_result(Field::Endpoint)?;
        validate_container(&self.address.container).into_result(Field::Container)?;
        validate_prefix(&self.address.prefix).into_result(Field::Prefix)
    }
}

impl BucketSettings for CandidateConfiguration {
    fn address(&self) -> BucketAddress {
        self.address.clone()
    }

    fn delete_artifacts(&self) -> bool {
        false
    }

    fn delete_stashes(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_accessors() {
        let candidate =
            CandidateConfiguration::new(BucketAddress::new("http://minio:9000", "my-bucket", "builds/"));

        assert_eq!(candidate.endpoint(), "http://minio:9000");
        assert_eq!(candidate.container(), "my-bucket");
        assert_eq!(candidate.prefix(), "builds/");
        assert!(!candidate.delete_artifacts());
        assert!(candidate.validate().is_ok());
    }

    #[test]
    fn test_candidate_validation_reports_first_error() {
        let candidate = CandidateConfiguration::new(BucketAddress::new("nope", "BAD", "x"));
        assert_eq!(candidate.validate().unwrap_err().field, Field::Endpoint);

        let candidate =
            CandidateConfiguration::new(BucketAddress::new("http://minio:9000", "my-bucket", "x"));
        assert_eq!(candidate.validate().unwrap_err().field, Field::Prefix);
    }

    #[test]
    fn test_blank_container_is_not_an_error() {
        let candidate = CandidateConfiguration::new(BucketAddress::new("http://minio:9000", "", ""));
        assert!(candidate.validate().is_ok());
    }

    #[test]
    fn test_arc_forwarding() {
        let shared: Arc<dyn BucketSettings> = Arc::new(CandidateConfiguration::new(
            BucketAddress::new("http://minio:9000", "c", ""),
        ));
        assert_eq!(shared.container(), "c");
        assert_eq!(shared.snapshot().address.endpoint, "http://minio:9000");
        assert!(!shared.snapshot().delete_stashes);
    }
}
