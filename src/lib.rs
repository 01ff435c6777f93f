// MinIO Artifacts - an S3-compatible blob store provider for build artifacts
//
// This library bundles validated, persisted bucket settings with path-style
// SigV4 clients, reference URIs, presigned URLs and connectivity probes.

// Re-export core functionality
pub use minio_artifacts_core::*;

// Re-export the persistence layer
pub use minio_artifacts_config as config;

// Re-export the S3 transport
#[cfg(feature = "s3")]
pub use minio_artifacts_s3 as s3;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        BucketAddress, BucketSettings, CandidateConfiguration, ConfigurationError,
        SharedConfiguration, StoreConfiguration, ValidationResult, validate_container,
        validate_endpoint, validate_prefix,
    };
    pub use minio_artifacts_config::{ConfigStore, FileConfigStore, MemoryConfigStore};

    #[cfg(feature = "s3")]
    pub use minio_artifacts_s3::{
        AdminService, BlobRef, BlobStoreProvider, ConfigTester, CredentialResolver,
        CredentialsSource, ProbeResult, ProviderError,
    };
}
