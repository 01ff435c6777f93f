//! S3-compatible blob store provider for build artifacts.
//!
//! This crate provides:
//! - [`ClientFactory`], path-style SigV4 clients bound to one endpoint
//! - [`BlobStoreProvider`], reference URIs and one-hour presigned URLs
//! - [`ConfigTester`], a connectivity probe for unsaved settings
//! - [`AdminService`], the validation surface of a settings form
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use http::Method;
//! use minio_artifacts_s3::{BlobRef, BlobStoreProvider, CredentialsSource};
//!
//! # async fn example() -> minio_artifacts_s3::Result<()> {
//! let provider = BlobStoreProvider::new(Arc::new(CredentialsSource::Environment));
//!
//! let url = provider
//!     .to_external_url(&BlobRef::new("my-bucket", "builds/job-1/log.txt"), &Method::GET)
//!     .await?;
//! println!("{url}");
//! # Ok(())
//! # }
//! ```

pub mod admin;
pub mod client;
pub mod context;
pub mod credentials;
pub mod error;
pub mod provider;
pub mod tester;

pub use admin::AdminService;
pub use client::{ClientFactory, SIGNING_REGION};
pub use context::{BlobStoreContext, CreatedBucket, ObjectEntry};
pub use credentials::{AccessKeys, CredentialResolver, CredentialsSource};
pub use error::{CredentialError, ProviderError, Result};
pub use provider::{BlobRef, BlobStoreProvider, PRESIGN_VALIDITY, PROVIDER_NAME};
pub use tester::{ConfigTester, MESSAGE_LIMIT, ProbeResult, ProbeStatus};
