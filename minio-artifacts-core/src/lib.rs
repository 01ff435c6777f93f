//! Core model of the MinIO artifact store provider.
//!
//! This crate provides:
//! - [`BucketAddress`], the endpoint / bucket / prefix triple
//! - Pure validators for each field ([`validate_endpoint`],
//!   [`validate_container`], [`validate_prefix`])
//! - [`StoreConfiguration`], the persisted process-wide configuration
//! - [`BucketSettings`], the read-only view shared with throwaway
//!   [`CandidateConfiguration`]s
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use minio_artifacts_config::MemoryConfigStore;
//! use minio_artifacts_core::*;
//!
//! let configuration = StoreConfiguration::load(Arc::new(MemoryConfigStore::new()));
//! configuration.set_endpoint("http://minio.local:9000").unwrap();
//! configuration.set_container("my-bucket").unwrap();
//!
//! assert!(configuration.set_prefix("noslash").is_err());
//! assert_eq!(configuration.prefix(), "");
//! ```

pub mod address;
pub mod configuration;
pub mod error;
pub mod registry;
pub mod settings;
pub mod validation;

pub use address::BucketAddress;
pub use configuration::{
    DISPLAY_NAME, PERSISTENCE_ID, SharedConfiguration, StoreConfiguration, StoreSettings,
};
pub use error::{ConfigurationError, Result};
pub use registry::Registry;
pub use settings::{BucketSettings, CandidateConfiguration};
pub use validation::{
    Field, ValidationError, ValidationResult, abbreviate, is_valid_bucket_name,
    validate_container, validate_endpoint, validate_prefix,
};
