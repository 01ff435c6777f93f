//! Bucket addressing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where artifacts live: an S3-compatible endpoint, a bucket on it and a key
/// prefix inside that bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BucketAddress {
    /// Endpoint URL of the S3-compatible server.
    #[serde(default)]
    pub endpoint: String,
    /// Bucket (container) name.
    #[serde(default)]
    pub container: String,
    /// Key prefix, empty for the bucket root or ending in `/`.
    #[serde(default)]
    pub prefix: String,
}

impl BucketAddress {
    /// Create an address.
    pub fn new(
        endpoint: impl Into<String>,
        container: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            container: container.into(),
            prefix: prefix.into(),
        }
    }

    /// Set the endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the container.
    pub fn with_container(mut self, container: impl Into<String>) -> Self {
        self.container = container.into();
        self
    }

    /// Set the prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// A bucket has been chosen.
    pub fn has_container(&self) -> bool {
        !self.container.trim().is_empty()
    }
}

impl fmt::Display for BucketAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.endpoint.trim_end_matches('/'), self.container, self.prefix)
    }
}
