//! Store context bound to a configured endpoint.

use aws_sdk_s3::Client;
use minio_artifacts_core::BucketAddress;
use serde::Serialize;
use tracing::{debug, info};

use crate::{ProviderError, Result};

/// One entry of a delimited listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectEntry {
    /// Full object key, or the common prefix for folders.
    pub key: String,
    /// Object size in bytes. Zero for folders.
    pub size: u64,
    /// A common prefix rather than an object.
    pub is_folder: bool,
}

impl ObjectEntry {
    fn object(key: impl Into<String>, size: i64) -> Self {
        Self {
            key: key.into(),
            size: u64::try_from(size).unwrap_or(0),
            is_folder: false,
        }
    }

    fn folder(prefix: impl Into<String>) -> Self {
        Self {
            key: prefix.into(),
            size: 0,
            is_folder: true,
        }
    }
}

/// A bucket created through [`BlobStoreContext::create_bucket`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedBucket {
    pub name: String,
    /// `Location` reported by the server, when any.
    pub location: Option<String>,
}

/// Ready-to-use handle on the object store.
///
/// Holds a client built for the address it was created from. Later
/// configuration changes do not affect an existing context.
#[derive(Debug, Clone)]
pub struct BlobStoreContext {
    client: Client,
    address: BucketAddress,
}

impl BlobStoreContext {
    pub fn new(client: Client, address: BucketAddress) -> Self {
        Self { client, address }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn address(&self) -> &BucketAddress {
        &self.address
    }

    /// List one level of `container` under `prefix`, folders first.
    pub async fn list(&self, container: &str, prefix: &str) -> Result<Vec<ObjectEntry>> {
        let mut folders = Vec::new();
        let mut objects = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let response = self
                .client
                .list_objects_v2()
                .bucket(container)
                .set_prefix(Some(prefix.to_string()).filter(|p| !p.is_empty()))
                .delimiter("/")
                .set_continuation_token(continuation.take())
                .send()
                .await
                .map_err(|e| ProviderError::service("ListObjectsV2", e))?;

            folders.extend(
                response
                    .common_prefixes()
                    .iter()
                    .filter_map(|p| p.prefix())
                    .map(ObjectEntry::folder),
            );
            objects.extend(response.contents().iter().filter_map(|object| {
                object
                    .key()
                    .map(|key| ObjectEntry::object(key, object.size().unwrap_or(0)))
            }));

            match response.next_continuation_token() {
                Some(token) if response.is_truncated().unwrap_or(false) => {
                    continuation = Some(token.to_string());
                }
                _ => break,
            }
        }

        debug!(
            container = %container,
            prefix = %prefix,
            folders = folders.len(),
            objects = objects.len(),
            "Listed bucket"
        );
        folders.extend(objects);
        Ok(folders)
    }

    /// Region constraint of `container`. `None` when the server reports none.
    pub async fn bucket_location(&self, container: &str) -> Result<Option<String>> {
        let response = self
            .client
            .get_bucket_location()
            .bucket(container)
            .send()
            .await
            .map_err(|e| ProviderError::service("GetBucketLocation", e))?;

        Ok(response
            .location_constraint()
            .map(|constraint| constraint.as_str().to_string())
            .filter(|location| !location.is_empty()))
    }

    pub async fn create_bucket(&self, name: &str) -> Result<CreatedBucket> {
        let response = self
            .client
            .create_bucket()
            .bucket(name)
            .send()
            .await
            .map_err(|e| ProviderError::service("CreateBucket", e))?;

        info!(bucket = %name, endpoint = %self.address.endpoint, "Created bucket");
        Ok(CreatedBucket {
            name: name.to_string(),
            location: response.location().map(str::to_string),
        })
    }
}
