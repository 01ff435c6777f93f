//! Blob store provider.

use aws_sdk_s3::{
    Client,
    error::DisplayErrorContext,
    presigning::{PresignedRequest, PresigningConfig},
};
use http::{Method, Uri};
use minio_artifacts_core::{
    BucketSettings, Field, SharedConfiguration, ValidationError, is_valid_bucket_name,
    validate_endpoint, validation::CONTAINER_INVALID,
};
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    sync::Arc,
    time::{Duration, SystemTime},
};
use tracing::debug;
use url::{Url, form_urlencoded};

use crate::{
    BlobStoreContext, ClientFactory, CreatedBucket, CredentialResolver, ProviderError, Result,
};

/// How long presigned URLs stay valid.
pub const PRESIGN_VALIDITY: Duration = Duration::from_secs(60 * 60);

/// Provider name shown to users.
pub const PROVIDER_NAME: &str = "Minio S3";

/// A stored object: container plus full key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlobRef {
    pub container: String,
    pub name: String,
}

impl BlobRef {
    pub fn new(container: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum PresignedOperation {
    GetObject,
    PutObject,
}

impl PresignedOperation {
    fn for_method(method: &Method) -> Result<Self> {
        if *method == Method::GET {
            Ok(Self::GetObject)
        } else if *method == Method::PUT {
            Ok(Self::PutObject)
        } else {
            Err(ProviderError::UnsupportedMethod(method.clone()))
        }
    }
}

/// Artifact blob store backed by an S3-compatible server.
///
/// Reads its settings through `C` on every call: the process-wide
/// configuration in production, a [`CandidateConfiguration`] while probing.
///
/// [`CandidateConfiguration`]: minio_artifacts_core::CandidateConfiguration
pub struct BlobStoreProvider<C = SharedConfiguration> {
    settings: C,
    credentials: Arc<dyn CredentialResolver>,
    factory: ClientFactory,
}

impl BlobStoreProvider<SharedConfiguration> {
    /// Provider over the process-wide configuration.
    pub fn new(credentials: Arc<dyn CredentialResolver>) -> Self {
        Self::with_settings(SharedConfiguration, credentials)
    }
}

impl<C: BucketSettings> BlobStoreProvider<C> {
    pub fn with_settings(settings: C, credentials: Arc<dyn CredentialResolver>) -> Self {
        Self {
            settings,
            credentials,
            factory: ClientFactory::new(),
        }
    }

    pub fn settings(&self) -> &C {
        &self.settings
    }

    pub fn container(&self) -> String {
        self.settings.container()
    }

    pub fn prefix(&self) -> String {
        self.settings.prefix()
    }

    pub fn endpoint(&self) -> String {
        self.settings.endpoint()
    }

    pub fn is_delete_artifacts(&self) -> bool {
        self.settings.delete_artifacts()
    }

    pub fn is_delete_stashes(&self) -> bool {
        self.settings.delete_stashes()
    }

    pub fn display_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    /// A container has been configured.
    pub fn is_configured(&self) -> bool {
        self.settings.address().has_container()
    }

    /// Build a context for the current settings.
    ///
    /// Fails with [`ProviderError::Io`] when no credentials are available and
    /// with [`ProviderError::Validation`] when the endpoint is unusable.
    pub fn context(&self) -> Result<BlobStoreContext> {
        let address = self.settings.address();
        validate_endpoint(&address.endpoint).into_result(Field::Endpoint)?;

        let client = self.factory.client_for(&address, self.credentials.as_ref())?;
        Ok(BlobStoreContext::new(client, address))
    }

    /// Browser-facing reference `<endpoint>/minio/<container>/<key>`.
    ///
    /// The key is form-encoded with `/` and `:` left readable, so other
    /// reserved characters are escaped and a space becomes `+`. The path is
    /// kept exactly as built: `.` and `..` segments in the key are not
    /// resolved.
    pub fn to_uri(&self, container: &str, key: &str) -> Result<Uri> {
        let encoded: String = form_urlencoded::byte_serialize(key.as_bytes()).collect();
        let encoded = encoded.replace("%2F", "/").replace("%3A", ":");
        let raw = format!("{}/minio/{}/{}", self.endpoint(), container, encoded);

        Uri::try_from(raw.as_str()).map_err(|e| ProviderError::InvalidUri {
            uri: raw,
            reason: e.to_string(),
        })
    }

    /// Presigned URL granting `method` on `blob` for [`PRESIGN_VALIDITY`].
    ///
    /// Only GET and PUT are offered.
    pub async fn to_external_url(&self, blob: &BlobRef, method: &Method) -> Result<Url> {
        let operation = PresignedOperation::for_method(method)?;
        let client = self.context()?.client().clone();

        let presigning = PresigningConfig::builder()
            .start_time(SystemTime::now())
            .expires_in(PRESIGN_VALIDITY)
            .build()
            .map_err(|e| ProviderError::Presign(e.to_string()))?;

        let request = presign(&client, operation, blob, presigning).await?;
        debug!(
            container = %blob.container,
            key = %blob.name,
            method = %method,
            "Presigned object URL"
        );

        Url::parse(request.uri()).map_err(|e| ProviderError::InvalidUri {
            uri: request.uri().to_string(),
            reason: e.to_string(),
        })
    }

    /// Region constraint of `container`.
    pub async fn bucket_location(&self, container: &str) -> Result<Option<String>> {
        self.context()?.bucket_location(container).await
    }

    /// Create a bucket on the configured endpoint.
    ///
    /// The name is checked against the bucket grammar before anything is
    /// sent.
    pub async fn create_bucket(&self, name: &str) -> Result<CreatedBucket> {
        if !is_valid_bucket_name(name) {
            return Err(ValidationError {
                field: Field::Container,
                message: CONTAINER_INVALID.to_string(),
            }
            .into());
        }
        self.context()?.create_bucket(name).await
    }
}

async fn presign(
    client: &Client,
    operation: PresignedOperation,
    blob: &BlobRef,
    presigning: PresigningConfig,
) -> Result<PresignedRequest> {
    match operation {
        PresignedOperation::GetObject => client
            .get_object()
            .bucket(&blob.container)
            .key(&blob.name)
            .presigned(presigning)
            .await
            .map_err(presign_error),
        PresignedOperation::PutObject => client
            .put_object()
            .bucket(&blob.container)
            .key(&blob.name)
            .presigned(presigning)
            .await
            .map_err(presign_error),
    }
}

fn presign_error<E: std::error::Error>(err: E) -> ProviderError {
    ProviderError::Presign(DisplayErrorContext(&err).to_string())
}

impl<C: BucketSettings> fmt::Display for BlobStoreProvider<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let settings = self.settings.snapshot();
        write!(
            f,
            "MinioS3BlobStore{{container='{}', prefix='{}', endpoint='{}', deleteArtifacts='{}', deleteStashes='{}'}}",
            settings.address.container,
            settings.address.prefix,
            settings.address.endpoint,
            settings.delete_artifacts,
            settings.delete_stashes,
        )
    }
}

impl<C: BucketSettings> fmt::Debug for BlobStoreProvider<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlobStoreProvider")
            .field("address", &self.settings.address())
            .finish_non_exhaustive()
    }
}
