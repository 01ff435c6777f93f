//! S3 client construction.

use aws_credential_types::Credentials;
use aws_sdk_s3::{
    Client,
    config::{BehaviorVersion, Builder, Region},
};
use minio_artifacts_core::BucketAddress;
use tracing::debug;

use crate::{AccessKeys, CredentialResolver, Result};

/// Region used for request signing. MinIO accepts any region unless one is
/// configured server-side.
pub const SIGNING_REGION: &str = "us-east-1";

/// Provider name reported by the credentials handed to the SDK.
const CREDENTIALS_PROVIDER: &str = "minio-artifacts";

/// Builds S3 clients bound to an endpoint.
///
/// Clients always use path-style addressing (`<endpoint>/<bucket>/<key>`)
/// and plain SigV4 signing. S3 Express sessions and multi-region access
/// points, which would switch the signer, are disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientFactory;

impl ClientFactory {
    pub fn new() -> Self {
        Self
    }

    /// Build a client for the endpoint of `address`, signed with `keys`.
    pub fn build_client(&self, address: &BucketAddress, keys: &AccessKeys) -> Client {
        let endpoint = address.endpoint.as_str();
        let credentials = Credentials::new(
            keys.access_key_id(),
            keys.secret_key(),
            keys.session_token().map(str::to_string),
            None,
            CREDENTIALS_PROVIDER,
        );

        let config = Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(SIGNING_REGION))
            .endpoint_url(endpoint)
            .credentials_provider(credentials)
            .force_path_style(true)
            .disable_s3_express_session_auth(true)
            .disable_multi_region_access_points(true)
            .build();

        debug!(endpoint = %endpoint, region = SIGNING_REGION, "Built S3 client");
        Client::from_conf(config)
    }

    /// Resolve credentials, then build a client for `address`.
    pub fn client_for(
        &self,
        address: &BucketAddress,
        credentials: &dyn CredentialResolver,
    ) -> Result<Client> {
        let keys = credentials.resolve()?;
        Ok(self.build_client(address, &keys))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CredentialsSource;

    #[test]
    fn test_client_signs_for_fixed_region() {
        let address = BucketAddress::new("http://minio.local:9000", "my-bucket", "");
        let client =
            ClientFactory::new().build_client(&address, &AccessKeys::new("minio", "minio123"));
        let config = client.config();

        assert_eq!(config.region().map(|r| r.as_ref()), Some(SIGNING_REGION));
    }

    #[test]
    fn test_connect_propagates_credential_failure() {
        let address = BucketAddress::new("http://minio.local:9000", "my-bucket", "");
        let err = ClientFactory::new()
            .client_for(&address, &CredentialsSource::None)
            .unwrap_err();

        assert!(err.is_credentials());
        assert!(err.to_string().contains("no credentials configured"));
    }
}
