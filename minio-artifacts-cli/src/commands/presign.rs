//! Presign command - print a one-hour presigned URL.

use http::Method;
use minio_artifacts_s3::{BlobRef, BlobStoreProvider, CredentialResolver, PRESIGN_VALIDITY};
use serde_json::json;
use std::sync::Arc;

use crate::Output;
use crate::error::CliResult;

pub async fn run(
    key: &str,
    container: Option<&str>,
    method: Method,
    credentials: Arc<dyn CredentialResolver>,
    output: &Output,
) -> CliResult<()> {
    let provider = BlobStoreProvider::new(credentials);
    let container = container
        .map(str::to_string)
        .unwrap_or_else(|| provider.container());
    let blob = BlobRef::new(container, key);

    let url = provider.to_external_url(&blob, &method).await?;

    if output.json {
        println!(
            "{}",
            json!({
                "container": blob.container,
                "key": blob.name,
                "method": method.as_str(),
                "expires_in_secs": PRESIGN_VALIDITY.as_secs(),
                "url": url.as_str(),
            })
        );
    } else {
        println!("{url}");
    }
    Ok(())
}
