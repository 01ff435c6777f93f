//! Uri command - print the browser reference for an object.

use minio_artifacts_s3::{BlobStoreProvider, CredentialsSource};
use serde_json::json;
use std::sync::Arc;

use crate::Output;
use crate::error::CliResult;

pub fn run(key: &str, container: Option<&str>, output: &Output) -> CliResult<()> {
    // Building a reference never touches the network, so no keys are needed.
    let provider = BlobStoreProvider::new(Arc::new(CredentialsSource::None));
    let container = container
        .map(str::to_string)
        .unwrap_or_else(|| provider.container());
    let uri = provider.to_uri(&container, key)?;

    if output.json {
        println!("{}", json!({ "container": container, "key": key, "uri": uri.to_string() }));
    } else {
        println!("{uri}");
    }
    Ok(())
}
