//! Create-bucket command.

use colored::Colorize;
use minio_artifacts_s3::{AdminService, CredentialResolver};
use std::sync::Arc;

use crate::Output;
use crate::error::CliResult;

pub async fn run(
    name: &str,
    credentials: Arc<dyn CredentialResolver>,
    output: &Output,
) -> CliResult<()> {
    let admin = AdminService::new(credentials);
    let created = admin.create_bucket(name).await?;

    if output.json {
        println!("{}", serde_json::to_string_pretty(&created)?);
    } else if !output.quiet {
        println!(
            "  {} Created bucket {} on {}",
            "✔".green(),
            created.name.bold(),
            admin.provider().endpoint()
        );
    }
    Ok(())
}
