//! Probe command - connect with candidate settings and report.

use colored::Colorize;
use minio_artifacts_s3::{AdminService, CredentialResolver, ProbeStatus};
use std::sync::Arc;

use crate::Output;
use crate::commands::print_result;
use crate::error::{CliError, CliResult};

pub async fn run(
    endpoint: &str,
    container: &str,
    prefix: &str,
    credentials: Arc<dyn CredentialResolver>,
    output: &Output,
) -> CliResult<()> {
    let admin = AdminService::new(credentials);
    let result = admin.probe_configuration(endpoint, container, prefix).await;

    if output.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if !output.quiet {
        println!();
        println!("  {} {} / {}{}", "Probing".bright_cyan().bold(), endpoint, container, prefix_label(prefix));
        println!("  {:<10} {}", "listing", status_label(&result.listing));
        println!("  {:<10} {}", "location", status_label(&result.location));
        println!();
        print_result("result", &result.to_validation());
        println!();
    }

    if result.is_blocking() {
        return Err(CliError::Validation(
            result
                .to_validation()
                .message()
                .unwrap_or("probe failed")
                .to_string(),
        ));
    }
    Ok(())
}

fn prefix_label(prefix: &str) -> String {
    if prefix.is_empty() {
        String::new()
    } else {
        format!(" / {prefix}")
    }
}

fn status_label(status: &ProbeStatus) -> String {
    match status {
        ProbeStatus::Passed => "passed".green().to_string(),
        ProbeStatus::Failed(message) => format!("{} {}", "failed:".red(), message),
        ProbeStatus::Skipped => "skipped".dimmed().to_string(),
    }
}
