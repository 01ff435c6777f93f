//! Set command - validate and save settings.
//!
//! Values are applied in field order; the first rejected or unsaved value
//! stops the command, leaving earlier ones saved.

use colored::Colorize;
use minio_artifacts_core::{StoreConfiguration, validate_container, validate_prefix};

use crate::Output;
use crate::commands::print_result;
use crate::error::{CliError, CliResult};

/// Requested changes; `None` leaves a field untouched.
#[derive(Debug, Default)]
pub struct Changes {
    pub endpoint: Option<String>,
    pub container: Option<String>,
    pub prefix: Option<String>,
    pub delete_artifacts: Option<bool>,
    pub delete_stashes: Option<bool>,
}

impl Changes {
    fn is_empty(&self) -> bool {
        self.endpoint.is_none()
            && self.container.is_none()
            && self.prefix.is_none()
            && self.delete_artifacts.is_none()
            && self.delete_stashes.is_none()
    }
}

pub fn run(configuration: &StoreConfiguration, changes: Changes, output: &Output) -> CliResult<()> {
    if changes.is_empty() {
        return Err(CliError::InvalidArgument(
            "nothing to set; pass at least one of --endpoint, --container, --prefix, --delete-artifacts, --delete-stashes".into(),
        ));
    }

    if let Some(endpoint) = changes.endpoint {
        configuration.set_endpoint(endpoint)?;
    }
    if let Some(container) = changes.container {
        // Warnings are accepted but still worth showing.
        let check = validate_container(&container);
        configuration.set_container(container)?;
        if check.is_warning() && !output.quiet {
            print_result("container", &check);
        }
    }
    if let Some(prefix) = changes.prefix {
        let check = validate_prefix(&prefix);
        configuration.set_prefix(prefix)?;
        if check.is_warning() && !output.quiet {
            print_result("prefix", &check);
        }
    }
    if let Some(delete_artifacts) = changes.delete_artifacts {
        configuration.set_delete_artifacts(delete_artifacts)?;
    }
    if let Some(delete_stashes) = changes.delete_stashes {
        configuration.set_delete_stashes(delete_stashes)?;
    }

    if output.json {
        println!("{}", serde_json::to_string_pretty(&configuration.snapshot())?);
    } else if !output.quiet {
        println!("  {} Settings saved", "✔".green());
    }
    Ok(())
}
