//! Check command - validate values without saving or connecting.

use minio_artifacts_core::{
    ValidationResult, validate_container, validate_endpoint, validate_prefix,
};
use serde_json::json;

use crate::Output;
use crate::commands::print_result;
use crate::error::{CliError, CliResult};

pub fn run(
    endpoint: Option<&str>,
    container: Option<&str>,
    prefix: Option<&str>,
    output: &Output,
) -> CliResult<()> {
    let results: Vec<(&str, ValidationResult)> = [
        ("endpoint", endpoint.map(validate_endpoint)),
        ("container", container.map(validate_container)),
        ("prefix", prefix.map(validate_prefix)),
    ]
    .into_iter()
    .filter_map(|(label, result)| result.map(|r| (label, r)))
    .collect();

    if results.is_empty() {
        return Err(CliError::InvalidArgument(
            "nothing to check; pass --endpoint, --container or --prefix".into(),
        ));
    }

    if output.json {
        let report: serde_json::Map<String, serde_json::Value> = results
            .iter()
            .map(|(label, result)| (label.to_string(), json!(result)))
            .collect();
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if !output.quiet {
        for (label, result) in &results {
            print_result(label, result);
        }
    }

    let errors = results.iter().filter(|(_, r)| r.is_error()).count();
    if errors > 0 {
        return Err(CliError::Validation(format!("{errors} value(s) rejected")));
    }
    Ok(())
}
