//! CLI command implementations.

use colored::Colorize;
use minio_artifacts_core::ValidationResult;

pub mod bucket;
pub mod check;
pub mod presign;
pub mod probe;
pub mod set;
pub mod show;
pub mod uri;

/// One line per checked value, marked by severity.
pub(crate) fn print_result(label: &str, result: &ValidationResult) {
    let message = result.message().unwrap_or("ok");
    match result {
        ValidationResult::Ok(_) => println!("  {} {:<10} {}", "✔".green(), label, message),
        ValidationResult::Warning(_) => {
            println!("  {} {:<10} {}", "⚠".yellow(), label, message.yellow())
        }
        ValidationResult::Error(_) => println!("  {} {:<10} {}", "✘".red(), label, message.red()),
    }
}
