//! Show command - print the saved settings.

use colored::Colorize;
use minio_artifacts_core::StoreConfiguration;

use crate::Output;
use crate::error::CliResult;

pub fn run(configuration: &StoreConfiguration, output: &Output) -> CliResult<()> {
    let settings = configuration.snapshot();

    if output.json {
        println!("{}", serde_json::to_string_pretty(&settings)?);
        return Ok(());
    }

    println!();
    println!("  {}", configuration.display_name().bright_cyan().bold());
    println!();
    println!("  {:<18} {}", "Endpoint:", settings.address.endpoint);
    println!("  {:<18} {}", "Container:", settings.address.container);
    println!("  {:<18} {}", "Prefix:", settings.address.prefix);
    println!("  {:<18} {}", "Delete artifacts:", settings.delete_artifacts);
    println!("  {:<18} {}", "Delete stashes:", settings.delete_stashes);
    if !configuration.is_configured() {
        println!();
        println!("  {} No container configured", "⚠".yellow());
    }
    println!();
    Ok(())
}
