//! Upload a local script.

use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::Config;
use crate::services::Services;

pub async fn execute(name: &str, config: &Config) -> Result<()> {
    let services = Services::build(config)?;

    let entry = services
        .update
        .update_monitor(name)
        .await
        .with_context(|| format!("Failed to update monitor '{}'", name))?;

    println!(
        "{} Uploaded {} to '{}'",
        "✓".green(),
        config.paths.synthetics_dir.join(&entry.filename).display(),
        entry.name.bold()
    );
    Ok(())
}
