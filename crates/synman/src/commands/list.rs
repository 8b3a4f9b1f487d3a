//! List monitors recorded in the manifest.

use anyhow::{Context, Result};
use colored::Colorize;
use synman_core::ManifestStore;

use crate::config::Config;
use crate::services;

pub async fn execute(json: bool, config: &Config) -> Result<()> {
    let manifest = services::manifest(config);
    let entries = manifest.list().await.context("Failed to read manifest")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!(
            "{}",
            format!(
                "No monitors recorded in {}",
                config.paths.manifest_file.display()
            )
            .yellow()
        );
        return Ok(());
    }

    println!("{}", "Monitors".cyan().bold());
    println!("{}", "─".repeat(60));
    for entry in &entries {
        println!(
            "  {:<30} {} {}",
            entry.name.bold(),
            entry.filename,
            entry.id.dimmed()
        );
    }
    Ok(())
}
