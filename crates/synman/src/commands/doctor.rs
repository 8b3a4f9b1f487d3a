//! Diagnostics command.

use anyhow::Result;
use colored::Colorize;
use synman_core::ManifestStore;

use crate::config::Config;
use crate::services::{self, Services};

pub async fn execute(config: &Config) -> Result<()> {
    println!("{}", "synman Doctor".cyan().bold());
    println!("{}", "─".repeat(50));
    println!();

    let mut issues = Vec::new();

    // Check config file
    print!("  Config file: ");
    let config_path = Config::config_path();
    if config_path.exists() {
        println!("{}", format!("✓ {}", config_path.display()).green());
    } else {
        println!("{}", "○ not found (using defaults)".yellow());
    }

    // Check script directory
    print!("  Synthetics directory: ");
    if config.paths.synthetics_dir.is_dir() {
        println!("{}", "✓ exists".green());
    } else {
        println!("{}", "○ will be created".yellow());
    }

    // Check manifest
    print!("  Manifest: ");
    let manifest = services::manifest(config);
    let written = manifest.exists().await;
    match manifest.list().await {
        Ok(entries) if written => {
            println!("{}", format!("✓ {} monitor(s)", entries.len()).green())
        }
        Ok(_) => println!("{}", "○ not created yet".yellow()),
        Err(e) => {
            println!("{}", format!("✗ {}", e).red());
            issues.push("Manifest file is unreadable");
        }
    }

    // Check API key and connectivity
    print!("  API key: ");
    match Services::build(config) {
        Ok(services) => {
            println!("{}", "✓ configured".green());
            print!("  Synthetics API: ");
            match services.locations.list_locations().await {
                Ok(locations) => println!(
                    "{}",
                    format!("✓ reachable ({} locations)", locations.len()).green()
                ),
                Err(e) => {
                    println!("{}", format!("✗ {}", e).red());
                    issues.push("Synthetics API request failed");
                }
            }
        }
        Err(e) => {
            println!("{}", format!("✗ {}", e).red());
            issues.push("API key missing or client could not be built");
        }
    }

    println!();
    if issues.is_empty() {
        println!("{}", "All checks passed!".green().bold());
    } else {
        println!("{}", format!("{} issue(s) found:", issues.len()).yellow().bold());
        for issue in issues {
            println!("  • {}", issue);
        }
    }

    Ok(())
}
