//! Command implementations for the synman CLI.
//!
//! Each submodule implements one subcommand.

pub mod configure;
pub mod create;
pub mod doctor;
pub mod emails;
pub mod import;
pub mod init;
pub mod list;
pub mod locations;
pub mod update;

use colored::Colorize;
use synman_core::types::ManifestEntry;

use crate::config::Config;

/// Print a one-line success message followed by the monitor's script path.
pub(crate) fn print_entry(verb: &str, entry: &ManifestEntry, config: &Config, has_script: bool) {
    println!(
        "{} {} '{}' ({})",
        "✓".green(),
        verb,
        entry.name.bold(),
        entry.id.dimmed()
    );
    if has_script {
        println!(
            "  Script: {}",
            config.paths.synthetics_dir.join(&entry.filename).display()
        );
    }
}
