//! Write a default configuration file.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use colored::Colorize;

use crate::config::{Config, LOCAL_CONFIG_FILE};

pub async fn execute(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = path.unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE));
    write_default(&path, force)?;

    println!("{} Wrote {}", "✓".green(), path.display());
    println!("  Set api.api_key or export SYNMAN_API_KEY before running remote commands");
    Ok(())
}

fn write_default(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    let config = Config::default();
    config
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    let scripts = path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(&config.paths.synthetics_dir);
    std::fs::create_dir_all(&scripts)
        .with_context(|| format!("Failed to create {}", scripts.display()))?;
    Ok(())
}
