//! Import an existing monitor.

use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use synman_core::orchestrator::ImportTarget;
use synman_core::types::script_filename_for;
use synman_core::MonitorService;

use crate::cli::{ImportArgs, MonitorSelector};
use crate::config::Config;
use crate::services::Services;

pub async fn execute(args: ImportArgs, config: &Config) -> Result<()> {
    let services = Services::build(config)?;
    let target = target_for(&args.target)?;

    let filename = match args.filename {
        Some(filename) => filename,
        None => default_filename(&target, services.remote.as_ref()).await?,
    };

    println!("{}", format!("Importing monitor {}...", target).cyan());
    let entry = services
        .import
        .import_monitor(&target, &filename)
        .await
        .with_context(|| format!("Failed to import monitor {}", target))?;

    super::print_entry("Imported", &entry, config, !entry.filename.is_empty());
    Ok(())
}

pub(crate) fn target_for(selector: &MonitorSelector) -> Result<ImportTarget> {
    match (&selector.id, &selector.name) {
        (Some(id), _) => Ok(ImportTarget::Id(id.clone())),
        (None, Some(name)) => Ok(ImportTarget::Name(name.clone())),
        (None, None) => Err(anyhow!("Either --id or --name is required")),
    }
}

/// Script filename derived from the monitor name; ids are looked up first.
async fn default_filename(target: &ImportTarget, remote: &dyn MonitorService) -> Result<String> {
    match target {
        ImportTarget::Name(name) => Ok(script_filename_for(name)),
        ImportTarget::Id(id) => {
            let monitor = remote
                .get_monitor(id)
                .await
                .with_context(|| format!("Failed to look up monitor {}", id))?;
            Ok(script_filename_for(&monitor.name))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_takes_precedence() {
        let selector = MonitorSelector {
            id: Some("abc".into()),
            name: None,
        };
        assert_eq!(target_for(&selector).unwrap(), ImportTarget::Id("abc".into()));

        let selector = MonitorSelector {
            id: None,
            name: Some("Checkout".into()),
        };
        assert_eq!(target_for(&selector).unwrap(), ImportTarget::Name("Checkout".into()));

        let selector = MonitorSelector { id: None, name: None };
        assert!(target_for(&selector).is_err());
    }
}
