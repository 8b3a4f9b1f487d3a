//! Change monitor settings and alert emails.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use synman_core::orchestrator::{ChangeReport, ConfigChange};
use synman_core::types::MonitorSettings;

use crate::cli::ConfigArgs;
use crate::config::Config;
use crate::services::Services;

pub async fn execute(args: ConfigArgs, config: &Config) -> Result<()> {
    let change = build_change(&args);
    if change.is_empty() {
        bail!("Nothing to change. Pass at least one setting or email option");
    }

    let services = Services::build(config)?;
    let report = match (&args.target.id, &args.target.name) {
        (Some(id), _) => services
            .change_config
            .change_configuration_by_id(id, &change)
            .await
            .with_context(|| format!("Failed to change monitor {}", id))?,
        (None, Some(name)) => services
            .change_config
            .change_configuration_by_name(name, &change)
            .await
            .with_context(|| format!("Failed to change monitor '{}'", name))?,
        (None, None) => bail!("Either --id or --name is required"),
    };

    print_report(&report);
    Ok(())
}

fn build_change(args: &ConfigArgs) -> ConfigChange {
    ConfigChange {
        settings: MonitorSettings {
            frequency: args.frequency,
            locations: (!args.locations.is_empty()).then(|| args.locations.clone()),
            uri: args.uri.clone(),
            status: args.status,
            name: args.rename.clone(),
        },
        alert_emails_to_add: args.add_emails.clone(),
        alert_email_to_remove: args.remove_email.clone(),
    }
}

fn print_report(report: &ChangeReport) {
    println!("{} Monitor {}", "✓".green(), report.id.bold());
    if report.settings_updated {
        println!("  Settings updated");
    }
    if report.emails_added > 0 {
        println!("  Added {} alert email(s)", report.emails_added);
    }
    if let Some(email) = &report.email_removed {
        println!("  Removed alert email {}", email);
    }
}
