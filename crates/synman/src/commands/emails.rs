//! Show alert emails of a monitor.

use anyhow::{bail, Context, Result};
use colored::Colorize;

use crate::cli::MonitorSelector;
use crate::config::Config;
use crate::services::Services;

pub async fn execute(selector: MonitorSelector, config: &Config) -> Result<()> {
    let services = Services::build(config)?;
    let id = match (selector.id, selector.name) {
        (Some(id), _) => id,
        (None, Some(name)) => services.id_for_name(&name).await?,
        (None, None) => bail!("Either --id or --name is required"),
    };

    let emails = services
        .remote
        .get_alert_emails(&id)
        .await
        .with_context(|| format!("Failed to fetch alert emails of {}", id))?;

    if emails.is_empty() {
        println!("{}", "No alert emails".yellow());
    } else {
        for email in emails {
            println!("  {}", email);
        }
    }
    Ok(())
}
