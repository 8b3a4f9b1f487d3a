//! Create a monitor.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use synman_core::orchestrator::NewMonitorRequest;
use synman_core::types::{script_filename_for, MonitorType};

use crate::cli::CreateArgs;
use crate::config::Config;
use crate::services::Services;

pub async fn execute(args: CreateArgs, config: &Config) -> Result<()> {
    let request = build_request(args, config)?;
    let services = Services::build(config)?;

    println!("{}", format!("Creating monitor '{}'...", request.name).cyan());
    let has_script = request.monitor_type.has_script();
    let entry = services
        .create
        .create_new_monitor(request)
        .await
        .context("Failed to create monitor")?;

    super::print_entry("Created", &entry, config, has_script);
    Ok(())
}

/// Fill unset arguments from the configured defaults.
fn build_request(args: CreateArgs, config: &Config) -> Result<NewMonitorRequest> {
    let monitor_type = MonitorType::from(
        args.monitor_type
            .unwrap_or_else(|| config.defaults.monitor_type.clone()),
    );

    if matches!(monitor_type, MonitorType::Simple | MonitorType::Browser) && args.uri.is_none() {
        bail!("--uri is required for {} monitors", monitor_type);
    }

    let locations = if args.locations.is_empty() {
        config.defaults.locations.clone()
    } else {
        args.locations
    };
    if locations.is_empty() {
        bail!("At least one --location is required");
    }

    Ok(NewMonitorRequest {
        filename: args
            .filename
            .unwrap_or_else(|| script_filename_for(&args.name)),
        name: args.name,
        locations,
        monitor_type,
        frequency: args.frequency.unwrap_or(config.defaults.frequency),
        uri: args.uri,
        alert_emails: args.emails,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(name: &str) -> CreateArgs {
        CreateArgs {
            name: name.into(),
            locations: Vec::new(),
            monitor_type: None,
            frequency: None,
            filename: None,
            uri: None,
            emails: Vec::new(),
        }
    }

    #[test]
    fn test_defaults_fill_missing_arguments() {
        let config = Config::default();

        let request = build_request(args("Home Page"), &config).unwrap();

        assert_eq!(request.filename, "home-page.js");
        assert_eq!(request.monitor_type, MonitorType::ScriptBrowser);
        assert_eq!(request.frequency, 10);
        assert_eq!(request.locations, vec!["AWS_US_WEST_1"]);
    }

    #[test]
    fn test_explicit_arguments_win() {
        let config = Config::default();
        let mut a = args("Home Page");
        a.monitor_type = Some("script_api".into());
        a.frequency = Some(1);
        a.filename = Some("custom.js".into());
        a.locations = vec!["AWS_EU_WEST_1".into()];

        let request = build_request(a, &config).unwrap();

        assert_eq!(request.monitor_type, MonitorType::ScriptApi);
        assert_eq!(request.frequency, 1);
        assert_eq!(request.filename, "custom.js");
        assert_eq!(request.locations, vec!["AWS_EU_WEST_1"]);
    }

    #[test]
    fn test_simple_monitor_needs_uri() {
        let config = Config::default();
        let mut a = args("Ping");
        a.monitor_type = Some("SIMPLE".into());
        assert!(build_request(a, &config).is_err());

        let mut a = args("Ping");
        a.monitor_type = Some("SIMPLE".into());
        a.uri = Some("https://example.com".into());
        assert!(build_request(a, &config).is_ok());
    }
}
