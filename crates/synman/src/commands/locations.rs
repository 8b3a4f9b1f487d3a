//! List monitor locations.

use anyhow::{Context, Result};
use colored::Colorize;
use synman_core::types::Location;

use crate::config::Config;
use crate::services::Services;

pub async fn execute(json: bool, config: &Config) -> Result<()> {
    let services = Services::build(config)?;
    let locations = services
        .locations
        .list_locations()
        .await
        .context("Failed to list locations")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&locations)?);
        return Ok(());
    }

    if locations.is_empty() {
        println!("{}", "No locations available".yellow());
        return Ok(());
    }

    println!("{}", "Locations".cyan().bold());
    println!("{}", "─".repeat(60));
    for location in &locations {
        println!("{}", format_location(location));
    }
    Ok(())
}

fn format_location(location: &Location) -> String {
    let mut line = format!("  {:<28}", location.name);
    if let Some(label) = &location.label {
        line.push_str(label);
    }
    if location.private {
        line.push_str(" (private)");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_location() {
        let public = Location {
            name: "AWS_US_WEST_1".into(),
            label: Some("San Francisco, CA, USA".into()),
            private: false,
            description: None,
        };
        assert_eq!(
            format_location(&public).split_whitespace().collect::<Vec<_>>(),
            vec!["AWS_US_WEST_1", "San", "Francisco,", "CA,", "USA"]
        );

        let private = Location {
            name: "office".into(),
            label: None,
            private: true,
            description: None,
        };
        assert!(format_location(&private).ends_with("(private)"));
    }
}
