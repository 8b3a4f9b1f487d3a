//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use synman_core::types::MonitorStatus;

/// Synthetic monitor manager
///
/// Keeps New Relic synthetic monitors in sync with scripts in a local directory.
#[derive(Parser, Debug)]
#[command(name = "synman")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a monitor and its local script
    Create(CreateArgs),

    /// Upload a monitor's local script
    Update {
        /// Monitor name as recorded in the manifest
        name: String,
    },

    /// Import an existing monitor and its script
    Import(ImportArgs),

    /// List the locations monitors can run from
    Locations {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Change monitor settings or alert emails
    Config(ConfigArgs),

    /// Show the alert emails of a monitor
    Emails(MonitorSelector),

    /// List monitors recorded in the manifest
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Write a configuration file with default values
    Init {
        /// Where to write it (default: ./synman.toml)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Check configuration and connectivity
    Doctor,

    /// Show version information
    Version,
}

/// Monitor addressed either by remote id or by name.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct MonitorSelector {
    /// Remote monitor id
    #[arg(long)]
    pub id: Option<String>,

    /// Monitor name
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Monitor name
    pub name: String,

    /// Location to run from (repeatable, default from config)
    #[arg(short, long = "location")]
    pub locations: Vec<String>,

    /// Monitor type: SIMPLE, BROWSER, SCRIPT_API or SCRIPT_BROWSER
    #[arg(short = 't', long = "type")]
    pub monitor_type: Option<String>,

    /// Minutes between runs
    #[arg(short, long)]
    pub frequency: Option<u32>,

    /// Script file inside the synthetics directory (default: derived from name)
    #[arg(long)]
    pub filename: Option<String>,

    /// Target URI (SIMPLE and BROWSER monitors)
    #[arg(short, long)]
    pub uri: Option<String>,

    /// Alert email (repeatable)
    #[arg(short, long = "email")]
    pub emails: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    #[command(flatten)]
    pub target: MonitorSelector,

    /// Script file inside the synthetics directory (default: derived from name)
    #[arg(long)]
    pub filename: Option<String>,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub target: MonitorSelector,

    /// Minutes between runs
    #[arg(short, long)]
    pub frequency: Option<u32>,

    /// Location to run from (repeatable, replaces the current set)
    #[arg(short, long = "location")]
    pub locations: Vec<String>,

    /// Target URI
    #[arg(short, long)]
    pub uri: Option<String>,

    /// ENABLED, DISABLED or MUTED
    #[arg(short, long, value_parser = parse_status)]
    pub status: Option<MonitorStatus>,

    /// New monitor name
    #[arg(long)]
    pub rename: Option<String>,

    /// Alert email to add (repeatable)
    #[arg(long = "add-email")]
    pub add_emails: Vec<String>,

    /// Alert email to remove
    #[arg(long = "remove-email")]
    pub remove_email: Option<String>,
}

fn parse_status(s: &str) -> Result<MonitorStatus, String> {
    s.parse().map_err(|e: synman_core::Error| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_create() {
        let cli = Cli::try_parse_from([
            "synman", "create", "Home Page", "-l", "AWS_US_EAST_1", "-l", "AWS_EU_WEST_1",
            "--type", "SCRIPT_API", "-e", "ops@example.com",
        ])
        .unwrap();

        match cli.command {
            Commands::Create(args) => {
                assert_eq!(args.name, "Home Page");
                assert_eq!(args.locations, vec!["AWS_US_EAST_1", "AWS_EU_WEST_1"]);
                assert_eq!(args.monitor_type.as_deref(), Some("SCRIPT_API"));
                assert_eq!(args.emails, vec!["ops@example.com"]);
                assert!(args.frequency.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_selector_requires_exactly_one() {
        assert!(Cli::try_parse_from(["synman", "emails"]).is_err());
        assert!(Cli::try_parse_from(["synman", "emails", "--id", "a", "--name", "b"]).is_err());
        assert!(Cli::try_parse_from(["synman", "emails", "--name", "Checkout"]).is_ok());
    }

    #[test]
    fn test_parse_config_change() {
        let cli = Cli::try_parse_from([
            "synman", "config", "--name", "Checkout", "--status", "muted", "--add-email", "a@x.io",
            "--add-email", "b@x.io", "--remove-email", "c@x.io", "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Config(args) => {
                assert_eq!(args.target.name.as_deref(), Some("Checkout"));
                assert_eq!(args.status, Some(MonitorStatus::Muted));
                assert_eq!(args.add_emails.len(), 2);
                assert_eq!(args.remove_email.as_deref(), Some("c@x.io"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_invalid_status_is_rejected() {
        let parsed = Cli::try_parse_from(["synman", "config", "--id", "x", "--status", "paused"]);
        assert!(parsed.is_err());
    }
}
