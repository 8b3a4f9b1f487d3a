//! synman - synthetic monitor manager
//!
//! Creates, imports and updates New Relic synthetic monitors whose scripts
//! live in a local directory tracked by a JSON manifest.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cli;
mod commands;
mod config;
mod error;
mod services;

use cli::{Cli, Commands};

/// Default directives, used when RUST_LOG is unset or invalid
const DEFAULT_LOG_FILTER: &str = "synman=info,synman_core=warn";

/// Log filter from RUST_LOG (`env`), falling back to the defaults.
/// `--verbose` forces debug for both crates on top of either.
fn log_filter(env: Option<&str>, verbose: bool) -> Result<EnvFilter> {
    let filter = env
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER));

    if verbose {
        Ok(filter
            .add_directive("synman=debug".parse()?)
            .add_directive("synman_core=debug".parse()?))
    } else {
        Ok(filter)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(log_filter(env.as_deref(), cli.verbose)?)
        .init();

    // Load configuration (init must work even when the current file is broken)
    let config = match cli.command {
        Commands::Init { .. } => config::Config::default(),
        _ => config::Config::load()?,
    };

    // Execute command
    match cli.command {
        Commands::Create(args) => commands::create::execute(args, &config).await,
        Commands::Update { name } => commands::update::execute(&name, &config).await,
        Commands::Import(args) => commands::import::execute(args, &config).await,
        Commands::Locations { json } => commands::locations::execute(json, &config).await,
        Commands::Config(args) => commands::configure::execute(args, &config).await,
        Commands::Emails(selector) => commands::emails::execute(selector, &config).await,
        Commands::List { json } => commands::list::execute(json, &config).await,
        Commands::Init { path, force } => commands::init::execute(path, force).await,
        Commands::Doctor => commands::doctor::execute(&config).await,
        Commands::Version => {
            println!("synman {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_rust_log() {
        let filter = log_filter(None, false).unwrap().to_string();
        assert!(filter.contains("synman=info"));
        assert!(filter.contains("synman_core=warn"));
    }

    #[test]
    fn test_rust_log_overrides_defaults() {
        let filter = log_filter(Some("synman_core=debug"), false)
            .unwrap()
            .to_string();
        assert!(filter.contains("synman_core=debug"));
        assert!(!filter.contains("synman_core=warn"));
        assert!(!filter.contains("synman=info"));
    }

    #[test]
    fn test_invalid_rust_log_falls_back_to_defaults() {
        let filter = log_filter(Some("synman=loud"), false).unwrap().to_string();
        assert!(filter.contains("synman_core=warn"));
    }

    #[test]
    fn test_verbose_forces_debug() {
        let filter = log_filter(Some("synman_core=error"), true)
            .unwrap()
            .to_string();
        assert!(filter.contains("synman=debug"));
        assert!(filter.contains("synman_core=debug"));
    }
}
