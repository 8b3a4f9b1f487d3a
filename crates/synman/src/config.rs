//! Configuration management for synman.
//!
//! Configuration is loaded from multiple sources with precedence:
//! 1. Environment variables (SYNMAN_API_KEY, NEW_RELIC_API_KEY)
//! 2. Config file ($SYNMAN_CONFIG, ./synman.toml, or the user config dir)
//! 3. Default values

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use synman_core::client::{ClientConfig, DEFAULT_V1_URL, DEFAULT_V3_URL};
use synman_core::orchestrator::DEFAULT_SCRIPT_TEMPLATE;
use tracing::debug;

use crate::error::{SynmanError, SynmanResult};

/// Config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "synman.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Synthetics API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Local paths
    #[serde(default)]
    pub paths: PathsConfig,

    /// Defaults for new monitors
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Admin API key
    pub api_key: Option<String>,

    /// v3 endpoint (monitors, scripts)
    #[serde(default = "default_v3_url")]
    pub v3_url: String,

    /// v1 endpoint (locations, alert notifications)
    #[serde(default = "default_v1_url")]
    pub v1_url: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding monitor scripts
    #[serde(default = "default_synthetics_dir")]
    pub synthetics_dir: PathBuf,

    /// Manifest mapping monitor names to ids and scripts
    #[serde(default = "default_manifest_file")]
    pub manifest_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Monitor type used when `--type` is omitted
    #[serde(default = "default_monitor_type")]
    pub monitor_type: String,

    /// Minutes between runs
    #[serde(default = "default_frequency")]
    pub frequency: u32,

    /// Locations used when `--location` is omitted
    #[serde(default = "default_locations")]
    pub locations: Vec<String>,

    /// Content of newly created scripts
    #[serde(default = "default_script_template")]
    pub script_template: String,
}

// Default value functions
fn default_v3_url() -> String {
    DEFAULT_V3_URL.to_string()
}

fn default_v1_url() -> String {
    DEFAULT_V1_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_synthetics_dir() -> PathBuf {
    PathBuf::from("synthetics")
}

fn default_manifest_file() -> PathBuf {
    PathBuf::from("synthetics.json")
}

fn default_monitor_type() -> String {
    "SCRIPT_BROWSER".to_string()
}

fn default_frequency() -> u32 {
    10
}

fn default_locations() -> Vec<String> {
    vec!["AWS_US_WEST_1".to_string()]
}

fn default_script_template() -> String {
    DEFAULT_SCRIPT_TEMPLATE.to_string()
}

fn user_config_dir() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", "synman", "synman") {
        proj_dirs.config_dir().to_path_buf()
    } else {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".synman")
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            v3_url: default_v3_url(),
            v1_url: default_v1_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            synthetics_dir: default_synthetics_dir(),
            manifest_file: default_manifest_file(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            monitor_type: default_monitor_type(),
            frequency: default_frequency(),
            locations: default_locations(),
            script_template: default_script_template(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path())?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration from `path`, falling back to defaults when absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            debug!("Loading config from {}", path.display());
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            let config = toml::from_str(&content)
                .map_err(SynmanError::from)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Apply environment overrides through `lookup`.
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup("SYNMAN_API_KEY").or_else(|| lookup("NEW_RELIC_API_KEY")) {
            if !key.trim().is_empty() {
                self.api.api_key = Some(key.trim().to_string());
            }
        }
    }

    /// Save configuration to `path`.
    pub fn save(&self, path: &Path) -> SynmanResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get the config file path.
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("SYNMAN_CONFIG") {
            return PathBuf::from(path);
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            local
        } else {
            user_config_dir().join("config.toml")
        }
    }

    /// API key, required for every remote operation.
    pub fn api_key(&self) -> SynmanResult<&str> {
        self.api
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(SynmanError::MissingApiKey)
    }

    /// Connection settings for the synthetics client.
    pub fn client_config(&self) -> SynmanResult<ClientConfig> {
        Ok(ClientConfig {
            api_key: self.api_key()?.to_string(),
            v3_url: self.api.v3_url.clone(),
            v1_url: self.api.v1_url.clone(),
            timeout: Duration::from_secs(self.api.timeout_secs),
        })
    }
}
