//! Shared types for synman-core.
//!
//! These types are used by the synthetics client, the manifest store and the
//! orchestrators.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ─────────────────────────────────────────────────────────────────────────────
// Enums
// ─────────────────────────────────────────────────────────────────────────────

/// Kind of synthetic monitor.
///
/// Unknown types reported by the service are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MonitorType {
    /// Availability ping; has no script.
    Simple,
    Browser,
    ScriptApi,
    ScriptBrowser,
    Other(String),
}

impl MonitorType {
    pub fn as_str(&self) -> &str {
        match self {
            MonitorType::Simple => "SIMPLE",
            MonitorType::Browser => "BROWSER",
            MonitorType::ScriptApi => "SCRIPT_API",
            MonitorType::ScriptBrowser => "SCRIPT_BROWSER",
            MonitorType::Other(s) => s,
        }
    }

    /// Whether monitors of this type carry a local script file
    pub fn has_script(&self) -> bool {
        !matches!(self, MonitorType::Simple)
    }
}

impl From<String> for MonitorType {
    fn from(s: String) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "SIMPLE" => MonitorType::Simple,
            "BROWSER" => MonitorType::Browser,
            "SCRIPT_API" => MonitorType::ScriptApi,
            "SCRIPT_BROWSER" => MonitorType::ScriptBrowser,
            _ => MonitorType::Other(s),
        }
    }
}

impl From<&str> for MonitorType {
    fn from(s: &str) -> Self {
        MonitorType::from(s.to_string())
    }
}

impl From<MonitorType> for String {
    fn from(t: MonitorType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for MonitorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Monitor run state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MonitorStatus {
    Enabled,
    Disabled,
    Muted,
}

impl MonitorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MonitorStatus::Enabled => "ENABLED",
            MonitorStatus::Disabled => "DISABLED",
            MonitorStatus::Muted => "MUTED",
        }
    }
}

impl fmt::Display for MonitorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MonitorStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "ENABLED" => Ok(MonitorStatus::Enabled),
            "DISABLED" => Ok(MonitorStatus::Disabled),
            "MUTED" => Ok(MonitorStatus::Muted),
            other => Err(Error::Other(format!(
                "Invalid monitor status '{}' (expected ENABLED, DISABLED or MUTED)",
                other
            ))),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Entity Types
// ─────────────────────────────────────────────────────────────────────────────

/// Remote monitor configuration as reported by the synthetics service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Monitor {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub monitor_type: MonitorType,
    pub frequency: u32,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub locations: Vec<String>,
    pub status: MonitorStatus,
    #[serde(default)]
    pub sla_threshold: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub modified_at: Option<String>,
}

/// A location monitors can run from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub description: Option<String>,
}

/// Manifest record linking a monitor name to its remote id and local script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub name: String,
    pub id: String,
    pub filename: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Input Types
// ─────────────────────────────────────────────────────────────────────────────

/// Body of a monitor create call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMonitor {
    pub name: String,
    #[serde(rename = "type")]
    pub monitor_type: MonitorType,
    pub frequency: u32,
    pub locations: Vec<String>,
    pub status: MonitorStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sla_threshold: Option<f64>,
}

/// Partial monitor settings update.
///
/// Unset fields are left unchanged by the service; they are omitted from the
/// request body entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MonitorStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl MonitorSettings {
    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.frequency.is_none()
            && self.locations.is_none()
            && self.uri.is_none()
            && self.status.is_none()
            && self.name.is_none()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Extract the monitor id from the URL returned by a create call.
///
/// The id is the last non-empty path segment: `http://service/abc123` → `abc123`.
/// A URL with a scheme must carry a path; its host is never taken as the id.
pub fn monitor_id_from_url(url: &str) -> Result<String> {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let path = match path.split_once("://") {
        Some((_, rest)) => rest.split_once('/').map(|(_, p)| p).unwrap_or_default(),
        None => path,
    };
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::InvalidResponse(format!("No monitor id in '{}'", url)))
}

/// Default script filename for a monitor name: `"Home Page"` → `home-page.js`.
pub fn script_filename_for(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "monitor.js".to_string()
    } else {
        format!("{}.js", slug)
    }
}
