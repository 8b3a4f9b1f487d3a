//! Create-monitor orchestration.

use std::sync::Arc;

use tracing::{debug, info};

use crate::client::MonitorService;
use crate::error::Result;
use crate::files::FileStore;
use crate::manifest::ManifestStore;
use crate::types::{monitor_id_from_url, ManifestEntry, MonitorStatus, MonitorType, NewMonitor};

/// Script written for new scripted monitors when no file exists yet.
pub const DEFAULT_SCRIPT_TEMPLATE: &str = "\
// Synthetic monitor script
// See https://docs.newrelic.com/docs/synthetics for the scripting API
";

/// Parameters of a new monitor.
#[derive(Debug, Clone)]
pub struct NewMonitorRequest {
    pub name: String,
    pub locations: Vec<String>,
    pub monitor_type: MonitorType,
    /// Minutes between runs
    pub frequency: u32,
    /// Script file, relative to the synthetics directory
    pub filename: String,
    /// Target URI (SIMPLE and BROWSER monitors)
    pub uri: Option<String>,
    pub alert_emails: Vec<String>,
}

/// Creates monitors remotely and records them locally.
#[derive(Clone)]
pub struct CreateMonitorOrchestrator {
    files: Arc<dyn FileStore>,
    remote: Arc<dyn MonitorService>,
    manifest: Arc<dyn ManifestStore>,
    script_template: String,
}

impl CreateMonitorOrchestrator {
    pub fn new(
        files: Arc<dyn FileStore>,
        remote: Arc<dyn MonitorService>,
        manifest: Arc<dyn ManifestStore>,
        script_template: impl Into<String>,
    ) -> Self {
        Self {
            files,
            remote,
            manifest,
            script_template: script_template.into(),
        }
    }

    /// Create a monitor.
    ///
    /// In order: ensure the script file exists (skipped for SIMPLE monitors),
    /// create the monitor remotely as ENABLED, record it in the manifest, then
    /// attach alert emails if any were given.
    pub async fn create_new_monitor(&self, request: NewMonitorRequest) -> Result<ManifestEntry> {
        if request.monitor_type.has_script() {
            if self.files.exists(&request.filename).await {
                debug!("Keeping existing script {}", request.filename);
            } else {
                info!("Creating script {} from template", request.filename);
                self.files
                    .create_file(&request.filename, &self.script_template)
                    .await?;
            }
        }

        let monitor = NewMonitor {
            name: request.name.clone(),
            monitor_type: request.monitor_type.clone(),
            frequency: request.frequency,
            locations: request.locations.clone(),
            status: MonitorStatus::Enabled,
            uri: request.uri.clone(),
            sla_threshold: None,
        };
        let location = self.remote.create_synthetic(&monitor).await?;
        let id = monitor_id_from_url(&location)?;
        info!("Created monitor '{}' with id {}", request.name, id);

        self.manifest
            .add_synthetic(&id, &request.name, &request.filename)
            .await?;

        if !request.alert_emails.is_empty() {
            self.remote
                .add_alert_emails(&id, &request.alert_emails)
                .await?;
        }

        Ok(ManifestEntry {
            name: request.name,
            id,
            filename: request.filename,
        })
    }
}
