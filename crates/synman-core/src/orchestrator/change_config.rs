//! Monitor settings and alert email changes.

use std::sync::Arc;

use tracing::{debug, info};

use super::require_entry;
use crate::client::MonitorService;
use crate::error::Result;
use crate::manifest::ManifestStore;
use crate::types::MonitorSettings;

/// Requested changes to one monitor.
#[derive(Debug, Clone, Default)]
pub struct ConfigChange {
    /// Settings to overwrite; unset fields stay as they are
    pub settings: MonitorSettings,
    pub alert_emails_to_add: Vec<String>,
    pub alert_email_to_remove: Option<String>,
}

impl ConfigChange {
    /// True when nothing would be sent to the service
    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
            && self.alert_emails_to_add.is_empty()
            && self.alert_email_to_remove.is_none()
    }
}

/// What a change actually applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeReport {
    pub id: String,
    pub settings_updated: bool,
    pub emails_added: usize,
    pub email_removed: Option<String>,
}

#[derive(Clone)]
pub struct ChangeConfigOrchestrator {
    remote: Arc<dyn MonitorService>,
    manifest: Arc<dyn ManifestStore>,
}

impl ChangeConfigOrchestrator {
    pub fn new(remote: Arc<dyn MonitorService>, manifest: Arc<dyn ManifestStore>) -> Self {
        Self { remote, manifest }
    }

    /// Apply `change` to the monitor with remote id `id`.
    ///
    /// Calls run in a fixed order (settings, add emails, remove email), each
    /// only when requested. The first failure stops the sequence.
    pub async fn change_configuration_by_id(
        &self,
        id: &str,
        change: &ConfigChange,
    ) -> Result<ChangeReport> {
        let mut report = ChangeReport {
            id: id.to_string(),
            ..Default::default()
        };

        if !change.settings.is_empty() {
            debug!("Updating settings of {}: {:?}", id, change.settings);
            self.remote
                .update_monitor_settings(id, &change.settings)
                .await?;
            report.settings_updated = true;
        }

        if !change.alert_emails_to_add.is_empty() {
            self.remote
                .add_alert_emails(id, &change.alert_emails_to_add)
                .await?;
            report.emails_added = change.alert_emails_to_add.len();
        }

        if let Some(email) = &change.alert_email_to_remove {
            self.remote.remove_alert_email(id, email).await?;
            report.email_removed = Some(email.clone());
        }

        info!("Applied configuration change to {}", id);
        Ok(report)
    }

    /// Apply `change` to the monitor recorded as `name` in the manifest.
    pub async fn change_configuration_by_name(
        &self,
        name: &str,
        change: &ConfigChange,
    ) -> Result<ChangeReport> {
        let entry = require_entry(self.manifest.as_ref(), name).await?;
        self.change_configuration_by_id(&entry.id, change).await
    }
}
