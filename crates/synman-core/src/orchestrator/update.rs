//! Push local script changes to the remote monitor.

use std::sync::Arc;

use tracing::info;

use super::require_entry;
use crate::client::MonitorService;
use crate::error::{Error, Result};
use crate::files::FileStore;
use crate::manifest::ManifestStore;
use crate::types::ManifestEntry;

#[derive(Clone)]
pub struct UpdateMonitorOrchestrator {
    manifest: Arc<dyn ManifestStore>,
    files: Arc<dyn FileStore>,
    remote: Arc<dyn MonitorService>,
}

impl UpdateMonitorOrchestrator {
    pub fn new(
        manifest: Arc<dyn ManifestStore>,
        files: Arc<dyn FileStore>,
        remote: Arc<dyn MonitorService>,
    ) -> Self {
        Self {
            manifest,
            files,
            remote,
        }
    }

    /// Upload the script file recorded for `name` as the monitor's script.
    ///
    /// Entries without a filename (SIMPLE monitors) fail with `NoScript`.
    pub async fn update_monitor(&self, name: &str) -> Result<ManifestEntry> {
        let entry = require_entry(self.manifest.as_ref(), name).await?;
        if entry.filename.is_empty() {
            return Err(Error::NoScript(entry.name));
        }
        let content = self.files.read_file(&entry.filename).await?;
        self.remote.set_script(&entry.id, &content).await?;

        info!("Uploaded {} to monitor '{}' ({})", entry.filename, name, entry.id);
        Ok(entry)
    }
}
