//! Pull an existing remote monitor into the local workspace.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::client::MonitorService;
use crate::error::{Error, Result};
use crate::files::FileStore;
use crate::manifest::ManifestStore;
use crate::types::{ManifestEntry, Monitor};

/// How the monitor to import is identified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportTarget {
    Id(String),
    /// Exact monitor name as shown by the service
    Name(String),
}

impl fmt::Display for ImportTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportTarget::Id(id) => write!(f, "id {}", id),
            ImportTarget::Name(name) => write!(f, "'{}'", name),
        }
    }
}

#[derive(Clone)]
pub struct ImportMonitorOrchestrator {
    manifest: Arc<dyn ManifestStore>,
    files: Arc<dyn FileStore>,
    remote: Arc<dyn MonitorService>,
}

impl ImportMonitorOrchestrator {
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

    /// Import a remote monitor.
    ///
    /// The script is written to `filename` (overwriting it) and the monitor is
    /// recorded in the manifest. SIMPLE monitors have no script: they are
    /// recorded with an empty filename and nothing is written. A failure after
    /// the file write leaves the file in place.
    pub async fn import_monitor(
        &self,
        target: &ImportTarget,
        filename: &str,
    ) -> Result<ManifestEntry> {
        let monitor = self.resolve(target).await?;
        debug!("Importing monitor '{}' ({})", monitor.name, monitor.id);

        let filename = if monitor.monitor_type.has_script() {
            let script = self.remote.get_script(&monitor.id).await?;
            self.files.write_file(filename, &script).await?;
            filename
        } else {
            ""
        };

        self.manifest
            .add_synthetic(&monitor.id, &monitor.name, filename)
            .await?;

        info!("Imported monitor '{}' ({})", monitor.name, monitor.id);
        Ok(ManifestEntry {
            name: monitor.name,
            id: monitor.id,
            filename: filename.to_string(),
        })
    }

    async fn resolve(&self, target: &ImportTarget) -> Result<Monitor> {
        match target {
            ImportTarget::Id(id) => self.remote.get_monitor(id).await,
            ImportTarget::Name(name) => self
                .remote
                .list_monitors()
                .await?
                .into_iter()
                .find(|m| &m.name == name)
                .ok_or_else(|| Error::NotFound(name.clone())),
        }
    }
}
