//! Wiring of the core stores, client and orchestrators from configuration.

use std::sync::Arc;

use synman_core::orchestrator::{
    ChangeConfigOrchestrator, CreateMonitorOrchestrator, ImportMonitorOrchestrator,
    ListLocationsOrchestrator, UpdateMonitorOrchestrator,
};
use synman_core::{
    FileManifest, FileStore, LocalFileStore, ManifestStore, MonitorService, SyntheticsClient,
};

use crate::config::Config;
use crate::error::{SynmanError, SynmanResult};

/// Manifest store described by `config`. Needs no API key.
pub fn manifest(config: &Config) -> Arc<dyn ManifestStore> {
    let path = config.paths.manifest_file.to_string_lossy().into_owned();
    Arc::new(FileManifest::new(path, Arc::new(LocalFileStore::new("."))))
}

/// Script store rooted at the synthetics directory.
pub fn scripts(config: &Config) -> Arc<dyn FileStore> {
    Arc::new(LocalFileStore::new(config.paths.synthetics_dir.clone()))
}

/// Everything a remote command needs.
pub struct Services {
    pub manifest: Arc<dyn ManifestStore>,
    pub remote: Arc<dyn MonitorService>,
    pub create: CreateMonitorOrchestrator,
    pub update: UpdateMonitorOrchestrator,
    pub import: ImportMonitorOrchestrator,
    pub locations: ListLocationsOrchestrator,
    pub change_config: ChangeConfigOrchestrator,
}

impl Services {
    /// Build the real service graph. Fails without an API key.
    pub fn build(config: &Config) -> SynmanResult<Self> {
        let client = SyntheticsClient::new(config.client_config()?)?;
        Ok(Self::with_remote(config, Arc::new(client)))
    }

    /// Build the service graph around an existing remote.
    pub fn with_remote(config: &Config, remote: Arc<dyn MonitorService>) -> Self {
        let manifest = manifest(config);
        let files = scripts(config);

        Self {
            create: CreateMonitorOrchestrator::new(
                files.clone(),
                remote.clone(),
                manifest.clone(),
                config.defaults.script_template.clone(),
            ),
            update: UpdateMonitorOrchestrator::new(manifest.clone(), files.clone(), remote.clone()),
            import: ImportMonitorOrchestrator::new(manifest.clone(), files, remote.clone()),
            locations: ListLocationsOrchestrator::new(remote.clone()),
            change_config: ChangeConfigOrchestrator::new(remote.clone(), manifest.clone()),
            manifest,
            remote,
        }
    }

    /// Remote id of the monitor recorded as `name`.
    pub async fn id_for_name(&self, name: &str) -> SynmanResult<String> {
        match self.manifest.get_synthetic(name).await? {
            Some(entry) => Ok(entry.id),
            None => Err(SynmanError::Core(synman_core::Error::NotFound(name.to_string()))),
        }
    }
}
