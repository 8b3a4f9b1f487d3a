//! Manifest of managed monitors.
//!
//! The manifest maps each monitor name to its remote id and local script
//! filename. It is stored as a JSON object keyed by name:
//!
//! ```json
//! {
//!   "Home Page": { "id": "2a1bc369-7654-489d-b5f9-7ec9cea5aa3a", "filename": "home-page.js" }
//! }
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::files::FileStore;
use crate::types::ManifestEntry;

/// Registry of name → {id, filename} associations.
#[async_trait]
pub trait ManifestStore: Send + Sync {
    /// Look up a monitor by name.
    async fn get_synthetic(&self, name: &str) -> Result<Option<ManifestEntry>>;

    /// Record a monitor. An existing record with the same name is replaced.
    async fn add_synthetic(&self, id: &str, name: &str, filename: &str) -> Result<()>;

    /// Whether the manifest has been written yet.
    async fn exists(&self) -> bool;

    /// All recorded monitors, ordered by name.
    async fn list(&self) -> Result<Vec<ManifestEntry>>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Record {
    id: String,
    filename: String,
}

type Records = BTreeMap<String, Record>;

/// Manifest persisted as a JSON file through a [`FileStore`].
pub struct FileManifest {
    path: String,
    files: Arc<dyn FileStore>,
}

impl FileManifest {
    /// Create a manifest stored at `path` inside `files`
    pub fn new(path: impl Into<String>, files: Arc<dyn FileStore>) -> Self {
        Self {
            path: path.into(),
            files,
        }
    }

    /// Manifest path as given to the file store
    pub fn path(&self) -> &str {
        &self.path
    }

    async fn load(&self) -> Result<Records> {
        if !self.files.exists(&self.path).await {
            return Ok(Records::new());
        }
        let content = self.files.read_file(&self.path).await?;
        if content.trim().is_empty() {
            return Ok(Records::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    async fn save(&self, records: &Records) -> Result<()> {
        let content = serde_json::to_string_pretty(records)?;
        self.files.write_file(&self.path, &content).await
    }
}

#[async_trait]
impl ManifestStore for FileManifest {
    async fn get_synthetic(&self, name: &str) -> Result<Option<ManifestEntry>> {
        let records = self.load().await?;
        Ok(records.get(name).map(|r| ManifestEntry {
            name: name.to_string(),
            id: r.id.clone(),
            filename: r.filename.clone(),
        }))
    }

    async fn add_synthetic(&self, id: &str, name: &str, filename: &str) -> Result<()> {
        let mut records = self.load().await?;
        debug!("Recording monitor '{}' ({}) -> {}", name, id, filename);
        records.insert(
            name.to_string(),
            Record {
                id: id.to_string(),
                filename: filename.to_string(),
            },
        );
        self.save(&records).await
    }

    async fn exists(&self) -> bool {
        self.files.exists(&self.path).await
    }

    async fn list(&self) -> Result<Vec<ManifestEntry>> {
        let records = self.load().await?;
        Ok(records
            .into_iter()
            .map(|(name, r)| ManifestEntry {
                name,
                id: r.id,
                filename: r.filename,
            })
            .collect())
    }
}
