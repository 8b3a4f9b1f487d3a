//! Local file access for synthetic scripts and the manifest.
//!
//! Paths handed to a [`LocalFileStore`] are resolved against its root directory
//! unless they are already absolute.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::error::{Error, Result};

/// File operations the orchestrators rely on.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Whether a file exists at `path`.
    async fn exists(&self, path: &str) -> bool;

    /// Create a new file with `content`. Parent directories are created.
    async fn create_file(&self, path: &str, content: &str) -> Result<()>;

    /// Read a file as UTF-8 text.
    async fn read_file(&self, path: &str) -> Result<String>;

    /// Write `content` to `path`, replacing any existing file. Parent
    /// directories are created.
    async fn write_file(&self, path: &str, content: &str) -> Result<()>;
}

/// Filesystem-backed store rooted at a directory.
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    /// Create a store resolving relative paths against `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of this store
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a store path to a filesystem path
    pub fn resolve(&self, path: &str) -> PathBuf {
        let candidate = Path::new(path);
        if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            self.root.join(candidate)
        }
    }

    async fn ensure_parent(&self, full: &Path) -> Result<()> {
        if let Some(parent) = full.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| Error::file_system(parent, e))?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn exists(&self, path: &str) -> bool {
        tokio::fs::try_exists(self.resolve(path))
            .await
            .unwrap_or(false)
    }

    async fn create_file(&self, path: &str, content: &str) -> Result<()> {
        let full = self.resolve(path);
        debug!("Creating file {}", full.display());
        self.ensure_parent(&full).await?;

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&full)
            .await
            .map_err(|e| Error::file_system(&full, e))?;
        tokio::io::AsyncWriteExt::write_all(&mut file, content.as_bytes())
            .await
            .map_err(|e| Error::file_system(&full, e))?;
        tokio::io::AsyncWriteExt::flush(&mut file)
            .await
            .map_err(|e| Error::file_system(&full, e))
    }

    async fn read_file(&self, path: &str) -> Result<String> {
        let full = self.resolve(path);
        debug!("Reading file {}", full.display());
        tokio::fs::read_to_string(&full)
            .await
            .map_err(|e| Error::file_system(&full, e))
    }

    async fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let full = self.resolve(path);
        debug!("Writing file {}", full.display());
        self.ensure_parent(&full).await?;
        tokio::fs::write(&full, content)
            .await
            .map_err(|e| Error::file_system(&full, e))
    }
}
