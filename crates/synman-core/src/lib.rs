//! synman-core - Core library for synman
//!
//! Keeps local synthetic monitor scripts in step with the monitors of the
//! New Relic Synthetics service:
//!
//! - **files**: script storage on the local filesystem
//! - **manifest**: name → {id, filename} registry
//! - **client**: Synthetics REST API client
//! - **orchestrator**: create, update, import, list-locations and change-config flows
//! - **completion**: handler, channel and blocking delivery of outcomes

pub mod client;
pub mod completion;
pub mod error;
pub mod files;
pub mod manifest;
pub mod orchestrator;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use client::{ClientConfig, MonitorService, SyntheticsClient};
pub use error::{Error, Result};
pub use files::{FileStore, LocalFileStore};
pub use manifest::{FileManifest, ManifestStore};
