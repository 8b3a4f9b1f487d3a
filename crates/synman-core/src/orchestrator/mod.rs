//! Monitor lifecycle orchestrators.
//!
//! Each orchestrator sequences calls into the three collaborators: the
//! [`FileStore`](crate::files::FileStore) holding scripts, the
//! [`ManifestStore`](crate::manifest::ManifestStore) mapping names to ids, and
//! the remote [`MonitorService`](crate::client::MonitorService).
//!
//! ## Architecture
//!
//! ```text
//!   create   update   import   locations   change_config
//!      │        │        │          │             │
//!      └────────┴────────┴──────────┴─────────────┘
//!               │               │               │
//!          FileStore      ManifestStore   MonitorService
//! ```
//!
//! Calls within an operation run strictly in order; the first error ends the
//! operation and is returned untouched. Nothing is rolled back. Deliver the
//! outcome through a handler with [`crate::completion::complete`].

mod change_config;
mod create;
mod import;
mod locations;
mod update;

pub use change_config::*;
pub use create::*;
pub use import::*;
pub use locations::*;
pub use update::*;

use crate::error::{Error, Result};
use crate::manifest::ManifestStore;
use crate::types::ManifestEntry;

/// Look up `name` in the manifest, failing with `NotFound` on a miss.
async fn require_entry(manifest: &dyn ManifestStore, name: &str) -> Result<ManifestEntry> {
    manifest
        .get_synthetic(name)
        .await?
        .ok_or_else(|| Error::NotFound(name.to_string()))
}
