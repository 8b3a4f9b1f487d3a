//! Error types for synman-core.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using synman-core Error
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for synman operations.
///
/// Orchestrators never classify these; they hand them to the caller untouched.
#[derive(Error, Debug)]
pub enum Error {
    // Lookup errors
    #[error("Monitor not found: {0}")]
    NotFound(String),

    #[error("Monitor '{0}' has no script")]
    NoScript(String),

    // Remote service errors
    #[error("Synthetics API error {status}: {body}")]
    RemoteService { status: u16, body: String },

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected API response: {0}")]
    InvalidResponse(String),

    // Local file errors
    #[error("File error at {}: {source}", path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a file system error bound to the path that caused it
    pub fn file_system(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }

    /// Create an error from a non-success API response
    pub fn remote(status: u16, body: impl Into<String>) -> Self {
        Self::RemoteService {
            status,
            body: body.into(),
        }
    }

    /// Whether this error is a lookup miss (manifest or remote)
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
