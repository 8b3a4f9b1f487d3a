//! Error types for the synman CLI.

use thiserror::Error;

/// Errors raised by the CLI itself; library failures come through as `Core`.
#[derive(Error, Debug)]
pub enum SynmanError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No API key configured. Set SYNMAN_API_KEY or api.api_key in synman.toml")]
    MissingApiKey,

    #[error(transparent)]
    Core(#[from] synman_core::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for SynmanError {
    fn from(e: serde_json::Error) -> Self {
        SynmanError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for SynmanError {
    fn from(e: toml::de::Error) -> Self {
        SynmanError::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for SynmanError {
    fn from(e: toml::ser::Error) -> Self {
        SynmanError::Serialization(e.to_string())
    }
}

/// Result type alias for CLI operations.
pub type SynmanResult<T> = Result<T, SynmanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_keep_their_message() {
        let err = SynmanError::from(synman_core::Error::NotFound("Checkout".into()));
        assert_eq!(err.to_string(), "Monitor not found: Checkout");
    }

    #[test]
    fn test_toml_errors_are_config_errors() {
        let parse: Result<toml::Value, _> = toml::from_str("[api");
        let err = SynmanError::from(parse.unwrap_err());
        assert!(matches!(err, SynmanError::Config(_)));
    }
}
