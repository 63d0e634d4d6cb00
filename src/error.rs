// src/error.rs

use thiserror::Error;

/// The primary error type for the `nila-oidc-continuation` library.
///
/// Navigation itself is fail-open and never produces one of these; they are
/// raised only where a value is constructed or configured.
#[derive(Debug, Error)]
pub enum ContinuationError {
    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A required configuration field is missing.
    #[error("A required configuration field is missing: {0}")]
    MissingConfiguration(String),

    /// A configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The configuration file could not be read.
    #[error("Failed to read configuration file: {0}")]
    ConfigFile(#[from] std::io::Error),

    /// The configuration document is not valid YAML for a client configuration.
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// A selection panel was given no tabs.
    #[error("A selection panel needs at least one tab")]
    EmptyTabs,

    /// A tab refers to a content key that has no content block.
    #[error("No content supplied for tab content key: {0}")]
    MissingTabContent(String),

    /// A tab selection targeted an index outside the tab sequence.
    #[error("Tab index {index} is out of range for {len} tabs")]
    TabIndexOutOfRange { index: usize, len: usize },

    /// The fragment is not valid base64.
    #[error("Base64 decoding error: {0}")]
    Base64DecodeError(#[from] base64::DecodeError),

    /// The decoded fragment is not an OAuth details document.
    #[error("Invalid OAuth details: {0}")]
    InvalidOAuthDetails(String),

    /// Query parameters could not be form-encoded.
    #[error("Failed to encode query parameters: {0}")]
    QueryEncoding(#[from] serde_urlencoded::ser::Error),
}
