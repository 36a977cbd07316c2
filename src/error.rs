use std::io;
use thiserror::Error;

/// Custom error type for the panel application
#[derive(Error, Debug)]
pub enum PanelError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Web server error: {0}")]
    Web(String),
}

/// Result type alias for the panel application
pub type Result<T> = std::result::Result<T, PanelError>;

impl PanelError {
    pub fn web<S: Into<String>>(msg: S) -> Self {
        PanelError::Web(msg.into())
    }
}

/// Why a single endpoint fetch produced no snapshot.
///
/// Every variant is recoverable: the poll cycle skips the endpoint and the
/// matching widget keeps its last value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("network link unavailable")]
    NetworkUnavailable,

    #[error("metrics host not configured")]
    HostUnconfigured,

    #[error("HTTP error {0}")]
    HttpError(u16),

    #[error("JSON parse error: {0}")]
    ParseError(String),
}

/// A field an extractor needed was absent or had the wrong type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("field '{field}' missing from {endpoint} response")]
pub struct FieldMissing {
    pub endpoint: &'static str,
    pub field: &'static str,
}

impl FieldMissing {
    pub fn new(endpoint: &'static str, field: &'static str) -> Self {
        Self { endpoint, field }
    }
}
