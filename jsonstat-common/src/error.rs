use thiserror::Error;

use crate::fetch::FetchError;

/// Common error type for jsonstat components.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Unexpected payload from {url}: {reason}")]
    UnexpectedPayload { url: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an unexpected-payload error.
    pub fn unexpected_payload(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnexpectedPayload {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias using jsonstat's Error.
pub type Result<T> = std::result::Result<T, Error>;
