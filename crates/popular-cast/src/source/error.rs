//! Error types for remote sources.

use thiserror::Error;

/// A remote call did not produce usable data.
///
/// The aggregator treats every variant the same way; the distinction only matters for logs.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Transport failure, timeout, or a body that could not be decoded.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("API error (status {status_code}): {message}")]
    Api { status_code: u16, message: String },

    /// The source could not serve the request for any other reason.
    #[error("Source unavailable: {0}")]
    Unavailable(String),
}

impl RemoteError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable(reason.into())
    }
}
