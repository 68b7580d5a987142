//! Figma client error types.

use thiserror::Error;

/// Errors that can occur when talking to the Figma API.
#[derive(Debug, Error)]
pub enum FigmaError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body is not the JSON shape we expect.
    #[error("failed to decode Figma response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Figma returned a non-success status code.
    #[error("Figma API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body.
        message: String,
    },

    /// Figma returned 429 Too Many Requests.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The configured URL does not identify a Figma file.
    #[error("cannot extract a file key from Figma URL '{0}'")]
    InvalidFileUrl(String),
}

impl FigmaError {
    /// Whether the error is a plain 404 from the API.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}
