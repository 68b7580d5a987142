//! Jira client error types.

use thiserror::Error;

/// Errors that can occur when talking to Jira.
#[derive(Debug, Error)]
pub enum JiraError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Jira returned a non-success status code.
    #[error("Jira API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, usually a JSON `errorMessages` document.
        message: String,
    },

    /// Reading a file to attach failed.
    #[error("cannot read attachment {path}: {source}")]
    Attachment {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
