//! Cross-cutting error types for figra.
//!
//! Selection itself never fails: malformed nodes fall back to defaults. The
//! errors here cover decoding a document tree from raw JSON. HTTP and
//! configuration errors live in their own crates and converge in `figra-cli`.

use thiserror::Error;

/// Errors that can be raised by the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The JSON payload is not a valid document tree.
    #[error("invalid document tree: {0}")]
    InvalidTree(#[from] serde_json::Error),
}
