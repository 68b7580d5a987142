//! Figma URL helpers.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::FigmaError;

static PATH_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/(?:file|design|proto)/([^/?#]+)(?:[/?#]|$)")
        .expect("path key pattern should compile")
});

static QUERY_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[?&]file-id=([^&#]+)").expect("query key pattern should compile")
});

/// Extract the file key from a Figma file, design or prototype URL.
///
/// Path form (`/file/{key}/...`, `/design/{key}`, `/proto/{key}`) wins over the
/// legacy `file-id` query parameter.
///
/// # Errors
///
/// Returns [`FigmaError::InvalidFileUrl`] when neither form is present.
pub fn parse_file_key(url: &str) -> Result<String, FigmaError> {
    PATH_KEY
        .captures(url)
        .or_else(|| QUERY_KEY.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| FigmaError::InvalidFileUrl(url.to_string()))
}

/// Deep link to a node inside the configured file URL.
#[must_use]
pub fn node_link(file_url: &str, node_id: &str) -> String {
    let separator = if file_url.contains('?') { '&' } else { '?' };
    format!("{file_url}{separator}node-id={node_id}")
}
