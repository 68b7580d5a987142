//! # figra-figma
//!
//! Figma REST API client for figra.
//!
//! Covers the four calls the pipeline needs:
//! - the full file tree (`GET /files/{key}`)
//! - one node's subtree (`GET /files/{key}/nodes?ids=`)
//! - a PNG render URL for a node (`GET /images/{key}`)
//! - the rendered image bytes (plain `GET` on the returned URL)
//!
//! Plus URL helpers for extracting file keys and building node links.

mod error;
mod http;
mod url;

pub use error::FigmaError;
pub use url::{node_link, parse_file_key};

use std::collections::HashMap;
use std::time::Duration;

use figra_core::{DocumentNode, decode_json};
use serde::Deserialize;

use crate::http::check_response;

/// Default REST endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.figma.com/v1";

// ── Types ──────────────────────────────────────────────────────────

/// Response of `GET /files/{key}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileTree {
    #[serde(default)]
    pub name: String,
    /// Root `DOCUMENT` node. Missing on the wire means an empty document.
    #[serde(default)]
    pub document: DocumentNode,
}

#[derive(Debug, Deserialize)]
struct NodesResponse {
    #[serde(default)]
    nodes: HashMap<String, Option<NodeEntry>>,
}

#[derive(Debug, Deserialize)]
struct NodeEntry {
    document: Option<DocumentNode>,
}

#[derive(Debug, Deserialize)]
struct ImagesResponse {
    #[serde(default)]
    err: Option<String>,
    images: Option<HashMap<String, Option<String>>>,
}

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client for one Figma account.
#[derive(Debug, Clone)]
pub struct FigmaClient {
    http: reqwest::Client,
    token: String,
    api_base: String,
}

impl FigmaClient {
    /// Create a client authenticating with a personal access token.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn new(token: impl Into<String>, api_base: &str) -> Self {
        Self {
            http: reqwest::Client::builder()
                .user_agent("figra/0.1")
                .timeout(Duration::from_secs(30))
                .build()
                .expect("reqwest client should build"),
            token: token.into(),
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    async fn get(&self, path: &str) -> Result<reqwest::Response, FigmaError> {
        let url = format!("{}/{path}", self.api_base);
        tracing::debug!(%url, "figma request");
        let resp = self
            .http
            .get(&url)
            .header("X-Figma-Token", &self.token)
            .send()
            .await?;
        check_response(resp).await
    }

    /// Fetch the whole document tree of a file.
    ///
    /// # Errors
    ///
    /// Returns [`FigmaError`] if the request fails, Figma answers with an
    /// error status, or the body is not a file response.
    pub async fn file_tree(&self, file_key: &str) -> Result<FileTree, FigmaError> {
        let path = format!("files/{}", urlencoding::encode(file_key));
        let body = self.get(&path).await?.text().await?;
        Ok(decode_json(&body)?)
    }

    /// Fetch the subtree rooted at `node_id`.
    ///
    /// Returns `Ok(None)` when the response has no document for the node
    /// (unknown id, or a node Figma refuses to expand).
    ///
    /// # Errors
    ///
    /// Returns [`FigmaError`] on transport, status or decode failures.
    pub async fn node_subtree(
        &self,
        file_key: &str,
        node_id: &str,
    ) -> Result<Option<DocumentNode>, FigmaError> {
        let path = format!(
            "files/{}/nodes?ids={}",
            urlencoding::encode(file_key),
            urlencoding::encode(node_id)
        );
        let body = self.get(&path).await?.text().await?;
        let mut data: NodesResponse = decode_json(&body)?;
        Ok(take_document(&mut data, node_id))
    }

    /// Ask Figma to render `node_id` as PNG and return the image URL.
    ///
    /// A 404, a missing `images` map, or a `null` entry all yield `Ok(None)`
    /// with a warning; the node is simply not renderable.
    ///
    /// # Errors
    ///
    /// Returns [`FigmaError`] for any other failure.
    pub async fn image_url(
        &self,
        file_key: &str,
        node_id: &str,
        scale: f64,
    ) -> Result<Option<String>, FigmaError> {
        let path = format!(
            "images/{}?ids={}&format=png&scale={scale}",
            urlencoding::encode(file_key),
            urlencoding::encode(node_id)
        );
        let resp = match self.get(&path).await {
            Ok(resp) => resp,
            Err(e) if e.is_not_found() => {
                tracing::warn!(node_id, file_key, "image not found");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };
        let data: ImagesResponse = resp.json().await?;
        Ok(image_for(data, node_id))
    }

    /// Download rendered image bytes from a URL returned by [`Self::image_url`].
    ///
    /// The URL points at Figma's CDN, so no token is sent.
    ///
    /// # Errors
    ///
    /// Returns [`FigmaError`] on transport or status failures.
    pub async fn download_image(&self, image_url: &str) -> Result<Vec<u8>, FigmaError> {
        let resp = check_response(self.http.get(image_url).send().await?).await?;
        Ok(resp.bytes().await?.to_vec())
    }
}

fn take_document(data: &mut NodesResponse, node_id: &str) -> Option<DocumentNode> {
    data.nodes
        .remove(node_id)
        .flatten()
        .and_then(|entry| entry.document)
}

fn image_for(data: ImagesResponse, node_id: &str) -> Option<String> {
    if let Some(err) = data.err.as_deref() {
        tracing::warn!(node_id, err, "figma reported a render error");
    }
    let Some(mut images) = data.images else {
        tracing::warn!(node_id, "'images' missing from render response");
        return None;
    };
    let url = images.remove(node_id).flatten();
    if url.is_none() {
        tracing::warn!(node_id, "no image url returned");
    }
    url
}
