use anyhow::Context;
use figra_config::FigmaConfig;
use figra_core::DocumentNode;
use figra_figma::{FigmaClient, parse_file_key};

use crate::pipeline::DesignSource;

/// [`DesignSource`] backed by the Figma REST API for one file.
pub struct FigmaSource {
    client: FigmaClient,
    file_key: String,
    scale: f64,
}

impl FigmaSource {
    /// Build a source from the `[figma]` section.
    ///
    /// # Errors
    ///
    /// Fails if required settings are missing or the file URL has no key.
    pub fn from_config(config: &FigmaConfig) -> anyhow::Result<Self> {
        config.require()?;
        let file_key = parse_file_key(&config.file_url)
            .with_context(|| format!("cannot use figma.file_url '{}'", config.file_url))?;
        tracing::debug!(%file_key, "resolved Figma file key");
        Ok(Self {
            client: FigmaClient::new(config.token.clone(), &config.api_base),
            file_key,
            scale: config.scale,
        })
    }
}

impl DesignSource for FigmaSource {
    async fn document(&self) -> anyhow::Result<DocumentNode> {
        let tree = self
            .client
            .file_tree(&self.file_key)
            .await
            .context("failed to fetch Figma file")?;
        tracing::info!(file = %tree.name, "fetched Figma file tree");
        Ok(tree.document)
    }

    async fn subtree(&self, node_id: &str) -> anyhow::Result<Option<DocumentNode>> {
        self.client
            .node_subtree(&self.file_key, node_id)
            .await
            .with_context(|| format!("failed to fetch node {node_id}"))
    }

    async fn render_png(&self, node_id: &str) -> anyhow::Result<Option<Vec<u8>>> {
        let Some(url) = self
            .client
            .image_url(&self.file_key, node_id, self.scale)
            .await
            .with_context(|| format!("failed to request render of {node_id}"))?
        else {
            return Ok(None);
        };
        let bytes = self
            .client
            .download_image(&url)
            .await
            .with_context(|| format!("failed to download render of {node_id}"))?;
        Ok(Some(bytes))
    }
}
