//! Run pipeline: select → render → publish.
//!
//! Orchestrates one `figra run`:
//! 1. Fetch the document tree from a [`DesignSource`] and run the frame pass
//! 2. For every selected frame (up to `concurrency` at once): render its PNG,
//!    publish the screen test case, fetch its subtree and run the element pass
//! 3. Render and publish every selected element
//! 4. Let the [`IssueSink`] write its run summary
//!
//! Fetch, render and publish failures are logged and skip only the affected
//! node (or frame); they never abort the run. Results are aggregated in frame
//! order, each frame's elements in document order, regardless of which frame
//! finishes first.

use std::path::{Path, PathBuf};

use anyhow::Context;
use figra_core::{
    DocumentNode, ElementPolicy, FramePolicy, SelectedEntry, select_elements, select_frames,
};
use futures::StreamExt;
use serde::Serialize;

use crate::progress::Progress;

/// Where documents and renders come from.
#[allow(async_fn_in_trait)]
pub trait DesignSource {
    /// The whole design tree.
    async fn document(&self) -> anyhow::Result<DocumentNode>;

    /// The subtree rooted at `node_id`, or `None` if the source has no
    /// document data for it.
    async fn subtree(&self, node_id: &str) -> anyhow::Result<Option<DocumentNode>>;

    /// PNG bytes for `node_id`, or `None` if the node cannot be rendered.
    async fn render_png(&self, node_id: &str) -> anyhow::Result<Option<Vec<u8>>>;
}

/// Where test cases go.
#[allow(async_fn_in_trait)]
pub trait IssueSink {
    /// Publish one test case; returns a reference (issue key, row id).
    async fn publish(&self, case: &TestCase, png: &Path) -> anyhow::Result<String>;

    /// Write the run summary. Returns the written file, if any.
    async fn finish(
        &self,
        run_id: &str,
        published: &[Published],
        output_dir: &Path,
    ) -> anyhow::Result<Option<PathBuf>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseKind {
    Screen,
    Element,
}

/// One generated test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestCase {
    pub kind: CaseKind,
    pub screen: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
    pub node_id: String,
    pub link: String,
    pub summary: String,
    pub description: String,
    pub labels: Vec<String>,
    pub action: String,
    pub data: String,
    pub expected_result: String,
    pub png_file: String,
}

impl TestCase {
    fn new(
        kind: CaseKind,
        screen: &SelectedEntry,
        element: Option<&SelectedEntry>,
        png: &Path,
        options: &PipelineOptions,
    ) -> Self {
        let target = element.unwrap_or(screen);
        let link = figra_figma::node_link(&options.file_url, &target.node_id);
        let summary = match element {
            None => format!("{} - layout", screen.raw_name),
            Some(element) => format!("{}. {} - behavior", screen.raw_name, element.raw_name),
        };
        let png_file = png
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            kind,
            screen: screen.raw_name.clone(),
            element: element.map(|e| e.raw_name.clone()),
            node_id: target.node_id.clone(),
            description: format!("*Figma:* [{}|{link}]", target.raw_name),
            link,
            action: summary.clone(),
            summary,
            labels: options.labels.clone(),
            data: String::new(),
            expected_result: format!("!{png_file}|width=600!"),
            png_file,
        }
    }
}

/// A test case the sink accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Published {
    pub reference: String,
    #[serde(flatten)]
    pub case: TestCase,
}

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub run_id: String,
    pub frame_policy: FramePolicy,
    pub element_policy: ElementPolicy,
    /// Figma file URL used for node links.
    pub file_url: String,
    /// Labels attached to every case (configured labels plus the run label).
    pub labels: Vec<String>,
    pub output_dir: PathBuf,
    pub concurrency: usize,
    pub screens_only: bool,
}

/// Result of one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: String,
    pub screens_selected: usize,
    pub elements_selected: usize,
    pub published: usize,
    pub failed: usize,
    pub references: Vec<String>,
    pub summary_file: Option<PathBuf>,
}

#[derive(Debug, Default)]
struct FrameOutcome {
    elements_selected: usize,
    published: Vec<Published>,
    failed: usize,
}

impl FrameOutcome {
    fn record(&mut self, result: anyhow::Result<String>, case: TestCase) {
        match result {
            Ok(reference) => {
                tracing::info!(%reference, summary = %case.summary, "published test case");
                self.published.push(Published { reference, case });
            }
            Err(e) => {
                let error = format!("{e:#}");
                tracing::error!(%error, summary = %case.summary, "failed to publish test case");
                self.failed += 1;
            }
        }
    }
}

/// Run the whole pipeline against `source`, publishing into `sink`.
///
/// # Errors
///
/// Fails only if the output directory cannot be created or the sink cannot
/// write its summary; per-node failures are counted in the report.
pub async fn run<S, K>(
    source: &S,
    sink: &K,
    options: &PipelineOptions,
    progress: &Progress,
) -> anyhow::Result<RunReport>
where
    S: DesignSource,
    K: IssueSink,
{
    tokio::fs::create_dir_all(&options.output_dir)
        .await
        .with_context(|| {
            format!(
                "failed to create output directory {}",
                options.output_dir.display()
            )
        })?;

    let frames = collect_frames(source, &options.frame_policy).await;
    tracing::info!(count = frames.len(), "selected screens for processing");

    let total = frames.len();
    progress.set_length(u64::try_from(total).unwrap_or(u64::MAX));
    let outcomes: Vec<FrameOutcome> = futures::stream::iter(&frames)
        .map(|frame| process_frame(source, sink, options, frame))
        .buffered(options.concurrency.max(1))
        .inspect(|_| progress.inc(1))
        .collect()
        .await;

    let mut published = Vec::new();
    let mut elements_selected = 0;
    let mut failed = 0;
    for outcome in outcomes {
        elements_selected += outcome.elements_selected;
        failed += outcome.failed;
        published.extend(outcome.published);
    }

    let summary_file = sink
        .finish(&options.run_id, &published, &options.output_dir)
        .await?;

    Ok(RunReport {
        run_id: options.run_id.clone(),
        screens_selected: total,
        elements_selected,
        published: published.len(),
        failed,
        references: published.into_iter().map(|p| p.reference).collect(),
        summary_file,
    })
}

/// Frame pass over the source's document. A fetch failure yields no frames.
pub async fn collect_frames<S: DesignSource>(
    source: &S,
    policy: &FramePolicy,
) -> Vec<SelectedEntry> {
    match source.document().await {
        Ok(document) => select_frames(&document, policy),
        Err(e) => {
            let error = format!("{e:#}");
            tracing::error!(%error, "failed to fetch design tree; no screens selected");
            Vec::new()
        }
    }
}

/// Element pass over one frame. A fetch failure or missing document yields no
/// elements.
pub async fn collect_elements<S: DesignSource>(
    source: &S,
    frame_id: &str,
    policy: &ElementPolicy,
) -> Vec<SelectedEntry> {
    match source.subtree(frame_id).await {
        Ok(Some(frame)) => select_elements(&frame, policy),
        Ok(None) => {
            tracing::warn!(frame_id, "no document data for frame");
            Vec::new()
        }
        Err(e) => {
            let error = format!("{e:#}");
            tracing::error!(%error, frame_id, "failed to fetch frame subtree");
            Vec::new()
        }
    }
}

async fn process_frame<S, K>(
    source: &S,
    sink: &K,
    options: &PipelineOptions,
    frame: &SelectedEntry,
) -> FrameOutcome
where
    S: DesignSource,
    K: IssueSink,
{
    let mut outcome = FrameOutcome::default();
    tracing::info!(screen = %frame.raw_name, id = %frame.node_id, "processing screen");

    let png = render_to_file(source, &frame.node_id, &frame.safe_name, &options.output_dir).await;
    let Some(png) = png else {
        tracing::warn!(screen = %frame.raw_name, "skipping screen: no PNG");
        return outcome;
    };
    let case = TestCase::new(CaseKind::Screen, frame, None, &png, options);
    let result = sink.publish(&case, &png).await;
    outcome.record(result, case);

    if options.screens_only {
        return outcome;
    }

    let elements = collect_elements(source, &frame.node_id, &options.element_policy).await;
    outcome.elements_selected = elements.len();
    if elements.is_empty() {
        tracing::info!(screen = %frame.raw_name, "no elements matching filters");
        return outcome;
    }
    tracing::info!(screen = %frame.raw_name, count = elements.len(), "found elements");

    for element in &elements {
        // `-` never survives sanitizing, so element stems cannot collide with screen stems.
        let stem = format!("{}-{}", frame.safe_name, element.safe_name);
        let png = render_to_file(source, &element.node_id, &stem, &options.output_dir).await;
        let Some(png) = png else {
            tracing::warn!(
                screen = %frame.raw_name,
                element = %element.raw_name,
                "skipping element: no PNG"
            );
            continue;
        };
        let case = TestCase::new(CaseKind::Element, frame, Some(element), &png, options);
        let result = sink.publish(&case, &png).await;
        outcome.record(result, case);
    }

    outcome
}

async fn render_to_file<S: DesignSource>(
    source: &S,
    node_id: &str,
    file_stem: &str,
    output_dir: &Path,
) -> Option<PathBuf> {
    let bytes = match source.render_png(node_id).await {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            tracing::warn!(node_id, name = file_stem, "no image returned");
            return None;
        }
        Err(e) => {
            let error = format!("{e:#}");
            tracing::error!(%error, node_id, name = file_stem, "failed to render PNG");
            return None;
        }
    };

    let path = output_dir.join(format!("{file_stem}.png"));
    match tokio::fs::write(&path, bytes).await {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "saved PNG");
            Some(path)
        }
        Err(e) => {
            tracing::error!(error = %e, path = %path.display(), "failed to write PNG");
            None
        }
    }
}
