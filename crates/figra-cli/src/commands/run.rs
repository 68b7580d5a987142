use std::path::PathBuf;

use figra_config::FigraConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{RunArgs, SinkKind};
use crate::figma_source::FigmaSource;
use crate::output::output;
use crate::pipeline::{self, IssueSink, PipelineOptions};
use crate::progress::Progress;
use crate::sinks::{ExportFormat, ExportSink, JiraSink};

/// Handle `figra run`.
pub async fn handle(
    args: &RunArgs,
    config: &FigraConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let source = FigmaSource::from_config(&config.figma)?;
    let options = pipeline_options(args, config, &new_run_id());
    tracing::info!(
        run_id = %options.run_id,
        output_dir = %options.output_dir.display(),
        "starting run"
    );

    match args.sink {
        SinkKind::Jira => {
            let sink = JiraSink::from_config(&config.jira)?;
            execute(&source, &sink, &options, flags).await
        }
        SinkKind::Json => {
            execute(&source, &ExportSink::new(ExportFormat::Json), &options, flags).await
        }
        SinkKind::Jsonl => {
            execute(&source, &ExportSink::new(ExportFormat::Jsonl), &options, flags).await
        }
    }
}

async fn execute<K: IssueSink>(
    source: &FigmaSource,
    sink: &K,
    options: &PipelineOptions,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    // Length is set once the frame pass has counted the screens.
    let progress = Progress::bar(0, "screens", flags.quiet);
    let report = pipeline::run(source, sink, options, &progress).await;
    progress.finish_clear();

    let report = report?;
    tracing::info!(
        published = report.published,
        failed = report.failed,
        "run finished"
    );
    output(&report, flags.format)
}

/// First 8 hex digits of a random UUID.
pub(super) fn new_run_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(8);
    id
}

fn pipeline_options(args: &RunArgs, config: &FigraConfig, run_id: &str) -> PipelineOptions {
    let mut filters = config.filters.clone();
    if let Some(limit) = args.limit {
        filters.frame_limit = limit;
    }

    let mut labels = config.jira.labels.clone();
    labels.push(format!("runid_{run_id}"));

    PipelineOptions {
        run_id: run_id.to_string(),
        frame_policy: filters.frame_policy(),
        element_policy: filters.element_policy(),
        file_url: config.figma.file_url.clone(),
        labels,
        output_dir: args
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.general.output_dir)),
        concurrency: config.general.concurrency.max(1),
        screens_only: args.screens_only,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn args() -> RunArgs {
        RunArgs {
            sink: SinkKind::Json,
            limit: None,
            output_dir: None,
            screens_only: false,
        }
    }

    #[test]
    fn run_id_is_eight_hex_digits() {
        let id = new_run_id();
        assert_eq!(id.len(), 8);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(id, new_run_id());
    }

    #[test]
    fn options_add_run_label_after_configured_labels() {
        let mut config = FigraConfig::default();
        config.jira.labels = vec!["frontend".into()];
        let options = pipeline_options(&args(), &config, "abcd1234");
        assert_eq!(options.labels, ["frontend", "runid_abcd1234"]);
        assert_eq!(options.output_dir, PathBuf::from("figma_screens"));
        assert_eq!(options.concurrency, 4);
    }

    #[test]
    fn cli_overrides_limit_and_output_dir() {
        let config = FigraConfig::default();
        let args = RunArgs {
            limit: Some(2),
            output_dir: Some(PathBuf::from("/tmp/shots")),
            ..args()
        };
        let options = pipeline_options(&args, &config, "abcd1234");
        assert_eq!(options.frame_policy.limit, 2);
        assert_eq!(options.output_dir, PathBuf::from("/tmp/shots"));
    }

    #[test]
    fn zero_concurrency_is_raised_to_one() {
        let mut config = FigraConfig::default();
        config.general.concurrency = 0;
        assert_eq!(pipeline_options(&args(), &config, "x").concurrency, 1);
    }
}
