use figra_config::FigraConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::FramesArgs;
use crate::figma_source::FigmaSource;
use crate::output::output;
use crate::pipeline::collect_frames;

/// Handle `figra frames`.
pub async fn handle(
    args: &FramesArgs,
    config: &FigraConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let source = FigmaSource::from_config(&config.figma)?;

    let mut filters = config.filters.clone();
    if let Some(limit) = args.limit {
        filters.frame_limit = limit;
    }

    let frames = collect_frames(&source, &filters.frame_policy()).await;
    output(&frames, flags.format)
}
