use figra_config::FigraConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ElementsArgs;
use crate::figma_source::FigmaSource;
use crate::output::output;
use crate::pipeline::collect_elements;

/// Handle `figra elements`.
pub async fn handle(
    args: &ElementsArgs,
    config: &FigraConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let source = FigmaSource::from_config(&config.figma)?;
    let elements =
        collect_elements(&source, &args.frame_id, &config.filters.element_policy()).await;
    output(&elements, flags.format)
}
