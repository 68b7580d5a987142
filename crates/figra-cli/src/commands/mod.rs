pub mod elements;
pub mod frames;
pub mod run;
pub mod send_json;

use figra_config::FigraConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: &Commands,
    config: &FigraConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Frames(args) => frames::handle(args, config, flags).await,
        Commands::Elements(args) => elements::handle(args, config, flags).await,
        Commands::Run(args) => run::handle(args, config, flags).await,
        Commands::SendTests(args) => send_tests::handle(args, config, flags).await,
        Commands::SendJson(args) => send_json::handle(args, config, flags).await,
    }
}
