use anyhow::Context;
use figra_config::FigraConfig;

use crate::cli::GlobalFlags;

/// Load `.env`, then the layered configuration.
///
/// An explicit `--config` path must exist; the layered search paths are
/// optional.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<FigraConfig> {
    if let Some(path) = &flags.config
        && !path.is_file()
    {
        anyhow::bail!("config file '{}' does not exist", path.display());
    }

    FigraConfig::load_with_dotenv(flags.config.as_deref()).context("failed to load configuration")
}
