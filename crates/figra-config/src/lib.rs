//! # figra-config
//!
//! Layered configuration loading for figra using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`FIGRA_*` prefix, `__` as separator)
//! 2. An explicit file passed with `--config`
//! 3. Project-level `.figra/config.toml`
//! 4. User-level `~/.config/figra/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `FIGRA_FIGMA__TOKEN` -> `figma.token`,
//! `FIGRA_FILTERS__FRAME_LIMIT` -> `filters.frame_limit`, etc. List values
//! use figment's array syntax: `FIGRA_JIRA__LABELS='[frontend, release]'`.
//!
//! # Usage
//!
//! ```no_run
//! use figra_config::FigraConfig;
//!
//! let config = FigraConfig::load_with_dotenv(None).expect("config");
//! if config.figma.is_configured() {
//!     println!("Figma file: {}", config.figma.file_url);
//! }
//! ```

mod error;
mod figma;
mod filters;
mod general;
mod jira;

pub use error::ConfigError;
pub use figma::FigmaConfig;
pub use filters::FilterConfig;
pub use general::GeneralConfig;
pub use jira::JiraConfig;

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Environment variable prefix for every setting.
pub const ENV_PREFIX: &str = "FIGRA_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FigraConfig {
    #[serde(default)]
    pub figma: FigmaConfig,
    #[serde(default)]
    pub jira: JiraConfig,
    #[serde(default)]
    pub filters: FilterConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl FigraConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env`
    /// support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be read or a value
    /// has the wrong type.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Ok(Self::figment(explicit).extract()?)
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// A missing `.env` is not an error.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load(explicit)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests and callers can add providers on top.
    #[must_use]
    pub fn figment(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".figra/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Explicit file from the command line
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file_exact(path));
        }

        // Layer 4: Environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("figra").join("config.toml"))
    }
}
