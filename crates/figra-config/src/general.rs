//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default directory for rendered PNGs and run summaries.
fn default_output_dir() -> String {
    "figma_screens".to_string()
}

/// Default number of frames processed at once.
const fn default_concurrency() -> usize {
    4
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Directory for PNGs, link files and exports.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Frames processed concurrently during `run`.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Append logs to this file in addition to stderr.
    #[serde(default)]
    pub log_file: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            concurrency: default_concurrency(),
            log_file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.output_dir, "figma_screens");
        assert_eq!(config.concurrency, 4);
        assert!(config.log_file.is_none());
    }
}
