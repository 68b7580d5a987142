//! Figma API configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default REST endpoint.
fn default_api_base() -> String {
    "https://api.figma.com/v1".to_string()
}

/// Default render scale (1 = 1x, 2 = retina).
const fn default_scale() -> f64 {
    1.0
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FigmaConfig {
    /// Personal access token sent as `X-Figma-Token`.
    #[serde(default)]
    pub token: String,

    /// Full file URL as copied from the browser.
    #[serde(default)]
    pub file_url: String,

    /// PNG render scale.
    #[serde(default = "default_scale")]
    pub scale: f64,

    /// REST endpoint, overridable for proxies.
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

impl Default for FigmaConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            file_url: String::new(),
            scale: default_scale(),
            api_base: default_api_base(),
        }
    }
}

impl FigmaConfig {
    /// Check if the token and file URL are set.
    pub fn is_configured(&self) -> bool {
        !self.token.is_empty() && !self.file_url.is_empty()
    }

    /// Fail with the list of empty required fields.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] when `token` or `file_url` is
    /// empty, or [`ConfigError::InvalidValue`] for a non-positive scale.
    pub fn require(&self) -> Result<(), ConfigError> {
        let missing: Vec<String> = [("token", &self.token), ("file_url", &self.file_url)]
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| field.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::NotConfigured {
                section: "figma".into(),
                missing,
            });
        }
        if !(self.scale > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "figma.scale".into(),
                reason: format!("must be positive, got {}", self.scale),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = FigmaConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.api_base, "https://api.figma.com/v1");
        assert!((config.scale - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn require_lists_missing_fields() {
        let config = FigmaConfig {
            token: "figd_abc".into(),
            ..Default::default()
        };
        let err = config.require().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NotConfigured { ref missing, .. } if missing == &["file_url"]
        ));
    }

    #[test]
    fn require_rejects_zero_scale() {
        let config = FigmaConfig {
            token: "figd_abc".into(),
            file_url: "https://www.figma.com/design/KEY/name".into(),
            scale: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.require(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
