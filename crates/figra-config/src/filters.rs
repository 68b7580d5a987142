//! Frame and element filter configuration.

use figra_core::{ElementPolicy, FramePolicy};
use serde::{Deserialize, Serialize};

const fn default_frame_limit() -> i64 {
    10
}

fn default_frame_banned() -> Vec<String> {
    vec!["frame".into(), "form".into(), "icon".into()]
}

fn default_frame_include() -> Vec<String> {
    vec!["screen".into()]
}

fn default_element_banned() -> Vec<String> {
    vec!["icon".into(), "decoration".into()]
}

fn default_element_include() -> Vec<String> {
    vec!["section".into()]
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FilterConfig {
    /// Maximum number of frames processed. Zero or negative selects none.
    #[serde(default = "default_frame_limit")]
    pub frame_limit: i64,

    /// Frames whose name contains any of these are skipped.
    #[serde(default = "default_frame_banned")]
    pub frame_banned: Vec<String>,

    /// Only frames whose name starts with one of these are kept (empty = all).
    #[serde(default = "default_frame_include")]
    pub frame_include: Vec<String>,

    /// Elements whose name contains any of these are skipped.
    #[serde(default = "default_element_banned")]
    pub element_banned: Vec<String>,

    /// Only elements whose name contains one of these are kept (empty = all).
    #[serde(default = "default_element_include")]
    pub element_include: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            frame_limit: default_frame_limit(),
            frame_banned: default_frame_banned(),
            frame_include: default_frame_include(),
            element_banned: default_element_banned(),
            element_include: default_element_include(),
        }
    }
}

impl FilterConfig {
    #[must_use]
    pub fn frame_policy(&self) -> FramePolicy {
        FramePolicy::new(self.frame_limit, &self.frame_banned, &self.frame_include)
    }

    #[must_use]
    pub fn element_policy(&self) -> ElementPolicy {
        ElementPolicy::new(&self.element_banned, &self.element_include)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_policies_match_defaults() {
        let config = FilterConfig::default();
        let frames = config.frame_policy();
        assert_eq!(frames.limit, 10);
        assert_eq!(frames.banned, ["frame", "form", "icon"]);
        assert_eq!(frames.include, ["screen"]);

        let elements = config.element_policy();
        assert_eq!(elements.banned, ["icon", "decoration"]);
        assert_eq!(elements.include, ["section"]);
    }

    #[test]
    fn mixed_case_patterns_are_normalized() {
        let config = FilterConfig {
            frame_include: vec!["Screen".into(), "PAGE".into()],
            ..Default::default()
        };
        assert_eq!(config.frame_policy().include, ["screen", "page"]);
    }

    #[test]
    fn non_positive_limit_gives_empty_policy_limit() {
        let config = FilterConfig {
            frame_limit: 0,
            ..Default::default()
        };
        assert_eq!(config.frame_policy().limit, 0);
    }
}
