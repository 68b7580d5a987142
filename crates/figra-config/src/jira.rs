//! Jira / Xray configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default issue type created for every test case.
fn default_issue_type() -> String {
    "Test".to_string()
}

/// Default Xray "manual test steps" custom field.
fn default_xray_steps_field() -> String {
    "customfield_10204".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JiraConfig {
    /// Base URL of the Jira instance (e.g., `https://jira.example.com`).
    #[serde(default)]
    pub url: String,

    /// Project key new issues are created in.
    #[serde(default)]
    pub project_key: String,

    #[serde(default)]
    pub username: String,

    /// Password or API token used for basic auth.
    #[serde(default)]
    pub password: String,

    /// Labels added to every created issue.
    #[serde(default)]
    pub labels: Vec<String>,

    #[serde(default = "default_issue_type")]
    pub issue_type: String,

    /// Custom field id holding the Xray test steps.
    #[serde(default = "default_xray_steps_field")]
    pub xray_steps_field: String,

    /// Optional select field set to `QA` on every issue.
    #[serde(default)]
    pub test_board_field: Option<String>,

    /// Optional text field receiving a JSON case's `testRepositoryPath`.
    #[serde(default)]
    pub test_repository_path_field: Option<String>,

    /// Optional select field receiving a JSON case's `testCaseType`.
    #[serde(default)]
    pub test_case_type_field: Option<String>,
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            project_key: String::new(),
            username: String::new(),
            password: String::new(),
            labels: Vec::new(),
            issue_type: default_issue_type(),
            xray_steps_field: default_xray_steps_field(),
            test_board_field: None,
            test_repository_path_field: None,
            test_case_type_field: None,
        }
    }
}

impl JiraConfig {
    /// Check if the connection and project settings are present.
    pub fn is_configured(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Fail with the list of empty required fields.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] naming every empty field among
    /// `url`, `project_key`, `username`, `password`, `issue_type` and
    /// `xray_steps_field`.
    pub fn require(&self) -> Result<(), ConfigError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::NotConfigured {
                section: "jira".into(),
                missing,
            })
        }
    }

    fn missing_fields(&self) -> Vec<String> {
        [
            ("url", &self.url),
            ("project_key", &self.project_key),
            ("username", &self.username),
            ("password", &self.password),
            ("issue_type", &self.issue_type),
            ("xray_steps_field", &self.xray_steps_field),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field.to_string())
        .collect()
    }
}
