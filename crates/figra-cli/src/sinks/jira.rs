use std::path::{Path, PathBuf};

use anyhow::Context;
use figra_config::JiraConfig;
use figra_jira::{JiraClient, NewIssue, XrayStep, issues_link};

use crate::pipeline::{IssueSink, Published, TestCase};

/// Publishes each test case as a Jira issue with its PNG attached.
pub struct JiraSink {
    client: JiraClient,
    project_key: String,
    issue_type: String,
    xray_steps_field: String,
    test_board_field: Option<String>,
}

impl JiraSink {
    /// Build a sink from the `[jira]` section.
    ///
    /// # Errors
    ///
    /// Fails if any required Jira setting is empty.
    pub fn from_config(config: &JiraConfig) -> anyhow::Result<Self> {
        config.require()?;
        Ok(Self {
            client: JiraClient::new(&config.url, &config.username, &config.password),
            project_key: config.project_key.clone(),
            issue_type: config.issue_type.clone(),
            xray_steps_field: config.xray_steps_field.clone(),
            test_board_field: config.test_board_field.clone(),
        })
    }

    fn new_issue(&self, case: &TestCase) -> NewIssue {
        NewIssue {
            project_key: self.project_key.clone(),
            summary: case.summary.clone(),
            description: case.description.clone(),
            issue_type: self.issue_type.clone(),
            labels: case.labels.clone(),
            xray_steps_field: self.xray_steps_field.clone(),
            steps: vec![XrayStep {
                action: case.action.clone(),
                data: case.data.clone(),
                expected_result: case.expected_result.clone(),
            }],
            test_board_field: self.test_board_field.clone(),
            custom_fields: Vec::new(),
        }
    }
}

impl IssueSink for JiraSink {
    async fn publish(&self, case: &TestCase, png: &Path) -> anyhow::Result<String> {
        let created = self
            .client
            .create_issue(&self.new_issue(case))
            .await
            .with_context(|| format!("failed to create issue '{}'", case.summary))?;

        // The issue exists either way; a failed upload is only logged.
        if let Err(error) = self.client.attach_file(&created.key, png).await {
            tracing::error!(%error, key = %created.key, "failed to attach PNG");
        }
        Ok(created.key)
    }

    async fn finish(
        &self,
        run_id: &str,
        published: &[Published],
        output_dir: &Path,
    ) -> anyhow::Result<Option<PathBuf>> {
        let keys: Vec<&str> = published.iter().map(|p| p.reference.as_str()).collect();
        let Some(link) = issues_link(self.client.base_url(), &keys) else {
            tracing::info!("no Jira issues were created");
            return Ok(None);
        };

        let path = output_dir.join(format!("jira_issues_run_{run_id}.txt"));
        tokio::fs::write(&path, format!("{link}\n"))
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(%link, path = %path.display(), "wrote issue link");
        Ok(Some(path))
    }
}
