//! # figra-jira
//!
//! Jira REST (v2) client for creating Xray test issues.
//!
//! - [`JiraClient::create_issue`] posts an issue with its Xray steps
//! - [`JiraClient::attach_file`] uploads a PNG to an existing issue
//! - [`JiraClient::issues_csv`] exports a JQL search as Jira's CSV view
//! - [`issues_link`] builds a JQL search link for a batch of created keys

mod error;
mod issue;
mod link;

pub use error::JiraError;
pub use issue::{CreatedIssue, NewIssue, XrayStep};
pub use link::{issues_link, keys_jql};

use std::path::Path;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// HTTP client bound to one Jira instance and account.
#[derive(Debug, Clone)]
pub struct JiraClient {
    http: reqwest::Client,
    base_url: String,
    auth_header: String,
}

impl JiraClient {
    /// Create a client using basic auth.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn new(base_url: &str, username: &str, password: &str) -> Self {
        let token = STANDARD.encode(format!("{username}:{password}"));
        Self {
            http: reqwest::Client::builder()
                .user_agent("figra/0.1")
                .timeout(Duration::from_secs(60))
                .build()
                .expect("reqwest client should build"),
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_header: format!("Basic {token}"),
        }
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a test issue and return its key.
    ///
    /// # Errors
    ///
    /// Returns [`JiraError`] if the request fails, Jira rejects the issue, or
    /// the response lacks a `key`.
    pub async fn create_issue(&self, issue: &NewIssue) -> Result<CreatedIssue, JiraError> {
        let url = format!("{}/rest/api/2/issue", self.base_url);
        let body = serde_json::json!({ "fields": issue.fields() });
        let resp = self
            .http
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, &self.auth_header)
            .json(&body)
            .send()
            .await?;
        let created: CreatedIssue = check_response(resp, "POST", &url).await?.json().await?;
        tracing::info!(key = %created.key, summary = %issue.summary, "created Jira issue");
        Ok(created)
    }

    /// Attach a PNG file to `issue_key`.
    ///
    /// # Errors
    ///
    /// Returns [`JiraError::Attachment`] if the file cannot be read, or another
    /// [`JiraError`] if the upload fails.
    pub async fn attach_file(&self, issue_key: &str, path: &Path) -> Result<(), JiraError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| JiraError::Attachment {
                path: path.display().to_string(),
                source,
            })?;
        let file_name = path
            .file_name()
            .map_or_else(|| "attachment.png".to_string(), |n| n.to_string_lossy().into_owned());

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.clone())
            .mime_str("image/png")?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let url = format!(
            "{}/rest/api/2/issue/{}/attachments",
            self.base_url,
            urlencoding::encode(issue_key)
        );
        let resp = self
            .http
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, &self.auth_header)
            .header("X-Atlassian-Token", "no-check")
            .multipart(form)
            .send()
            .await?;
        check_response(resp, "POST", &url).await?;
        tracing::info!(issue_key, file = %file_name, "attached file");
        Ok(())
    }

    /// Download the issues matching `jql` as Jira's all-fields CSV export.
    ///
    /// # Errors
    ///
    /// Returns [`JiraError`] if the request fails or Jira refuses the export.
    pub async fn issues_csv(&self, jql: &str) -> Result<String, JiraError> {
        let url = self.csv_export_url(jql);
        let resp = self
            .http
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, &self.auth_header)
            .send()
            .await?;
        let csv = check_response(resp, "GET", &url).await?.text().await?;
        tracing::info!(bytes = csv.len(), "downloaded issues CSV");
        Ok(csv)
    }

    fn csv_export_url(&self, jql: &str) -> String {
        format!(
            "{}/sr/jira.issueviews:searchrequest-csv-all-fields/temp/SearchRequest.csv?jqlQuery={}",
            self.base_url,
            urlencoding::encode(jql)
        )
    }
}

/// Map non-success statuses to [`JiraError::Api`], logging the response body.
async fn check_response(
    resp: reqwest::Response,
    method: &str,
    url: &str,
) -> Result<reqwest::Response, JiraError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = resp.text().await.unwrap_or_default();
    tracing::error!(method, url, status = status.as_u16(), body = %message, "Jira request failed");
    Err(JiraError::Api {
        status: status.as_u16(),
        message,
    })
}
