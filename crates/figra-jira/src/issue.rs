//! Request and response shapes for Xray test issues.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// One manual test step in the Xray steps field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XrayStep {
    #[serde(rename = "Action")]
    pub action: String,
    #[serde(rename = "Data")]
    pub data: String,
    #[serde(rename = "Expected Result")]
    pub expected_result: String,
}

/// Everything needed to create one test issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIssue {
    pub project_key: String,
    pub summary: String,
    pub description: String,
    pub issue_type: String,
    pub labels: Vec<String>,
    /// Custom field id holding the steps (e.g., `customfield_10204`).
    pub xray_steps_field: String,
    pub steps: Vec<XrayStep>,
    /// Optional select field set to `QA`.
    pub test_board_field: Option<String>,
    /// Extra custom fields inserted verbatim (`customfield_... -> value`).
    pub custom_fields: Vec<(String, Value)>,
}

impl NewIssue {
    /// Build the `fields` object of `POST /rest/api/2/issue`.
    #[must_use]
    pub fn fields(&self) -> Value {
        let steps: Vec<Value> = self
            .steps
            .iter()
            .map(|step| json!({ "fields": step }))
            .collect();

        let mut fields = Map::new();
        fields.insert("project".into(), json!({ "key": self.project_key }));
        fields.insert("summary".into(), json!(self.summary));
        fields.insert("description".into(), json!(self.description));
        fields.insert("issuetype".into(), json!({ "name": self.issue_type }));
        fields.insert("labels".into(), json!(self.labels));
        fields.insert("assignee".into(), json!({ "name": null }));
        fields.insert(self.xray_steps_field.clone(), json!({ "steps": steps }));
        if let Some(board) = &self.test_board_field {
            fields.insert(board.clone(), json!({ "value": "QA" }));
        }
        for (field, value) in &self.custom_fields {
            fields.insert(field.clone(), value.clone());
        }
        Value::Object(fields)
    }
}

/// Subset of the create-issue response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedIssue {
    pub key: String,
}
