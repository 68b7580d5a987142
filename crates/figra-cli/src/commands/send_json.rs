use std::collections::BTreeSet;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::Context;
use figra_config::{FigraConfig, JiraConfig};
use figra_jira::{JiraClient, NewIssue, XrayStep, issues_link, keys_jql};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::run::new_run_id;
use super::send_tests::create_issues;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::SendJsonArgs;
use crate::output::output;

static TEST_CASE_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "type": "object",
        "required": ["summary"],
        "properties": {
            "summary": { "type": "string", "minLength": 1 },
            "description": { "type": "string" },
            "testRepositoryPath": { "type": "string" },
            "testCaseType": { "type": "string" },
            "priority": { "type": "string" },
            "labels": { "type": "array", "items": { "type": "string" } },
            "steps": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["action"],
                    "properties": {
                        "action": { "type": "string" },
                        "data": { "type": "string" },
                        "result": { "type": "string" }
                    }
                }
            }
        }
    })
});

static TEST_CASE_VALIDATOR: LazyLock<jsonschema::Validator> = LazyLock::new(|| {
    jsonschema::validator_for(&TEST_CASE_SCHEMA).expect("test case schema should compile")
});

/// One validated entry of the JSON array.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct JsonCase {
    summary: String,
    description: String,
    test_repository_path: String,
    test_case_type: String,
    labels: Vec<String>,
    steps: Vec<JsonStep>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct JsonStep {
    action: String,
    data: String,
    result: String,
}

#[derive(Debug, Serialize)]
struct SendJsonResponse {
    parsed: usize,
    created: usize,
    failed: usize,
    keys: Vec<String>,
    link: Option<String>,
    csv_file: Option<String>,
}

/// Handle `figra send-json`.
pub async fn handle(
    args: &SendJsonArgs,
    config: &FigraConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    config.jira.require()?;

    let text = std::fs::read_to_string(&args.path)
        .with_context(|| format!("failed to read test cases from {}", args.path.display()))?;
    let cases = parse_cases(&text)
        .with_context(|| format!("failed to parse {}", args.path.display()))?;
    if cases.is_empty() {
        anyhow::bail!("no valid test cases in {}", args.path.display());
    }

    let labels = base_labels(&config.jira.labels, &new_run_id());
    let issues: Vec<NewIssue> = cases
        .iter()
        .map(|(case, raw)| new_issue(case, raw, &labels, &config.jira))
        .collect();

    let client = JiraClient::new(&config.jira.url, &config.jira.username, &config.jira.password);
    let (keys, failed) = create_issues(&client, &issues, flags.quiet).await;

    let csv_file = match keys_jql(&keys) {
        Some(jql) if args.download_csv => {
            download_csv(&client, &jql, &args.csv_output).await?;
            Some(args.csv_output.display().to_string())
        }
        _ => None,
    };

    let link = issues_link(client.base_url(), &keys);
    output(
        &SendJsonResponse {
            parsed: cases.len(),
            created: keys.len(),
            failed,
            keys,
            link,
            csv_file,
        },
        flags.format,
    )?;

    if failed > 0 {
        anyhow::bail!("{failed} issue(s) could not be created");
    }
    Ok(())
}

/// Parse the root array and keep the entries that satisfy the schema.
///
/// Each kept case is paired with its raw JSON for the placeholder step.
fn parse_cases(text: &str) -> anyhow::Result<Vec<(JsonCase, Value)>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let root: Value = serde_json::from_str(text).context("invalid JSON")?;
    let Value::Array(entries) = root else {
        anyhow::bail!("root JSON element must be an array of test cases");
    };

    let total = entries.len();
    let mut cases = Vec::new();
    for (index, entry) in entries.into_iter().enumerate() {
        let errors: Vec<String> = TEST_CASE_VALIDATOR
            .iter_errors(&entry)
            .map(|e| format!("{e}"))
            .collect();
        if !errors.is_empty() {
            tracing::warn!(case = index + 1, errors = ?errors, "schema violation, skipping case");
            continue;
        }
        let case: JsonCase = serde_json::from_value(entry.clone())?;
        cases.push((case, entry));
    }
    tracing::info!(valid = cases.len(), total, "parsed JSON test cases");
    Ok(cases)
}

/// Configured labels plus this run's `runid_` label.
fn base_labels(config_labels: &[String], run_id: &str) -> Vec<String> {
    let mut labels = config_labels.to_vec();
    labels.push(format!("runid_{run_id}"));
    labels
}

fn new_issue(
    case: &JsonCase,
    raw: &Value,
    run_labels: &[String],
    config: &JiraConfig,
) -> NewIssue {
    let labels: BTreeSet<String> = run_labels
        .iter()
        .chain(&case.labels)
        .map(|label| label.trim().to_string())
        .filter(|label| !label.is_empty())
        .collect();

    let mut steps: Vec<XrayStep> = case
        .steps
        .iter()
        .map(|step| XrayStep {
            action: step.action.trim().to_string(),
            data: step.data.trim().to_string(),
            expected_result: step.result.trim().to_string(),
        })
        .collect();
    if steps.is_empty() {
        tracing::warn!(summary = %case.summary, "no steps, injecting placeholder step");
        steps.push(XrayStep {
            action: "No steps defined".into(),
            data: format!("{{code:json}}{raw}{{code}}"),
            expected_result: String::new(),
        });
    }

    let mut custom_fields = Vec::new();
    let repository_path = case.test_repository_path.trim();
    if let Some(field) = &config.test_repository_path_field
        && !repository_path.is_empty()
    {
        custom_fields.push((field.clone(), json!(repository_path)));
    }
    let case_type = case.test_case_type.trim();
    if let Some(field) = &config.test_case_type_field
        && !case_type.is_empty()
    {
        custom_fields.push((field.clone(), json!({ "value": case_type })));
    }

    NewIssue {
        project_key: config.project_key.clone(),
        summary: case.summary.trim().to_string(),
        description: case.description.clone(),
        issue_type: config.issue_type.clone(),
        labels: labels.into_iter().collect(),
        xray_steps_field: config.xray_steps_field.clone(),
        steps,
        test_board_field: config.test_board_field.clone(),
        custom_fields,
    }
}

async fn download_csv(client: &JiraClient, jql: &str, path: &Path) -> anyhow::Result<()> {
    let csv = client
        .issues_csv(jql)
        .await
        .context("failed to download issues CSV")?;
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    tokio::fs::write(path, csv)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "saved issues CSV");
    Ok(())
}
