use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::pipeline::{IssueSink, Published, TestCase};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Jsonl,
}

impl ExportFormat {
    const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Jsonl => "jsonl",
        }
    }
}

/// Writes test cases to a local file instead of Jira.
///
/// `publish` only hands back the PNG name; the file is written in `finish`
/// once all frames are done, in pipeline order.
pub struct ExportSink {
    format: ExportFormat,
}

impl ExportSink {
    #[must_use]
    pub const fn new(format: ExportFormat) -> Self {
        Self { format }
    }
}

impl IssueSink for ExportSink {
    async fn publish(&self, case: &TestCase, _png: &Path) -> anyhow::Result<String> {
        Ok(case.png_file.clone())
    }

    async fn finish(
        &self,
        run_id: &str,
        published: &[Published],
        output_dir: &Path,
    ) -> anyhow::Result<Option<PathBuf>> {
        let path = output_dir.join(format!(
            "test_cases_run_{run_id}.{}",
            self.format.extension()
        ));
        match self.format {
            ExportFormat::Json => {
                let file = File::create(&path)
                    .with_context(|| format!("failed to create {}", path.display()))?;
                let mut writer = BufWriter::new(file);
                serde_json::to_writer_pretty(&mut writer, published)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                writer.flush()?;
            }
            ExportFormat::Jsonl => serde_jsonlines::write_json_lines(&path, published)
                .with_context(|| format!("failed to write {}", path.display()))?,
        }
        tracing::info!(count = published.len(), path = %path.display(), "wrote test cases");
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    use super::*;
    use crate::pipeline::CaseKind;

    fn published(reference: &str, summary: &str) -> Published {
        Published {
            reference: reference.into(),
            case: TestCase {
                kind: CaseKind::Element,
                screen: "Login".into(),
                element: Some("Section Form".into()),
                node_id: "1:3".into(),
                link: "https://figma/x?node-id=1:3".into(),
                summary: summary.into(),
                description: "*Figma:* [Section Form|https://figma/x?node-id=1:3]".into(),
                labels: vec!["runid_abcd1234".into()],
                action: summary.into(),
                data: String::new(),
                expected_result: format!("!{reference}|width=600!"),
                png_file: reference.into(),
            },
        }
    }

    #[tokio::test]
    async fn json_export_is_one_array_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let sink = ExportSink::new(ExportFormat::Json);
        let rows = [published("a.png", "A"), published("b.png", "B")];

        let path = sink.finish("abcd1234", &rows, dir.path()).await.unwrap().unwrap();
        assert_eq!(path.file_name().unwrap(), "test_cases_run_abcd1234.json");

        let value: Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        let summaries: Vec<&str> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["summary"].as_str().unwrap())
            .collect();
        assert_eq!(summaries, ["A", "B"]);
        assert_eq!(value[0]["reference"], "a.png");
        assert_eq!(value[0]["kind"], "element");
    }

    #[tokio::test]
    async fn jsonl_export_writes_one_line_per_case() {
        let dir = tempfile::tempdir().unwrap();
        let sink = ExportSink::new(ExportFormat::Jsonl);
        let rows = [published("a.png", "A"), published("b.png", "B")];

        let path = sink.finish("abcd1234", &rows, dir.path()).await.unwrap().unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        assert_eq!(text.lines().count(), 2);
        let first: Value = serde_json::from_str(text.lines().next().unwrap()).unwrap();
        assert_eq!(first["element"], "Section Form");
    }

    #[tokio::test]
    async fn publish_returns_png_name() {
        let sink = ExportSink::new(ExportFormat::Json);
        let row = published("login.png", "Login - layout");
        let reference = sink.publish(&row.case, Path::new("login.png")).await.unwrap();
        assert_eq!(reference, "login.png");
    }
}
