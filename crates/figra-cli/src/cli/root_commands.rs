use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// List the frames that would be processed.
    Frames(FramesArgs),
    /// List the elements selected inside one frame.
    Elements(ElementsArgs),
    /// Render frames and elements and publish one test case per node.
    Run(RunArgs),
    /// Create Jira test issues from a `;`-delimited CSV file.
    SendTests(SendTestsArgs),
    /// Create Jira test issues from a JSON array of schema-checked cases.
    SendJson(SendJsonArgs),
}

#[derive(Clone, Debug, Args)]
pub struct FramesArgs {
    /// Override `filters.frame_limit`.
    #[arg(long)]
    pub limit: Option<i64>,
}

#[derive(Clone, Debug, Args)]
pub struct ElementsArgs {
    /// Frame node id (e.g., `12:345`).
    pub frame_id: String,
}

/// Where `run` publishes test cases.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SinkKind {
    /// Create Xray test issues and attach PNGs.
    Jira,
    /// Write one JSON array file.
    Json,
    /// Write one JSON Lines file.
    Jsonl,
}

#[derive(Clone, Debug, Args)]
pub struct RunArgs {
    /// Publish destination.
    #[arg(long, value_enum, default_value = "jira")]
    pub sink: SinkKind,

    /// Override `filters.frame_limit`.
    #[arg(long)]
    pub limit: Option<i64>,

    /// Override `general.output_dir`.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Skip the element pass and publish screens only.
    #[arg(long)]
    pub screens_only: bool,
}

#[derive(Clone, Debug, Args)]
pub struct SendTestsArgs {
    /// CSV file with one test case per row.
    #[arg(default_value = "create_final_tests/artifacts/final_tests.txt")]
    pub path: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct SendJsonArgs {
    /// JSON file holding an array of test cases.
    #[arg(long = "input")]
    pub path: PathBuf,

    /// Export the created issues as CSV after sending.
    #[arg(long)]
    pub download_csv: bool,

    /// Where `--download-csv` writes the export.
    #[arg(long, default_value = "create_final_tests/artifacts/component_tests.csv")]
    pub csv_output: PathBuf,
}
