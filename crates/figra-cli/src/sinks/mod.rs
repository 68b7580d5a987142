//! [`IssueSink`](crate::pipeline::IssueSink) implementations.

mod export;
mod jira;

pub use export::{ExportFormat, ExportSink};
pub use jira::JiraSink;
