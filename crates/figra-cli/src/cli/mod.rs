use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::{Commands, SinkKind};

/// Top-level CLI parser for the `figra` binary.
#[derive(Debug, Parser)]
#[command(
    name = "figra",
    version,
    about = "figra - Figma screens to Jira/Xray test cases"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Extra TOML config file, layered over the project config
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            config: self.config.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, OutputFormat, SinkKind};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["figra", "--format", "table", "--verbose", "frames"])
            .expect("cli should parse");
        assert_eq!(cli.format, OutputFormat::Table);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Frames(_)));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["figra", "elements", "1:2", "--format", "raw", "--quiet"])
            .expect("cli should parse");
        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        match cli.command {
            Commands::Elements(args) => assert_eq!(args.frame_id, "1:2"),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn run_defaults_to_jira_sink() {
        let cli = Cli::try_parse_from(["figra", "run"]).expect("cli should parse");
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.sink, SinkKind::Jira);
                assert!(args.limit.is_none());
                assert!(!args.screens_only);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn run_accepts_local_sinks_and_negative_limit() {
        let cli = Cli::try_parse_from(["figra", "run", "--sink", "jsonl", "--limit=-1"])
            .expect("cli should parse");
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.sink, SinkKind::Jsonl);
                assert_eq!(args.limit, Some(-1));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn send_tests_has_default_path() {
        let cli = Cli::try_parse_from(["figra", "send-tests"]).expect("cli should parse");
        match cli.command {
            Commands::SendTests(args) => {
                assert!(args.path.ends_with("final_tests.txt"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn send_json_requires_input_and_defaults_csv_path() {
        assert!(Cli::try_parse_from(["figra", "send-json"]).is_err());
        let cli =
            Cli::try_parse_from(["figra", "send-json", "--input", "cases.json", "--download-csv"])
                .expect("cli should parse");
        match cli.command {
            Commands::SendJson(args) => {
                assert!(args.path.ends_with("cases.json"));
                assert!(args.download_csv);
                assert!(args.csv_output.ends_with("component_tests.csv"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["figra", "--format", "xml", "frames"]).is_err());
    }
}
