//! Integration tests for TOML and environment configuration loading.
//!
//! Uses `figment::Jail` for sandboxed files and env vars.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use figra_config::FigraConfig;
use pretty_assertions::assert_eq;

#[test]
fn loads_all_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[figma]
token = "figd_token"
file_url = "https://www.figma.com/design/AbC123/App?node-id=0-1"
scale = 2

[jira]
url = "https://jira.example.com/"
project_key = "QA"
username = "tester"
password = "secret"
labels = ["frontend", "release"]
test_board_field = "customfield_20000"
test_case_type_field = "customfield_20100"

[filters]
frame_limit = 3
frame_banned = ["draft"]
frame_include = []
element_include = ["block"]

[general]
output_dir = "out"
concurrency = 2
log_file = "figra.log"
"#,
        )?;

        let config: FigraConfig = Figment::from(Serialized::defaults(FigraConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert!(config.figma.is_configured());
        assert!((config.figma.scale - 2.0).abs() < f64::EPSILON);
        assert!(config.jira.is_configured());
        assert_eq!(config.jira.labels, ["frontend", "release"]);
        assert_eq!(
            config.jira.test_board_field.as_deref(),
            Some("customfield_20000")
        );
        assert_eq!(
            config.jira.test_case_type_field.as_deref(),
            Some("customfield_20100")
        );
        assert!(config.jira.test_repository_path_field.is_none());
        assert_eq!(config.filters.frame_limit, 3);
        assert_eq!(config.filters.frame_banned, ["draft"]);
        assert!(config.filters.frame_include.is_empty());
        // Untouched lists keep their defaults.
        assert_eq!(config.filters.element_banned, ["icon", "decoration"]);
        assert_eq!(config.filters.element_include, ["block"]);
        assert_eq!(config.general.output_dir, "out");
        assert_eq!(config.general.concurrency, 2);
        assert_eq!(config.general.log_file.as_deref(), Some("figra.log"));
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".figra")?;
        jail.create_file(
            ".figra/config.toml",
            r#"
[filters]
frame_limit = 7
"#,
        )?;

        let config: FigraConfig = FigraConfig::figment(None).extract()?;
        assert_eq!(config.filters.frame_limit, 7);
        Ok(())
    });
}

#[test]
fn explicit_file_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".figra")?;
        jail.create_file(".figra/config.toml", "[general]\noutput_dir = \"local\"\n")?;
        jail.create_file("custom.toml", "[general]\noutput_dir = \"custom\"\n")?;

        let config: FigraConfig =
            FigraConfig::figment(Some(std::path::Path::new("custom.toml"))).extract()?;
        assert_eq!(config.general.output_dir, "custom");
        Ok(())
    });
}

#[test]
fn env_vars_override_files() {
    Jail::expect_with(|jail| {
        jail.create_dir(".figra")?;
        jail.create_file(
            ".figra/config.toml",
            "[figma]\ntoken = \"from-file\"\n[filters]\nframe_limit = 4\n",
        )?;
        jail.set_env("FIGRA_FIGMA__TOKEN", "from-env");
        jail.set_env("FIGRA_FILTERS__FRAME_LIMIT", "-1");
        jail.set_env("FIGRA_JIRA__LABELS", "[a, b]");

        let config: FigraConfig = FigraConfig::figment(None).extract()?;
        assert_eq!(config.figma.token, "from-env");
        assert_eq!(config.filters.frame_limit, -1);
        assert_eq!(config.filters.frame_policy().limit, 0);
        assert_eq!(config.jira.labels, ["a", "b"]);
        Ok(())
    });
}

#[test]
fn wrong_type_is_reported() {
    Jail::expect_with(|jail| {
        jail.create_file("bad.toml", "[filters]\nframe_limit = \"many\"\n")?;
        let result = FigraConfig::load(Some(std::path::Path::new("bad.toml")));
        assert!(result.is_err());
        Ok(())
    });
}
