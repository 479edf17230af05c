//! `ngtest render` command handler

use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use ngtest_harness::ScenarioLoader;
use ngtest_syslog_ng_config::SyslogNgConfig;

use crate::cli::RenderArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `render` command.
///
/// Builds the scenario into a fresh configuration rooted at the working
/// directory and prints the rendered text. Nothing is written to disk.
pub async fn execute(args: RenderArgs, writer: &OutputWriter) -> Result<(), CliError> {
    let report = render_scenario(args)?;
    writer.render(&report)?;
    Ok(())
}

fn render_scenario(args: RenderArgs) -> Result<RenderedConfig, CliError> {
    let working_dir = match args.working_dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    info!(
        scenario = %args.scenario.display(),
        working_dir = %working_dir.display(),
        "rendering scenario"
    );

    let scenario = ScenarioLoader::load_file(&args.scenario)?;

    let mut config = SyslogNgConfig::new(&working_dir);
    if let Some(version) = args.config_version {
        config.set_version(version);
    }
    scenario.build(&mut config)?;

    Ok(RenderedConfig {
        scenario: scenario.name,
        working_dir,
        statement_groups: config.statement_groups().len(),
        logpaths: config.logpath_groups().len(),
        content: config.render(),
    })
}

/// Rendered configuration of one scenario.
#[derive(Debug, Serialize)]
pub struct RenderedConfig {
    pub scenario: String,
    pub working_dir: PathBuf,
    pub statement_groups: usize,
    pub logpaths: usize,
    pub content: String,
}

impl Render for RenderedConfig {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        // 설정 텍스트만 출력하여 그대로 파일로 저장할 수 있게 함
        write!(w, "{}", self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = r#"
name: file_to_file
sources:
  s_in:
    - driver: file
      file_name: input.log
destinations:
  d_out:
    - driver: file
      file_name: output.log
logpaths:
  - items: [s_in, d_out]
    flags: [flow-control]
"#;

    fn args(dir: &std::path::Path, version: Option<&str>) -> RenderArgs {
        let scenario = dir.join("file_to_file.yml");
        std::fs::write(&scenario, SCENARIO).expect("write scenario");
        RenderArgs {
            scenario,
            working_dir: Some(PathBuf::from("/work")),
            config_version: version.map(str::to_owned),
        }
    }

    #[test]
    fn test_render_scenario_content() {
        let temp = tempfile::tempdir().expect("temp dir");
        let rendered = render_scenario(args(temp.path(), Some("4.0"))).expect("render");

        assert_eq!(rendered.scenario, "file_to_file");
        assert_eq!(rendered.statement_groups, 2);
        assert_eq!(rendered.logpaths, 1);
        assert!(rendered.content.starts_with("@version: 4.0\n"));
        assert!(rendered.content.contains("file(\"/work/input.log\");"));
        assert!(rendered.content.contains("flags(flow-control);"));
    }

    #[test]
    fn test_render_without_version_has_no_version_line() {
        let temp = tempfile::tempdir().expect("temp dir");
        let rendered = render_scenario(args(temp.path(), None)).expect("render");
        assert!(!rendered.content.contains("@version"));
    }

    #[test]
    fn test_render_text_is_plain_config() {
        let rendered = RenderedConfig {
            scenario: "x".to_owned(),
            working_dir: PathBuf::from("/work"),
            statement_groups: 0,
            logpaths: 0,
            content: "@version: 3.38\n".to_owned(),
        };
        let mut buffer = Vec::new();
        rendered.render_text(&mut buffer).expect("render");
        assert_eq!(buffer, b"@version: 3.38\n");
    }

    #[test]
    fn test_render_missing_file_fails() {
        let err = render_scenario(RenderArgs {
            scenario: PathBuf::from("/nonexistent/scenario.yml"),
            working_dir: None,
            config_version: None,
        })
        .expect_err("missing scenario should fail");
        assert!(matches!(err, CliError::Harness(_)));
    }
}
