//! `ngtest run` command handler

use std::io::Write;
use std::path::Path;

use tracing::info;

use ngtest_core::config::NgtestConfig;
use ngtest_harness::{
    HarnessError, HarnessOptions, HarnessOverrides, Outcome, Runner, ScenarioLoader, SuiteReport,
};

use crate::cli::RunArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `run` command.
///
/// Scenario loading and the run itself are blocking, so they are moved to
/// the blocking thread pool.
///
/// # Errors
///
/// Returns `CliError::TestsFailed` when at least one test case failed.
pub async fn execute(
    args: RunArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let config = NgtestConfig::load_or_default(config_path).await?;

    let options = HarnessOptions::resolve(
        &config,
        HarnessOverrides {
            installdir: args.installdir,
            reports: args.reports,
            run_slow: args.runslow,
            run_with_valgrind: args.run_with_valgrind,
        },
    );
    info!(
        scenarios = %args.scenarios.display(),
        reports = %options.reports_dir.display(),
        run_slow = options.run_slow,
        run_with_valgrind = options.run_with_valgrind,
        "starting ngtest run"
    );

    let scenarios_dir = args.scenarios;
    let filter = args.filter;
    let report = tokio::task::spawn_blocking(move || -> Result<SuiteReport, HarnessError> {
        let scenarios = ScenarioLoader::load_directory(&scenarios_dir)?;
        let runner = Runner::new(options)?;
        Ok(runner.run(&scenarios, filter.as_deref()))
    })
    .await
    .map_err(|e| CliError::Command(format!("test run aborted: {e}")))??;

    writer.render(&report)?;

    if report.has_failures() {
        return Err(CliError::TestsFailed(format!(
            "{} of {} test cases failed",
            report.failed(),
            report.cases.len()
        )));
    }

    Ok(())
}

impl Render for SuiteReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        write!(w, "Test run: {}", self.reports_dir.display().to_string().bold())?;
        match self.version {
            Some(ref version) => writeln!(w, " (syslog-ng {version})")?,
            None => writeln!(w)?,
        }
        writeln!(w)?;

        for case in &self.cases {
            let (status, detail) = match case.outcome {
                Outcome::Passed => ("PASSED".green().bold(), String::new()),
                Outcome::Failed { ref reason } => ("FAILED".red().bold(), reason.clone()),
                Outcome::Skipped { ref reason } => ("SKIPPED".yellow().bold(), reason.clone()),
            };
            writeln!(
                w,
                "  {:<8} {:<40} {:>6} ms  {}",
                status, case.name, case.duration_ms, detail
            )?;
        }

        writeln!(w)?;
        writeln!(
            w,
            "{} total: {} passed, {} failed, {} skipped",
            self.cases.len(),
            self.passed().to_string().green(),
            self.failed().to_string().red(),
            self.skipped().to_string().yellow()
        )?;

        Ok(())
    }
}
