//! `ngtest version` command handler

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use ngtest_core::config::NgtestConfig;
use ngtest_harness::{SyslogNgBinary, config_version};

use crate::cli::VersionArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `version` command.
///
/// The install directory comes from `--installdir`, then from
/// `harness.installdir` in the configuration.
pub async fn execute(
    args: VersionArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let installdir = match args.installdir {
        Some(dir) => dir,
        None => {
            let config = NgtestConfig::load_or_default(config_path).await?;
            if config.harness.installdir.is_empty() {
                return Err(CliError::Command(
                    "no installdir given (use --installdir or harness.installdir)".to_owned(),
                ));
            }
            PathBuf::from(config.harness.installdir)
        }
    };

    let binary = SyslogNgBinary::from_installdir(&installdir);
    info!(binary = %binary.path().display(), "querying syslog-ng version");

    let report = tokio::task::spawn_blocking(move || {
        binary.version().map(|version| VersionReport {
            binary: binary.path().to_path_buf(),
            config_version: config_version(&version),
            version,
        })
    })
    .await
    .map_err(|e| CliError::Command(format!("version query aborted: {e}")))??;

    writer.render(&report)?;
    Ok(())
}

/// Installed daemon version.
#[derive(Serialize)]
pub struct VersionReport {
    pub binary: PathBuf,
    pub version: String,
    /// `major.minor` used for `@version:`
    pub config_version: String,
}

impl Render for VersionReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "syslog-ng {}", self.version.bold())?;
        writeln!(w, "  Binary: {}", self.binary.display())?;
        writeln!(w, "  Config version: {}", self.config_version)?;
        Ok(())
    }
}
