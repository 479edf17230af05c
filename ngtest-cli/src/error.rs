//! CLI-specific error types and exit code mapping

use ngtest_core::error::NgtestError;
use ngtest_harness::HarnessError;
use ngtest_syslog_ng_config::SyslogNgConfigError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// The test run finished but at least one test case failed.
    #[error("test failures: {0}")]
    TestsFailed(String),

    /// Scenario loading, test-case setup or daemon invocation failed.
    #[error("harness error: {0}")]
    Harness(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from ngtest-core.
    #[error("{0}")]
    Core(#[from] NgtestError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                         |
    /// |------|---------------------------------|
    /// | 0    | Success                         |
    /// | 1    | General / command error         |
    /// | 2    | Configuration error             |
    /// | 4    | One or more test cases failed   |
    /// | 10   | IO error                        |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Core(NgtestError::Config(_)) => 2,
            Self::TestsFailed(_) => 4,
            Self::Io(_) | Self::Core(NgtestError::Io(_)) => 10,
            Self::JsonSerialize(_) | Self::Command(_) | Self::Harness(_) | Self::Core(_) => 1,
        }
    }
}

impl From<HarnessError> for CliError {
    fn from(e: HarnessError) -> Self {
        match e {
            HarnessError::InvalidOptions { .. } => Self::Config(e.to_string()),
            other => Self::Harness(other.to_string()),
        }
    }
}

impl From<SyslogNgConfigError> for CliError {
    fn from(e: SyslogNgConfigError) -> Self {
        match e {
            SyslogNgConfigError::Io { source, .. } => Self::Io(source),
            other => Self::Harness(other.to_string()),
        }
    }
}
