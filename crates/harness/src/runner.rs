//! 테스트 러너
//!
//! 시나리오마다 다음 순서로 실행합니다.
//!
//! ```text
//! slow 선택 -> TestCase::setup -> Scenario::build -> write_content -> (syntax check) -> Outcome
//! ```
//!
//! 실행 중 발생하는 로그는 테스트 케이스의 `testcase_<name>.log` 파일로 기록됩니다.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;

use serde::Serialize;
use tracing::{error, info, warn};

use crate::binary::{SyslogNgBinary, config_version};
use crate::error::HarnessError;
use crate::options::HarnessOptions;
use crate::scenario::Scenario;
use crate::testcase::TestCase;

/// `--runslow` 없이 slow 시나리오를 건너뛸 때의 사유
pub const SLOW_SKIP_REASON: &str = "need --runslow option to run";

const NO_INSTALLDIR_SKIP_REASON: &str = "syntax check needs --installdir";

/// 테스트 케이스 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Passed,
    Failed { reason: String },
    Skipped { reason: String },
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed { .. } => "failed",
            Self::Skipped { .. } => "skipped",
        }
    }
}

/// 테스트 케이스 하나의 결과 보고
#[derive(Debug, Clone, Serialize)]
pub struct CaseReport {
    pub name: String,
    pub outcome: Outcome,
    pub duration_ms: u64,
    /// 테스트 케이스 디렉토리 (건너뛴 경우 없음)
    pub working_dir: Option<PathBuf>,
}

/// 한 번의 실행 결과
#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub reports_dir: PathBuf,
    pub version: Option<String>,
    pub cases: Vec<CaseReport>,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Passed))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Failed { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Skipped { .. }))
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.cases.iter().filter(|c| pred(&c.outcome)).count()
    }
}

/// 테스트 러너
pub struct Runner {
    options: HarnessOptions,
    binary: Option<SyslogNgBinary>,
    version: Option<String>,
}

impl Runner {
    /// 러너를 만듭니다.
    ///
    /// 설치 디렉토리가 있으면 데몬 버전을 한 번 조회해 모든 테스트 케이스에 씁니다.
    ///
    /// # Errors
    /// - 실행 옵션이 유효하지 않은 경우
    /// - 설치 디렉토리가 주어졌는데 버전을 조회할 수 없는 경우
    pub fn new(options: HarnessOptions) -> Result<Self, HarnessError> {
        options.validate()?;

        let (binary, version) = match options.installdir {
            Some(ref installdir) => {
                let binary = SyslogNgBinary::from_installdir(installdir);
                let version = binary.version()?;
                info!(
                    binary = %binary.path().display(),
                    version = %version,
                    "using installed syslog-ng"
                );
                (Some(binary), Some(config_version(&version)))
            }
            None => {
                warn!("no installdir given, configs are rendered without syntax check");
                (None, None)
            }
        };

        Ok(Self {
            options,
            binary,
            version,
        })
    }

    pub fn options(&self) -> &HarnessOptions {
        &self.options
    }

    /// 새 설정 집계에 미리 넣는 `@version:` 값
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// 이름에 `filter`를 포함하는 시나리오만 고릅니다.
    pub fn select<'a>(&self, scenarios: &'a [Scenario], filter: Option<&str>) -> Vec<&'a Scenario> {
        scenarios
            .iter()
            .filter(|s| filter.is_none_or(|f| s.name.contains(f)))
            .collect()
    }

    /// 선택된 시나리오를 순서대로 실행합니다.
    pub fn run(&self, scenarios: &[Scenario], filter: Option<&str>) -> SuiteReport {
        let selected = self.select(scenarios, filter);
        info!(
            reports_dir = %self.options.reports_dir.display(),
            selected = selected.len(),
            total = scenarios.len(),
            "starting test run"
        );

        let cases: Vec<CaseReport> = selected.into_iter().map(|s| self.run_scenario(s)).collect();

        let report = SuiteReport {
            reports_dir: self.options.reports_dir.clone(),
            version: self.version.clone(),
            cases,
        };
        info!(
            passed = report.passed(),
            failed = report.failed(),
            skipped = report.skipped(),
            "test run finished"
        );
        report
    }

    /// 시나리오 하나를 실행합니다.
    pub fn run_scenario(&self, scenario: &Scenario) -> CaseReport {
        let started = Instant::now();

        if scenario.slow && !self.options.run_slow {
            info!(testcase = %scenario.name, reason = SLOW_SKIP_REASON, "test case skipped");
            return CaseReport {
                name: scenario.name.clone(),
                outcome: Outcome::Skipped {
                    reason: SLOW_SKIP_REASON.to_owned(),
                },
                duration_ms: 0,
                working_dir: None,
            };
        }

        let (outcome, working_dir) = match TestCase::setup(
            &self.options,
            &scenario.name,
            self.version.as_deref(),
        ) {
            Ok(tc) => (self.run_logged(scenario, &tc), Some(tc.working_dir().to_path_buf())),
            Err(e) => (
                Outcome::Failed {
                    reason: e.to_string(),
                },
                None,
            ),
        };

        match outcome {
            Outcome::Failed { ref reason } => {
                error!(testcase = %scenario.name, reason = %reason, "test case failed");
            }
            ref other => {
                info!(testcase = %scenario.name, status = other.as_str(), "test case finished");
            }
        }

        CaseReport {
            name: scenario.name.clone(),
            outcome,
            duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            working_dir,
        }
    }

    /// 테스트 케이스 리포트 파일을 구독자로 두고 실행합니다.
    fn run_logged(&self, scenario: &Scenario, tc: &TestCase) -> Outcome {
        let file = match File::create(tc.report_file()) {
            Ok(file) => file,
            Err(e) => {
                return Outcome::Failed {
                    reason: format!(
                        "failed to create report file {}: {e}",
                        tc.report_file().display()
                    ),
                };
            }
        };

        let subscriber = tracing_subscriber::fmt()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            info!(testcase = tc.name(), "test case started");
            let outcome = self.execute(scenario, tc).unwrap_or_else(|e| Outcome::Failed {
                reason: e.to_string(),
            });
            if let Outcome::Failed { ref reason } = outcome {
                error!("\n{reason}");
            }
            outcome
        })
    }

    fn execute(&self, scenario: &Scenario, tc: &TestCase) -> Result<Outcome, HarnessError> {
        let mut config = tc.new_config();
        scenario.build(&mut config)?;
        config.write_content(tc.config_path())?;

        if !self.options.syntax_check {
            return Ok(Outcome::Passed);
        }

        let Some(ref binary) = self.binary else {
            if scenario.expect_valid {
                info!("{NO_INSTALLDIR_SKIP_REASON}, config written only");
                return Ok(Outcome::Passed);
            }
            return Ok(Outcome::Skipped {
                reason: NO_INSTALLDIR_SKIP_REASON.to_owned(),
            });
        };

        let valgrind = tc.valgrind(&self.options);
        let check = binary.syntax_check(tc.config_path(), valgrind.as_ref())?;

        let outcome = match (check.valid, scenario.expect_valid) {
            (true, true) | (false, false) => Outcome::Passed,
            (false, true) => Outcome::Failed {
                reason: format!(
                    "syslog-ng rejected the config (exit code {:?}): {}",
                    check.exit_code, check.stderr
                ),
            },
            (true, false) => Outcome::Failed {
                reason: "syslog-ng accepted a config that was expected to be invalid".to_owned(),
            },
        };
        Ok(outcome)
    }
}
