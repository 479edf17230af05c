//! 설치된 syslog-ng 바이너리 호출
//!
//! 버전 조회(`--version`)와 생성된 설정의 문법 검사(`--syntax-only`)만 수행합니다.
//! 데몬을 실제로 기동하는 일은 이 하네스의 범위 밖입니다.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use ngtest_core::config::ValgrindConfig;
use tracing::debug;

use crate::error::HarnessError;

/// valgrind 로그 파일 이름 (테스트 케이스 디렉토리 안)
pub const VALGRIND_LOG_FILE: &str = "valgrind.log";

/// `<installdir>/sbin/syslog-ng`
#[derive(Debug, Clone)]
pub struct SyslogNgBinary {
    path: PathBuf,
}

impl SyslogNgBinary {
    pub fn from_installdir(installdir: impl AsRef<Path>) -> Self {
        Self {
            path: installdir.as_ref().join("sbin").join("syslog-ng"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 설치된 데몬의 전체 버전 문자열을 조회합니다.
    ///
    /// # Errors
    /// 실행 실패, 0이 아닌 종료 코드, 예상과 다른 출력 형식
    pub fn version(&self) -> Result<String, HarnessError> {
        let mut command = Command::new(&self.path);
        command.arg("--version");
        let output = self.run(&mut command)?;

        if !output.status.success() {
            return Err(self.binary_error(format!(
                "--version exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let version = parse_version_output(&String::from_utf8_lossy(&output.stdout))?;
        debug!(binary = %self.path.display(), version = %version, "detected syslog-ng version");
        Ok(version)
    }

    /// 문법 검사 명령을 구성합니다.
    ///
    /// valgrind 래퍼가 있으면 데몬 호출 앞에 붙습니다.
    pub fn syntax_check_command(
        &self,
        config_path: &Path,
        valgrind: Option<&ValgrindWrapper>,
    ) -> Command {
        let mut command = match valgrind {
            Some(wrapper) => wrapper.command(&self.path),
            None => Command::new(&self.path),
        };
        command
            .arg("--syntax-only")
            .arg(format!("--cfgfile={}", config_path.display()));
        command
    }

    /// 설정 파일을 `--syntax-only`로 검사합니다.
    ///
    /// 데몬이 설정을 거부한 경우는 에러가 아니라 `valid == false`인 결과입니다.
    pub fn syntax_check(
        &self,
        config_path: &Path,
        valgrind: Option<&ValgrindWrapper>,
    ) -> Result<SyntaxCheck, HarnessError> {
        let mut command = self.syntax_check_command(config_path, valgrind);
        let output = self.run(&mut command)?;

        let check = SyntaxCheck {
            valid: output.status.success(),
            exit_code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
        };
        debug!(
            config = %config_path.display(),
            valid = check.valid,
            exit_code = ?check.exit_code,
            "syntax check finished"
        );
        Ok(check)
    }

    fn run(&self, command: &mut Command) -> Result<Output, HarnessError> {
        command
            .output()
            .map_err(|e| self.binary_error(format!("failed to execute: {e}")))
    }

    fn binary_error(&self, reason: String) -> HarnessError {
        HarnessError::Binary {
            binary: self.path.display().to_string(),
            reason,
        }
    }
}

/// 문법 검사 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxCheck {
    pub valid: bool,
    pub exit_code: Option<i32>,
    pub stderr: String,
}

/// 데몬 호출을 감싸는 valgrind 명령
#[derive(Debug, Clone)]
pub struct ValgrindWrapper {
    binary: String,
    args: Vec<String>,
    log_file: PathBuf,
}

impl ValgrindWrapper {
    /// 테스트 케이스 디렉토리에 `valgrind.log`를 쓰는 래퍼를 만듭니다.
    pub fn new(config: &ValgrindConfig, testcase_dir: &Path) -> Self {
        Self {
            binary: config.binary.clone(),
            args: config.args.clone(),
            log_file: testcase_dir.join(VALGRIND_LOG_FILE),
        }
    }

    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    fn command(&self, program: &Path) -> Command {
        let mut command = Command::new(&self.binary);
        command
            .args(&self.args)
            .arg(format!("--log-file={}", self.log_file.display()))
            .arg(program);
        command
    }
}

/// `--version` 출력에서 버전을 꺼냅니다: 두 번째 줄의 세 번째 토큰
///
/// ```text
/// syslog-ng 3 (3.38.1)
/// Config version: 3.38
/// ```
pub fn parse_version_output(output: &str) -> Result<String, HarnessError> {
    output
        .lines()
        .nth(1)
        .and_then(|line| line.split_whitespace().nth(2))
        .map(str::to_owned)
        .ok_or_else(|| HarnessError::VersionParse {
            output: output.to_owned(),
        })
}

/// `@version:`에 쓸 `major.minor` 부분
pub fn config_version(version: &str) -> String {
    let mut parts = version.split('.');
    match (parts.next(), parts.next()) {
        (Some(major), Some(minor)) => format!("{major}.{minor}"),
        _ => version.to_owned(),
    }
}
