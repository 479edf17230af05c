//! 테스트 케이스 준비
//!
//! 테스트 케이스마다 `<reports>/<name>/` 작업 디렉토리를 만들고,
//! 그 디렉토리를 기준으로 하는 새 설정 집계를 제공합니다.

use std::path::{Path, PathBuf};

use ngtest_syslog_ng_config::SyslogNgConfig;
use tracing::debug;

use crate::binary::ValgrindWrapper;
use crate::error::HarnessError;
use crate::options::HarnessOptions;
use crate::report::{report_file_path, testcase_dir};

/// 준비된 테스트 케이스
#[derive(Debug, Clone)]
pub struct TestCase {
    name: String,
    working_dir: PathBuf,
    config_path: PathBuf,
    report_file: PathBuf,
    version: Option<String>,
}

impl TestCase {
    /// 작업 디렉토리를 만들고 경로를 확정합니다.
    ///
    /// `version`은 새 설정 집계에 미리 넣을 `@version:` 값입니다.
    pub fn setup(
        options: &HarnessOptions,
        name: &str,
        version: Option<&str>,
    ) -> Result<Self, HarnessError> {
        let report_file = report_file_path(&options.reports_dir, name)?;
        let working_dir = report_file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| testcase_dir(&options.reports_dir, name));

        std::fs::create_dir_all(&working_dir).map_err(|source| HarnessError::Report {
            path: working_dir.display().to_string(),
            source,
        })?;

        let config_path = working_dir.join(&options.config_file_name);
        debug!(
            testcase = name,
            working_dir = %working_dir.display(),
            "test case prepared"
        );

        Ok(Self {
            name: name.to_owned(),
            working_dir,
            config_path,
            report_file,
            version: version.map(str::to_owned),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 절대 경로인 테스트 케이스 디렉토리
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// `testcase_<name>.log`
    pub fn report_file(&self) -> &Path {
        &self.report_file
    }

    /// 작업 디렉토리를 기준으로 하는 새 설정 집계
    pub fn new_config(&self) -> SyslogNgConfig {
        let mut config = SyslogNgConfig::new(&self.working_dir);
        if let Some(ref version) = self.version {
            config.set_version(version.clone());
        }
        config
    }

    /// 이 테스트 케이스 디렉토리에 로그를 남기는 valgrind 래퍼
    pub fn valgrind(&self, options: &HarnessOptions) -> Option<ValgrindWrapper> {
        options
            .run_with_valgrind
            .then(|| ValgrindWrapper::new(&options.valgrind, &self.working_dir))
    }
}
