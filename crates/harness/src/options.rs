//! 실행 옵션 -- 설정 파일, 환경 변수, 명령행 옵션을 합친 최종 값

use std::path::PathBuf;

use ngtest_core::config::{NgtestConfig, ValgrindConfig};

use crate::error::HarnessError;
use crate::report::relative_report_dir;

/// 명령행에서 넘어온 값 (설정보다 우선)
#[derive(Debug, Clone, Default)]
pub struct HarnessOverrides {
    /// `--installdir`
    pub installdir: Option<PathBuf>,
    /// `--reports`
    pub reports: Option<PathBuf>,
    /// `--runslow`
    pub run_slow: bool,
    /// `--run-with-valgrind`
    pub run_with_valgrind: bool,
}

/// 한 번의 실행에 쓰이는 확정된 옵션
#[derive(Debug, Clone)]
pub struct HarnessOptions {
    /// syslog-ng 설치 디렉토리 (없으면 바이너리를 호출하지 않음)
    pub installdir: Option<PathBuf>,
    /// 리포트 디렉토리
    pub reports_dir: PathBuf,
    pub run_slow: bool,
    pub run_with_valgrind: bool,
    /// 설정 파일 기록 후 `--syntax-only` 검사 수행 여부
    pub syntax_check: bool,
    /// 테스트 케이스 디렉토리 안의 설정 파일 이름
    pub config_file_name: String,
    pub valgrind: ValgrindConfig,
}

impl HarnessOptions {
    /// 설정과 명령행 값을 합칩니다.
    ///
    /// 불리언 플래그는 어느 한쪽이라도 켜면 켜집니다. 리포트 디렉토리가
    /// 어디에도 없으면 `reports/<timestamp>`를 씁니다.
    pub fn resolve(config: &NgtestConfig, overrides: HarnessOverrides) -> Self {
        let harness = &config.harness;

        let installdir = overrides.installdir.or_else(|| {
            (!harness.installdir.is_empty()).then(|| PathBuf::from(&harness.installdir))
        });

        let reports_dir = overrides.reports.unwrap_or_else(|| {
            if harness.reports_dir.is_empty() {
                relative_report_dir()
            } else {
                PathBuf::from(&harness.reports_dir)
            }
        });

        Self {
            installdir,
            reports_dir,
            run_slow: overrides.run_slow || harness.run_slow,
            run_with_valgrind: overrides.run_with_valgrind || harness.run_with_valgrind,
            syntax_check: harness.syntax_check,
            config_file_name: harness.config_file_name.clone(),
            valgrind: config.valgrind.clone(),
        }
    }

    /// 합쳐진 값을 검증합니다.
    ///
    /// 설정 파일 검증은 명령행 플래그가 합쳐지기 전에 이루어지므로,
    /// `--run-with-valgrind`로 켠 경우도 여기서 다시 확인합니다.
    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.run_with_valgrind && self.valgrind.binary.trim().is_empty() {
            return Err(HarnessError::InvalidOptions {
                field: "valgrind.binary".to_owned(),
                reason: "binary must not be empty when running with valgrind".to_owned(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::REPORTS_ROOT;

    #[test]
    fn defaults_use_timestamped_reports_dir() {
        let options = HarnessOptions::resolve(&NgtestConfig::default(), HarnessOverrides::default());
        assert!(options.installdir.is_none());
        assert!(options.reports_dir.starts_with(REPORTS_ROOT));
        assert!(!options.run_slow);
        assert!(!options.run_with_valgrind);
        assert!(options.syntax_check);
        assert_eq!(options.config_file_name, "syslog_ng_server.conf");
    }

    #[test]
    fn config_values_are_used() {
        let mut config = NgtestConfig::default();
        config.harness.installdir = "/opt/syslog-ng".to_owned();
        config.harness.reports_dir = "/tmp/reports".to_owned();
        config.harness.run_slow = true;

        let options = HarnessOptions::resolve(&config, HarnessOverrides::default());
        assert_eq!(options.installdir, Some(PathBuf::from("/opt/syslog-ng")));
        assert_eq!(options.reports_dir, PathBuf::from("/tmp/reports"));
        assert!(options.run_slow);
    }

    #[test]
    fn overrides_win_over_config() {
        let mut config = NgtestConfig::default();
        config.harness.installdir = "/opt/syslog-ng".to_owned();
        config.harness.reports_dir = "/tmp/reports".to_owned();

        let overrides = HarnessOverrides {
            installdir: Some(PathBuf::from("/install")),
            reports: Some(PathBuf::from("out")),
            run_slow: true,
            run_with_valgrind: true,
        };
        let options = HarnessOptions::resolve(&config, overrides);
        assert_eq!(options.installdir, Some(PathBuf::from("/install")));
        assert_eq!(options.reports_dir, PathBuf::from("out"));
        assert!(options.run_slow);
        assert!(options.run_with_valgrind);
    }

    #[test]
    fn cli_valgrind_flag_requires_binary() {
        let mut config = NgtestConfig::default();
        config.valgrind.binary = String::new();
        // 설정 파일 단계에서는 valgrind가 꺼져 있어 통과함
        config.validate().unwrap();

        let overrides = HarnessOverrides {
            run_with_valgrind: true,
            ..HarnessOverrides::default()
        };
        let options = HarnessOptions::resolve(&config, overrides);
        let err = options.validate().unwrap_err();
        assert!(matches!(
            err,
            HarnessError::InvalidOptions { ref field, .. } if field == "valgrind.binary"
        ));
    }

    #[test]
    fn empty_valgrind_binary_is_fine_without_valgrind() {
        let mut config = NgtestConfig::default();
        config.valgrind.binary = String::new();
        let options = HarnessOptions::resolve(&config, HarnessOverrides::default());
        options.validate().unwrap();
    }
}
