//! 설정 관리 -- ngtest.toml 파싱 및 런타임 설정
//!
//! [`NgtestConfig`]는 하네스 전체 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`NGTEST_HARNESS_INSTALLDIR=/opt/syslog-ng` 형식)
//! 3. 설정 파일 (`ngtest.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), ngtest_core::error::NgtestError> {
//! use ngtest_core::config::NgtestConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = NgtestConfig::load("ngtest.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = NgtestConfig::parse("[harness]\nrun_slow = true")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, NgtestError};

/// ngtest 통합 설정
///
/// `ngtest.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NgtestConfig {
    /// 일반 설정 (로깅)
    #[serde(default)]
    pub general: GeneralConfig,
    /// 테스트 실행 설정
    #[serde(default)]
    pub harness: HarnessConfig,
    /// valgrind 래퍼 설정
    #[serde(default)]
    pub valgrind: ValgrindConfig,
}

impl NgtestConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, NgtestError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 설정 파일이 없으면 기본값에 환경변수 오버라이드만 적용합니다.
    ///
    /// 파일이 존재하지만 파싱/검증에 실패하면 에러를 반환합니다.
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self, NgtestError> {
        let path = path.as_ref();
        match Self::load(path).await {
            Err(NgtestError::Config(ConfigError::FileNotFound { .. })) => {
                tracing::debug!(path = %path.display(), "config file not found, using defaults");
                let mut config = Self::default();
                config.apply_env_overrides();
                config.validate()?;
                Ok(config)
            }
            other => other,
        }
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, NgtestError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                NgtestError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                NgtestError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, NgtestError> {
        toml::from_str(toml_str).map_err(|e| {
            NgtestError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `NGTEST_{SECTION}_{FIELD}`
    /// 예: `NGTEST_HARNESS_RUN_SLOW=true`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "NGTEST_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "NGTEST_GENERAL_LOG_FORMAT");

        // Harness
        override_string(&mut self.harness.installdir, "NGTEST_HARNESS_INSTALLDIR");
        override_string(&mut self.harness.reports_dir, "NGTEST_HARNESS_REPORTS_DIR");
        override_bool(&mut self.harness.run_slow, "NGTEST_HARNESS_RUN_SLOW");
        override_bool(
            &mut self.harness.run_with_valgrind,
            "NGTEST_HARNESS_RUN_WITH_VALGRIND",
        );
        override_bool(&mut self.harness.syntax_check, "NGTEST_HARNESS_SYNTAX_CHECK");
        override_string(
            &mut self.harness.config_file_name,
            "NGTEST_HARNESS_CONFIG_FILE_NAME",
        );

        // Valgrind
        override_string(&mut self.valgrind.binary, "NGTEST_VALGRIND_BINARY");
        override_csv(&mut self.valgrind.args, "NGTEST_VALGRIND_ARGS");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), NgtestError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        // 설정 파일 이름은 테스트 작업 디렉토리 안에 만들어지므로 경로 구분자 불가
        let file_name = &self.harness.config_file_name;
        if file_name.is_empty() || file_name.contains('/') || file_name.contains('\\') {
            return Err(ConfigError::InvalidValue {
                field: "harness.config_file_name".to_owned(),
                reason: "must be a non-empty file name without path separators".to_owned(),
            }
            .into());
        }

        if self.harness.run_with_valgrind && self.valgrind.binary.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "valgrind.binary".to_owned(),
                reason: "binary must not be empty when run_with_valgrind is enabled".to_owned(),
            }
            .into());
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 테스트 실행 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// syslog-ng 설치 디렉토리 (빈 문자열이면 데몬 호출 없이 렌더링만 수행)
    pub installdir: String,
    /// 리포트 디렉토리 (빈 문자열이면 `reports/<현재 시각>`)
    pub reports_dir: String,
    /// slow 표시된 시나리오 실행 여부
    pub run_slow: bool,
    /// 데몬을 valgrind 아래에서 실행할지 여부
    pub run_with_valgrind: bool,
    /// 생성된 설정에 대해 `--syntax-only` 검사 수행 여부
    pub syntax_check: bool,
    /// 테스트별 작업 디렉토리에 생성할 설정 파일 이름
    pub config_file_name: String,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            installdir: String::new(),
            reports_dir: String::new(),
            run_slow: false,
            run_with_valgrind: false,
            syntax_check: true,
            config_file_name: "syslog_ng_server.conf".to_owned(),
        }
    }
}

/// valgrind 래퍼 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValgrindConfig {
    /// valgrind 실행 파일
    pub binary: String,
    /// 추가 인자 (`--log-file`은 하네스가 테스트별로 붙임)
    pub args: Vec<String>,
}

impl Default for ValgrindConfig {
    fn default() -> Self {
        Self {
            binary: "valgrind".to_owned(),
            args: vec!["--leak-check=full".to_owned(), "--error-exitcode=1".to_owned()],
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_bool(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<bool>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse bool from env var, ignoring"
            ),
        }
    }
}

fn override_csv(target: &mut Vec<String>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn default_config_is_valid() {
        NgtestConfig::default().validate().unwrap();
    }

    #[test]
    fn defaults_match_harness_expectations() {
        let config = NgtestConfig::default();
        assert!(!config.harness.run_slow);
        assert!(!config.harness.run_with_valgrind);
        assert!(config.harness.syntax_check);
        assert!(config.harness.installdir.is_empty());
        assert_eq!(config.harness.config_file_name, "syslog_ng_server.conf");
        assert_eq!(config.valgrind.binary, "valgrind");
    }

    #[test]
    fn parse_partial_config_fills_defaults() {
        let config = NgtestConfig::parse(
            r#"
[harness]
installdir = "/opt/syslog-ng"
run_slow = true
"#,
        )
        .unwrap();
        assert_eq!(config.harness.installdir, "/opt/syslog-ng");
        assert!(config.harness.run_slow);
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.valgrind.args.len(), 2);
    }

    #[test]
    fn parse_invalid_toml_returns_error() {
        let err = NgtestConfig::parse("invalid = [[[toml").unwrap_err();
        assert!(matches!(
            err,
            NgtestError::Config(ConfigError::ParseFailed { .. })
        ));
    }

    #[test]
    fn validate_rejects_invalid_log_level() {
        let mut config = NgtestConfig::default();
        config.general.log_level = "verbose".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log_level"));
    }

    #[test]
    fn validate_rejects_invalid_log_format() {
        let mut config = NgtestConfig::default();
        config.general.log_format = "xml".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log_format"));
    }

    #[test]
    fn validate_rejects_config_file_name_with_separator() {
        let mut config = NgtestConfig::default();
        config.harness.config_file_name = "../escape.conf".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("config_file_name"));
    }

    #[test]
    fn validate_rejects_empty_valgrind_binary_when_enabled() {
        let mut config = NgtestConfig::default();
        config.harness.run_with_valgrind = true;
        config.valgrind.binary = String::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("valgrind.binary"));
    }

    #[test]
    fn validate_accepts_empty_valgrind_binary_when_disabled() {
        let mut config = NgtestConfig::default();
        config.valgrind.binary = String::new();
        config.validate().unwrap();
    }

    #[test]
    #[serial]
    fn env_override_string() {
        let mut val = "original".to_owned();
        // SAFETY: serial 테스트로 실행되어 환경변수를 동시에 조작하지 않습니다.
        unsafe { std::env::set_var("TEST_NGTEST_STR", "overridden") };
        override_string(&mut val, "TEST_NGTEST_STR");
        assert_eq!(val, "overridden");
        unsafe { std::env::remove_var("TEST_NGTEST_STR") };
    }

    #[test]
    #[serial]
    fn env_override_bool_invalid_keeps_original() {
        let mut val = false;
        // SAFETY: serial 테스트로 실행되어 환경변수를 동시에 조작하지 않습니다.
        unsafe { std::env::set_var("TEST_NGTEST_BOOL_BAD", "not-a-bool") };
        override_bool(&mut val, "TEST_NGTEST_BOOL_BAD");
        assert!(!val);
        unsafe { std::env::remove_var("TEST_NGTEST_BOOL_BAD") };
    }

    #[test]
    #[serial]
    fn env_override_csv() {
        let mut val = vec!["a".to_owned()];
        // SAFETY: serial 테스트로 실행되어 환경변수를 동시에 조작하지 않습니다.
        unsafe { std::env::set_var("TEST_NGTEST_CSV", "--leak-check=no, --quiet") };
        override_csv(&mut val, "TEST_NGTEST_CSV");
        assert_eq!(val, vec!["--leak-check=no", "--quiet"]);
        unsafe { std::env::remove_var("TEST_NGTEST_CSV") };
    }

    #[test]
    #[serial]
    fn apply_env_overrides_updates_harness_section() {
        let mut config = NgtestConfig::default();
        // SAFETY: serial 테스트로 실행되어 환경변수를 동시에 조작하지 않습니다.
        unsafe {
            std::env::set_var("NGTEST_HARNESS_RUN_SLOW", "true");
            std::env::set_var("NGTEST_HARNESS_INSTALLDIR", "/opt/sng");
        }
        config.apply_env_overrides();
        unsafe {
            std::env::remove_var("NGTEST_HARNESS_RUN_SLOW");
            std::env::remove_var("NGTEST_HARNESS_INSTALLDIR");
        }
        assert!(config.harness.run_slow);
        assert_eq!(config.harness.installdir, "/opt/sng");
    }

    #[test]
    fn config_serialize_roundtrip() {
        let config = NgtestConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed = NgtestConfig::parse(&toml_str).unwrap();
        assert_eq!(config.general.log_level, parsed.general.log_level);
        assert_eq!(
            config.harness.config_file_name,
            parsed.harness.config_file_name
        );
    }

    #[tokio::test]
    async fn from_file_not_found() {
        let err = NgtestConfig::from_file("/nonexistent/path/ngtest.toml")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            NgtestError::Config(ConfigError::FileNotFound { .. })
        ));
    }

    #[tokio::test]
    #[serial]
    async fn load_or_default_uses_defaults_for_missing_file() {
        let config = NgtestConfig::load_or_default("/nonexistent/path/ngtest.toml")
            .await
            .unwrap();
        assert_eq!(config.harness.config_file_name, "syslog_ng_server.conf");
    }
}
