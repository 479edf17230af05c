//! 테스트 러너 에러 타입
//!
//! [`HarnessError`]는 시나리오 로딩, 테스트 케이스 준비, syslog-ng 바이너리 호출
//! 중 발생하는 에러를 표현합니다. `From<HarnessError> for NgtestError` 변환이
//! 구현되어 있어 상위 레이어에서 `?` 연산자로 전파할 수 있습니다.

use ngtest_core::error::NgtestError;
use ngtest_syslog_ng_config::SyslogNgConfigError;

/// 테스트 러너 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// 시나리오 파일 로딩 실패
    #[error("failed to load scenario from {path}: {reason}")]
    ScenarioLoad {
        /// 시나리오 파일 또는 디렉토리 경로
        path: String,
        /// 실패 사유
        reason: String,
    },

    /// 시나리오 내용이 유효하지 않음
    #[error("invalid scenario '{name}': {reason}")]
    InvalidScenario {
        /// 시나리오 이름
        name: String,
        /// 거부 사유
        reason: String,
    },

    /// 설정과 명령행 값을 합친 실행 옵션이 유효하지 않음
    #[error("invalid harness option '{field}': {reason}")]
    InvalidOptions {
        /// 옵션 이름
        field: String,
        /// 거부 사유
        reason: String,
    },

    /// syslog-ng 바이너리 실행 실패
    #[error("failed to run {binary}: {reason}")]
    Binary {
        /// 실행 파일 경로
        binary: String,
        /// 실패 사유
        reason: String,
    },

    /// `--version` 출력에서 버전을 찾을 수 없음
    #[error("cannot parse syslog-ng version from output: {output:?}")]
    VersionParse {
        /// 원본 출력
        output: String,
    },

    /// 리포트 디렉토리/파일 준비 실패
    #[error("report io error on {path}: {source}")]
    Report {
        /// 대상 경로
        path: String,
        /// 원인 I/O 에러
        #[source]
        source: std::io::Error,
    },

    /// 설정 모델 에러
    #[error(transparent)]
    Config(#[from] SyslogNgConfigError),
}

impl From<HarnessError> for NgtestError {
    fn from(err: HarnessError) -> Self {
        match err {
            HarnessError::Report { source, .. } => NgtestError::Io(source),
            HarnessError::Config(inner) => inner.into(),
            other => NgtestError::Harness(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_scenario_display() {
        let err = HarnessError::InvalidScenario {
            name: "file_to_file".to_owned(),
            reason: "unknown group 'd_missing'".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("file_to_file"));
        assert!(msg.contains("d_missing"));
    }

    #[test]
    fn config_error_is_transparent() {
        let err = HarnessError::from(SyslogNgConfigError::DuplicateGroupId {
            id: "s_in".to_owned(),
        });
        assert_eq!(err.to_string(), "duplicate statement group id: s_in");
    }

    #[test]
    fn converts_to_ngtest_error() {
        let err = HarnessError::VersionParse {
            output: String::new(),
        };
        assert!(matches!(NgtestError::from(err), NgtestError::Harness(_)));

        let err = HarnessError::Report {
            path: "reports".to_owned(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(matches!(NgtestError::from(err), NgtestError::Io(_)));

        let err = HarnessError::Config(SyslogNgConfigError::EmptyGroup {
            id: "x".to_owned(),
        });
        assert!(matches!(
            NgtestError::from(err),
            NgtestError::SyslogNgConfig(_)
        ));
    }
}
