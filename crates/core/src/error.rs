//! 에러 타입 -- 하네스 공통 에러 정의

/// ngtest 최상위 에러 타입
///
/// 각 도메인 크레이트의 에러는 `From` 변환을 통해 이 타입으로 모입니다.
#[derive(Debug, thiserror::Error)]
pub enum NgtestError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// syslog-ng 설정 모델/렌더링 에러
    #[error("syslog-ng config error: {0}")]
    SyslogNgConfig(String),

    /// 테스트 실행 에러
    #[error("harness error: {0}")]
    Harness(String),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_converts_to_top_level() {
        let err: NgtestError = ConfigError::FileNotFound {
            path: "ngtest.toml".to_owned(),
        }
        .into();
        assert!(matches!(err, NgtestError::Config(_)));
        assert!(err.to_string().contains("ngtest.toml"));
    }

    #[test]
    fn invalid_value_display_names_field() {
        let err = ConfigError::InvalidValue {
            field: "general.log_level".to_owned(),
            reason: "must be one of: info".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("general.log_level"));
        assert!(msg.contains("must be one of"));
    }

    #[test]
    fn io_error_converts_to_top_level() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: NgtestError = io_err.into();
        assert!(matches!(err, NgtestError::Io(_)));
    }
}
