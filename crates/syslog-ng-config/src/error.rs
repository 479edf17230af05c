//! syslog-ng 설정 모델 에러 타입
//!
//! [`SyslogNgConfigError`]는 구문 그룹 구성과 설정 파일 기록 중 발생하는
//! 에러를 표현합니다. `From<SyslogNgConfigError> for NgtestError` 변환이
//! 구현되어 있어 상위 레이어에서 `?` 연산자로 전파할 수 있습니다.
//!
//! 설정 문법의 유효성 자체는 검증하지 않습니다. 최종 판단은 syslog-ng 데몬이
//! 설정 파일을 읽을 때 내려집니다.

use ngtest_core::error::NgtestError;

use crate::statement::StatementKind;

/// syslog-ng 설정 모델 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum SyslogNgConfigError {
    /// 구문이 하나도 없는 그룹
    #[error("statement group '{id}' must contain at least one statement")]
    EmptyGroup {
        /// 그룹 식별자
        id: String,
    },

    /// 서로 다른 종류의 구문이 섞인 그룹
    #[error("statement group '{id}' mixes {expected} and {found} statements")]
    MixedGroup {
        /// 그룹 식별자
        id: String,
        /// 첫 번째 구문의 종류
        expected: StatementKind,
        /// 섞여 들어온 구문의 종류
        found: StatementKind,
    },

    /// 조건이 하나도 없는 filter 구문
    #[error("statement group '{id}' contains a filter without conditions")]
    EmptyFilter {
        /// 그룹 식별자
        id: String,
    },

    /// 같은 설정 안에서 이미 사용 중인 그룹 식별자
    #[error("duplicate statement group id: {id}")]
    DuplicateGroupId {
        /// 중복된 식별자
        id: String,
    },

    /// syslog-ng 식별자로 쓸 수 없는 그룹 이름
    #[error("invalid statement group id '{id}': {reason}")]
    InvalidGroupId {
        /// 문제가 된 식별자
        id: String,
        /// 거부 사유
        reason: String,
    },

    /// 설정 파일 I/O 에러
    #[error("io error on {path}: {source}")]
    Io {
        /// 대상 파일 경로
        path: String,
        /// 원인 I/O 에러
        #[source]
        source: std::io::Error,
    },
}

impl From<SyslogNgConfigError> for NgtestError {
    fn from(err: SyslogNgConfigError) -> Self {
        match err {
            SyslogNgConfigError::Io { source, .. } => NgtestError::Io(source),
            other => NgtestError::SyslogNgConfig(other.to_string()),
        }
    }
}
