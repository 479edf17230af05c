//! syslog-ng 설정 객체 모델
//!
//! 기능 테스트가 사용할 syslog-ng 설정을 메모리에서 선언적으로 구성하고,
//! syslog-ng 설정 파일 문법으로 렌더링하여 디스크에 기록합니다.
//!
//! # 모듈 구성
//!
//! - [`statement`]: source / destination / filter 구문과 타입이 있는 옵션 레코드
//! - [`group`]: 하나의 식별자로 묶인 구문 그룹
//! - [`logpath`]: `log { ... };` 블록 (그룹 참조 + 플래그)
//! - [`syslog_ng_config`]: 집계 루트 [`SyslogNgConfig`]
//! - [`renderer`]: 설정 텍스트 렌더러
//! - [`file_io`]: 설정 파일 기록
//! - [`option`]: 옵션 값 표현
//! - [`error`]: 도메인 에러 타입
//!
//! # 데이터 흐름
//!
//! ```text
//! create_* 호출 -> SyslogNgConfig (그룹/로그 경로 등록) -> ConfigRenderer -> FileIo::rewrite
//! ```

pub mod error;
pub mod file_io;
pub mod group;
pub mod logpath;
pub mod option;
pub mod renderer;
pub mod statement;
pub mod syslog_ng_config;

// --- 주요 타입 re-export ---

// 집계 루트
pub use syslog_ng_config::SyslogNgConfig;

// 구문
pub use statement::{
    FileDestination, FileDestinationOptions, FileSource, FileSourceOptions, Filter,
    FilterOptions, Statement, StatementKind,
};

// 그룹 / 로그 경로
pub use group::StatementGroup;
pub use logpath::{LogPath, LogPathInput, LogPathItem};

// 렌더링 / 기록
pub use file_io::FileIo;
pub use renderer::ConfigRenderer;

// 옵션 값
pub use option::OptionValue;

// 에러
pub use error::SyslogNgConfigError;
