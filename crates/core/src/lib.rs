//! ngtest 공통 크레이트
//!
//! syslog-ng 기능 테스트 하네스 전체에서 공유하는 에러 타입과
//! `ngtest.toml` 하네스 설정을 제공합니다.
//!
//! - [`config`]: 하네스 설정 (파일 + 환경변수 오버라이드 + 기본값)
//! - [`error`]: 최상위 에러 및 설정 에러

pub mod config;
pub mod error;

// --- 주요 타입 re-export ---

// 에러
pub use error::{ConfigError, NgtestError};

// 설정
pub use config::{GeneralConfig, HarnessConfig, NgtestConfig, ValgrindConfig};
