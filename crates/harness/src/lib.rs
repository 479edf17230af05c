//! syslog-ng 기능 테스트 러너
//!
//! YAML 시나리오를 읽어 테스트 케이스마다 작업 디렉토리를 준비하고,
//! 설정 파일을 생성한 뒤 설치된 syslog-ng로 문법 검사를 수행합니다.
//!
//! # 모듈 구성
//!
//! - [`options`]: 설정 파일과 명령행 옵션을 합친 실행 옵션
//! - [`report`]: 리포트 디렉토리와 테스트 케이스 리포트 파일 경로
//! - [`scenario`]: 시나리오 스키마와 설정 집계 구성
//! - [`loader`]: 시나리오 디렉토리 로더
//! - [`binary`]: syslog-ng 바이너리 호출 (버전, 문법 검사, valgrind)
//! - [`testcase`]: 테스트 케이스 준비
//! - [`runner`]: 실행과 결과 집계
//! - [`error`]: 도메인 에러 타입

pub mod binary;
pub mod error;
pub mod loader;
pub mod options;
pub mod report;
pub mod runner;
pub mod scenario;
pub mod testcase;

// --- 주요 타입 re-export ---

pub use binary::{SyntaxCheck, SyslogNgBinary, ValgrindWrapper, config_version, parse_version_output};
pub use error::HarnessError;
pub use loader::ScenarioLoader;
pub use options::{HarnessOptions, HarnessOverrides};
pub use report::{current_date, relative_report_dir, report_file_path};
pub use runner::{CaseReport, Outcome, Runner, SLOW_SKIP_REASON, SuiteReport};
pub use scenario::{LogPathItemSpec, LogPathSpec, Scenario};
pub use testcase::TestCase;
