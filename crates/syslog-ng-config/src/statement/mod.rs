//! syslog-ng 구문 (source / destination / filter)
//!
//! 각 구문 종류는 인식하는 옵션을 이름 있는 필드로 가진 옵션 레코드를 사용합니다.
//! 구문 객체는 그룹이나 로그 경로에 배치되기 전까지 어디에도 등록되지 않습니다.

pub mod destination;
pub mod filter;
pub mod source;

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::option::OptionValue;

pub use destination::{FileDestination, FileDestinationOptions};
pub use filter::{Filter, FilterOptions};
pub use source::{FileSource, FileSourceOptions};

/// 구문 종류 -- 그룹 블록 키워드와 로그 경로 참조 키워드를 결정합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementKind {
    Source,
    Destination,
    Filter,
}

impl StatementKind {
    /// syslog-ng 설정 키워드
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Destination => "destination",
            Self::Filter => "filter",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 옵션 레코드를 `key(value)` 쌍 목록으로 변환합니다.
///
/// 값이 설정된 옵션만 선언 순서대로 반환합니다.
pub trait StatementOptions {
    fn option_pairs(&self) -> Vec<(&'static str, OptionValue)>;
}

/// 하나의 syslog-ng 구문
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    FileSource(FileSource),
    FileDestination(FileDestination),
    Filter(Filter),
}

impl Statement {
    /// 구문 종류
    pub fn kind(&self) -> StatementKind {
        match self {
            Self::FileSource(_) => StatementKind::Source,
            Self::FileDestination(_) => StatementKind::Destination,
            Self::Filter(_) => StatementKind::Filter,
        }
    }

    /// 그룹 블록 안에 들어갈 구문 본문을 렌더링합니다 (끝의 `;` 제외).
    ///
    /// 상대 파일 경로는 `working_dir` 기준으로 해석됩니다.
    pub fn render(&self, working_dir: &Path) -> String {
        match self {
            Self::FileSource(source) => source.render(working_dir),
            Self::FileDestination(destination) => destination.render(working_dir),
            Self::Filter(filter) => filter.render(),
        }
    }
}

impl From<FileSource> for Statement {
    fn from(source: FileSource) -> Self {
        Self::FileSource(source)
    }
}

impl From<FileDestination> for Statement {
    fn from(destination: FileDestination) -> Self {
        Self::FileDestination(destination)
    }
}

impl From<Filter> for Statement {
    fn from(filter: Filter) -> Self {
        Self::Filter(filter)
    }
}

/// 파일 드라이버 구문 렌더링: `file("<path>" opt(v) ...)`
pub(crate) fn render_file_driver(
    file_name: &Path,
    working_dir: &Path,
    pairs: &[(&str, OptionValue)],
) -> String {
    let path = resolve_path(file_name, working_dir);
    let path_literal = crate::option::quote(&path.to_string_lossy());
    if pairs.is_empty() {
        format!("file({path_literal})")
    } else {
        format!(
            "file({path_literal} {})",
            crate::option::render_pairs(pairs)
        )
    }
}

/// 상대 경로를 작업 디렉토리 기준 경로로 바꿉니다.
pub(crate) fn resolve_path(file_name: &Path, working_dir: &Path) -> PathBuf {
    if file_name.is_absolute() {
        file_name.to_path_buf()
    } else {
        working_dir.join(file_name)
    }
}

/// 비어 있지 않은 플래그 목록을 `flags(a, b)` 값으로 만듭니다.
pub(crate) fn flags_value(flags: &[String]) -> Option<OptionValue> {
    if flags.is_empty() {
        None
    } else {
        Some(OptionValue::bare(flags.join(", ")))
    }
}
