//! 로그 경로 -- `log { ... };` 블록
//!
//! 로그 경로는 구문 그룹 참조와 중첩 로그 경로를 삽입 순서대로 보관하고,
//! 그 뒤에 플래그를 붙입니다. 렌더링 순서는 삽입 순서와 같습니다.

use std::sync::Arc;

use tracing::warn;

use crate::group::StatementGroup;
use crate::statement::{FileDestination, FileSource, Filter, Statement};

/// syslog-ng가 인식하는 로그 경로 플래그
pub const KNOWN_FLAGS: &[&str] = &[
    "final",
    "fallback",
    "catchall",
    "flow-control",
    "drop-unmatched",
];

const GROUP_TYPE: &str = "log";

/// 로그 경로 항목
#[derive(Debug, Clone, PartialEq)]
pub enum LogPathItem {
    /// 구문 그룹 참조 (같은 그룹 인스턴스를 여러 경로에서 참조 가능)
    Group(Arc<StatementGroup>),
    /// 중첩 로그 경로
    LogPath(LogPath),
}

impl LogPathItem {
    /// 렌더링 키워드 (`source`, `destination`, `filter`, `log`)
    pub fn group_type(&self) -> &'static str {
        match self {
            Self::Group(group) => group.group_type().as_str(),
            Self::LogPath(_) => GROUP_TYPE,
        }
    }
}

impl From<Arc<StatementGroup>> for LogPathItem {
    fn from(group: Arc<StatementGroup>) -> Self {
        Self::Group(group)
    }
}

impl From<LogPath> for LogPathItem {
    fn from(logpath: LogPath) -> Self {
        Self::LogPath(logpath)
    }
}

/// 로그 경로를 만들 때 넘길 수 있는 입력
///
/// 원시 구문(하나 또는 여러 개)은 새 구문 그룹으로 감싸지고,
/// 이미 만들어진 그룹과 로그 경로는 그대로 사용됩니다.
/// 변환은 [`SyslogNgConfig::create_statement_group_if_needed`](crate::SyslogNgConfig::create_statement_group_if_needed)가 담당합니다.
#[derive(Debug, Clone)]
pub enum LogPathInput {
    Statement(Statement),
    Statements(Vec<Statement>),
    Group(Arc<StatementGroup>),
    LogPath(LogPath),
}

impl From<Statement> for LogPathInput {
    fn from(statement: Statement) -> Self {
        Self::Statement(statement)
    }
}

impl From<FileSource> for LogPathInput {
    fn from(source: FileSource) -> Self {
        Self::Statement(source.into())
    }
}

impl From<FileDestination> for LogPathInput {
    fn from(destination: FileDestination) -> Self {
        Self::Statement(destination.into())
    }
}

impl From<Filter> for LogPathInput {
    fn from(filter: Filter) -> Self {
        Self::Statement(filter.into())
    }
}

impl From<Vec<Statement>> for LogPathInput {
    fn from(statements: Vec<Statement>) -> Self {
        Self::Statements(statements)
    }
}

impl From<Arc<StatementGroup>> for LogPathInput {
    fn from(group: Arc<StatementGroup>) -> Self {
        Self::Group(group)
    }
}

impl From<LogPath> for LogPathInput {
    fn from(logpath: LogPath) -> Self {
        Self::LogPath(logpath)
    }
}

/// 로그 경로
///
/// 추가 메서드는 종류별로 나뉘어 있지만 모두 같은 순서 목록에 덧붙입니다.
/// 중복 제거나 종류 검증은 하지 않습니다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogPath {
    logpath: Vec<LogPathItem>,
    flags: Vec<String>,
}

impl LogPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// 항상 `"log"`
    pub fn group_type(&self) -> &'static str {
        GROUP_TYPE
    }

    /// 삽입 순서대로의 항목 목록
    pub fn logpath(&self) -> &[LogPathItem] {
        &self.logpath
    }

    /// 삽입 순서대로의 플래그 목록
    pub fn flags(&self) -> &[String] {
        &self.flags
    }

    pub fn add_source_group(&mut self, source_group: Arc<StatementGroup>) {
        self.add_group(source_group);
    }

    pub fn add_source_groups(&mut self, source_groups: impl IntoIterator<Item = Arc<StatementGroup>>) {
        self.add_groups(source_groups);
    }

    pub fn add_destination_group(&mut self, destination_group: Arc<StatementGroup>) {
        self.add_group(destination_group);
    }

    pub fn add_destination_groups(
        &mut self,
        destination_groups: impl IntoIterator<Item = Arc<StatementGroup>>,
    ) {
        self.add_groups(destination_groups);
    }

    pub fn add_filter_group(&mut self, filter_group: Arc<StatementGroup>) {
        self.add_group(filter_group);
    }

    pub fn add_filter_groups(&mut self, filter_groups: impl IntoIterator<Item = Arc<StatementGroup>>) {
        self.add_groups(filter_groups);
    }

    pub fn add_logpath_group(&mut self, logpath_group: LogPath) {
        self.add_group(logpath_group);
    }

    pub fn add_logpath_groups(&mut self, logpath_groups: impl IntoIterator<Item = LogPath>) {
        self.add_groups(logpath_groups);
    }

    /// 그룹 또는 중첩 로그 경로 하나를 덧붙입니다.
    pub fn add_group(&mut self, item: impl Into<LogPathItem>) {
        self.logpath.push(item.into());
    }

    /// 여러 항목을 순서대로 덧붙입니다.
    pub fn add_groups<T: Into<LogPathItem>>(&mut self, items: impl IntoIterator<Item = T>) {
        for item in items {
            self.add_group(item);
        }
    }

    /// 플래그를 덧붙입니다.
    ///
    /// 알 수 없는 플래그도 그대로 유지하며 경고만 남깁니다.
    pub fn add_flag(&mut self, flag: impl Into<String>) {
        let flag = flag.into();
        if !KNOWN_FLAGS.contains(&flag.as_str()) {
            warn!(flag = %flag, "unknown log path flag, daemon may reject the config");
        }
        self.flags.push(flag);
    }

    pub fn add_flags<S: Into<String>>(&mut self, flags: impl IntoIterator<Item = S>) {
        for flag in flags {
            self.add_flag(flag);
        }
    }
}
