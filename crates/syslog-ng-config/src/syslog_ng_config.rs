//! 집계 루트 -- 메모리 내 syslog-ng 설정
//!
//! [`SyslogNgConfig`]는 구문 생성, 그룹/로그 경로 등록, 렌더링과 파일 기록의
//! 단일 진입점입니다. 테스트 준비 시 비어 있는 상태로 만들어지고,
//! 생성 메서드로만 변경되며, [`SyslogNgConfig::write_content`]로 소비됩니다.
//!
//! # 사용 예시
//! ```
//! use ngtest_syslog_ng_config::{LogPathInput, SyslogNgConfig};
//!
//! let mut config = SyslogNgConfig::new("/tmp/ngtest");
//! config.set_version("3.38");
//! let src = config.create_file_source("input.log", Default::default());
//! let dst = config.create_file_destination("output.log", Default::default());
//! config
//!     .create_logpath([LogPathInput::from(src), dst.into()], &["flow-control"])
//!     .unwrap();
//! assert!(config.render().contains("log {"));
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::info;

use crate::error::SyslogNgConfigError;
use crate::file_io::FileIo;
use crate::group::{StatementGroup, validate_group_id};
use crate::logpath::{LogPath, LogPathInput, LogPathItem};
use crate::option::OptionValue;
use crate::renderer::ConfigRenderer;
use crate::statement::{
    FileDestination, FileDestinationOptions, FileSource, FileSourceOptions, Filter,
    FilterOptions, Statement, StatementKind,
};

/// 메모리 내 syslog-ng 설정 집계
///
/// 그룹과 최상위 로그 경로는 이 집계가 소유합니다. 그룹은 `Arc`로 공유되어
/// 여러 로그 경로가 같은 그룹 인스턴스를 참조할 수 있습니다.
#[derive(Debug, Clone)]
pub struct SyslogNgConfig {
    working_dir: PathBuf,
    version: Option<String>,
    global_options: IndexMap<String, OptionValue>,
    statement_groups: Vec<Arc<StatementGroup>>,
    logpath_groups: Vec<LogPath>,
    group_ids: HashSet<String>,
    group_seq: usize,
}

impl SyslogNgConfig {
    /// 비어 있는 설정을 만듭니다.
    ///
    /// `working_dir`는 상대 파일 경로를 해석하는 기준 디렉토리입니다.
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            version: None,
            global_options: IndexMap::new(),
            statement_groups: Vec::new(),
            logpath_groups: Vec::new(),
            group_ids: HashSet::new(),
            group_seq: 0,
        }
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// `@version:` 값을 설정하거나 덮어씁니다.
    pub fn set_version(&mut self, version: impl Into<String>) {
        self.version = Some(version.into());
    }

    pub fn global_options(&self) -> &IndexMap<String, OptionValue> {
        &self.global_options
    }

    /// 생성 순서대로의 구문 그룹
    pub fn statement_groups(&self) -> &[Arc<StatementGroup>] {
        &self.statement_groups
    }

    /// 등록 순서대로의 최상위 로그 경로
    pub fn logpath_groups(&self) -> &[LogPath] {
        &self.logpath_groups
    }

    /// 전역 옵션을 병합합니다.
    ///
    /// 같은 이름은 나중 값이 이기며, 덮어쓴 옵션은 처음 위치를 유지합니다.
    pub fn create_global_options<K, V>(&mut self, options: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<OptionValue>,
    {
        for (name, value) in options {
            self.global_options.insert(name.into(), value.into());
        }
    }

    pub fn create_file_source(
        &self,
        file_name: impl Into<PathBuf>,
        options: FileSourceOptions,
    ) -> Statement {
        FileSource::new(file_name).with_options(options).into()
    }

    pub fn create_file_destination(
        &self,
        file_name: impl Into<PathBuf>,
        options: FileDestinationOptions,
    ) -> Statement {
        FileDestination::new(file_name).with_options(options).into()
    }

    pub fn create_filter(&self, options: FilterOptions) -> Statement {
        Filter::new(options).into()
    }

    /// 구문들을 자동 생성 식별자(`<kind>_<n>`)의 새 그룹으로 묶어 등록합니다.
    ///
    /// # Errors
    /// 구문이 없거나 종류가 섞여 있으면 에러를 반환합니다.
    pub fn create_statement_group(
        &mut self,
        statements: impl IntoIterator<Item = Statement>,
    ) -> Result<Arc<StatementGroup>, SyslogNgConfigError> {
        let statements: Vec<Statement> = statements.into_iter().collect();
        let Some(kind) = statements.first().map(Statement::kind) else {
            return Err(SyslogNgConfigError::EmptyGroup {
                id: "(unnamed)".to_owned(),
            });
        };
        let group_seq = self.group_seq;
        let id = self.next_group_id(kind);
        match StatementGroup::new(id, statements) {
            Ok(group) => self.register_group(group),
            Err(e) => {
                self.group_seq = group_seq;
                Err(e)
            }
        }
    }

    /// 호출자가 정한 식별자로 새 그룹을 만들어 등록합니다.
    ///
    /// # Errors
    /// 식별자가 이미 사용 중이거나 유효하지 않으면 에러를 반환합니다.
    pub fn create_named_statement_group(
        &mut self,
        id: impl Into<String>,
        statements: impl IntoIterator<Item = Statement>,
    ) -> Result<Arc<StatementGroup>, SyslogNgConfigError> {
        let id = id.into();
        validate_group_id(&id)?;
        if self.group_ids.contains(&id) {
            return Err(SyslogNgConfigError::DuplicateGroupId { id });
        }
        self.register_group(StatementGroup::new(id, statements)?)
    }

    /// 로그 경로 입력을 로그 경로 항목으로 변환합니다.
    ///
    /// 원시 구문은 새 그룹으로 감싸 등록하고, 그룹과 로그 경로는 그대로 반환합니다.
    pub fn create_statement_group_if_needed(
        &mut self,
        input: LogPathInput,
    ) -> Result<LogPathItem, SyslogNgConfigError> {
        match input {
            LogPathInput::Statement(statement) => {
                Ok(LogPathItem::Group(self.create_statement_group([statement])?))
            }
            LogPathInput::Statements(statements) => {
                Ok(LogPathItem::Group(self.create_statement_group(statements)?))
            }
            LogPathInput::Group(group) => Ok(LogPathItem::Group(group)),
            LogPathInput::LogPath(logpath) => Ok(LogPathItem::LogPath(logpath)),
        }
    }

    /// 새 로그 경로를 만들어 최상위 로그 경로로 등록합니다.
    pub fn create_logpath(
        &mut self,
        items: impl IntoIterator<Item = LogPathInput>,
        flags: &[&str],
    ) -> Result<&LogPath, SyslogNgConfigError> {
        let logpath = self.build_logpath(items, flags)?;
        let index = self.logpath_groups.len();
        self.logpath_groups.push(logpath);
        Ok(&self.logpath_groups[index])
    }

    /// 다른 로그 경로 안에 넣을 로그 경로를 만듭니다 (최상위에 등록하지 않음).
    pub fn create_inner_logpath(
        &mut self,
        items: impl IntoIterator<Item = LogPathInput>,
        flags: &[&str],
    ) -> Result<LogPath, SyslogNgConfigError> {
        self.build_logpath(items, flags)
    }

    /// 현재 상태를 설정 텍스트로 렌더링합니다.
    pub fn render(&self) -> String {
        ConfigRenderer::new(self, &self.working_dir).render()
    }

    /// 렌더링한 설정을 `config_path`에 기록합니다.
    pub fn write_content(&self, config_path: impl AsRef<Path>) -> Result<(), SyslogNgConfigError> {
        let config_path = config_path.as_ref();
        let rendered = self.render();
        info!(
            path = %config_path.display(),
            "used config\n->Content:[{rendered}]"
        );
        FileIo::new(config_path).rewrite(&rendered)
    }

    /// 항목 하나라도 실패하면 이 호출에서 등록한 그룹을 모두 되돌립니다.
    fn build_logpath(
        &mut self,
        items: impl IntoIterator<Item = LogPathInput>,
        flags: &[&str],
    ) -> Result<LogPath, SyslogNgConfigError> {
        let groups_len = self.statement_groups.len();
        let group_seq = self.group_seq;

        let mut logpath = LogPath::new();
        for input in items {
            match self.create_statement_group_if_needed(input) {
                Ok(item) => logpath.add_group(item),
                Err(e) => {
                    self.rollback_groups(groups_len, group_seq);
                    return Err(e);
                }
            }
        }
        logpath.add_flags(flags.iter().copied());
        Ok(logpath)
    }

    fn rollback_groups(&mut self, groups_len: usize, group_seq: usize) {
        for group in self.statement_groups.drain(groups_len..) {
            self.group_ids.remove(group.id());
        }
        self.group_seq = group_seq;
    }

    fn register_group(
        &mut self,
        group: StatementGroup,
    ) -> Result<Arc<StatementGroup>, SyslogNgConfigError> {
        if !self.group_ids.insert(group.id().to_owned()) {
            return Err(SyslogNgConfigError::DuplicateGroupId {
                id: group.id().to_owned(),
            });
        }
        let group = Arc::new(group);
        self.statement_groups.push(Arc::clone(&group));
        Ok(group)
    }

    /// 이미 쓰인 식별자를 건너뛰는 다음 자동 식별자
    fn next_group_id(&mut self, kind: StatementKind) -> String {
        loop {
            self.group_seq += 1;
            let id = format!("{kind}_{}", self.group_seq);
            if !self.group_ids.contains(&id) {
                return id;
            }
        }
    }
}
