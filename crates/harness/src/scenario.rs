//! 시나리오 -- YAML로 기술한 기능 테스트 케이스 하나
//!
//! # YAML 스키마
//! ```yaml
//! name: file_to_file
//! description: copy messages from a file source to a file destination
//! slow: false
//! version: "3.38"            # 생략하면 설치된 데몬 버전
//! options:
//!   keep_hostname: true
//! sources:
//!   s_in:
//!     - driver: file
//!       file_name: input.log
//!       options: { follow_freq: 1 }
//! filters:
//!   f_app:
//!     - program: app
//! destinations:
//!   d_out:
//!     - driver: file
//!       file_name: output.log
//! logpaths:
//!   - items: [s_in, f_app, d_out]
//!     flags: [flow-control]
//!   - items:
//!       - s_in
//!       - logpath: { items: [d_out], flags: [final] }
//! expect_valid: true
//! ```
//!
//! 선언된 그룹은 sources, filters, destinations 순서로 등록됩니다.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use ngtest_syslog_ng_config::{
    FileDestination, FileSource, FilterOptions, LogPath, LogPathInput, OptionValue, Statement,
    StatementGroup, SyslogNgConfig,
};

use crate::error::HarnessError;

const MAX_NESTING_DEPTH: usize = 16;

/// source 드라이버
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "driver", rename_all = "snake_case")]
pub enum SourceDriver {
    File(FileSource),
}

impl From<SourceDriver> for Statement {
    fn from(driver: SourceDriver) -> Self {
        match driver {
            SourceDriver::File(source) => source.into(),
        }
    }
}

/// destination 드라이버
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "driver", rename_all = "snake_case")]
pub enum DestinationDriver {
    File(FileDestination),
}

impl From<DestinationDriver> for Statement {
    fn from(driver: DestinationDriver) -> Self {
        match driver {
            DestinationDriver::File(destination) => destination.into(),
        }
    }
}

/// 로그 경로 선언
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogPathSpec {
    #[serde(default)]
    pub items: Vec<LogPathItemSpec>,
    #[serde(default)]
    pub flags: Vec<String>,
}

/// 로그 경로 항목 선언: 그룹 이름 또는 중첩 로그 경로
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LogPathItemSpec {
    Group(String),
    LogPath { logpath: LogPathSpec },
}

/// 기능 테스트 시나리오
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// 테스트 케이스 이름 (리포트 디렉토리 이름으로도 쓰임)
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// `--runslow` 없이는 건너뜀
    #[serde(default)]
    pub slow: bool,
    /// `@version:` 값 (없으면 설치된 데몬 버전)
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub options: IndexMap<String, OptionValue>,
    #[serde(default)]
    pub sources: IndexMap<String, Vec<SourceDriver>>,
    #[serde(default)]
    pub filters: IndexMap<String, Vec<FilterOptions>>,
    #[serde(default)]
    pub destinations: IndexMap<String, Vec<DestinationDriver>>,
    #[serde(default)]
    pub logpaths: Vec<LogPathSpec>,
    /// 데몬이 설정을 받아들일 것으로 기대하는지 여부
    #[serde(default = "default_expect_valid")]
    pub expect_valid: bool,
}

fn default_expect_valid() -> bool {
    true
}

impl Scenario {
    /// 이름과 참조를 검증합니다.
    ///
    /// 이름은 디렉토리 이름으로 쓰이므로 경로 구분자를 허용하지 않습니다.
    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.name.trim().is_empty() {
            return Err(self.invalid("name must not be empty"));
        }
        if self.name.contains(['/', '\\']) || self.name == "." || self.name == ".." {
            return Err(self.invalid("name must be a plain directory name"));
        }
        if self.logpaths.is_empty() {
            return Err(self.invalid("at least one logpath is required"));
        }

        let mut declared = HashSet::new();
        for name in self
            .sources
            .keys()
            .chain(self.filters.keys())
            .chain(self.destinations.keys())
        {
            if !declared.insert(name.as_str()) {
                return Err(self.invalid(&format!("group '{name}' declared more than once")));
            }
        }

        for logpath in &self.logpaths {
            self.validate_logpath(logpath, &declared, 0)?;
        }
        Ok(())
    }

    fn validate_logpath(
        &self,
        logpath: &LogPathSpec,
        declared: &HashSet<&str>,
        depth: usize,
    ) -> Result<(), HarnessError> {
        if depth > MAX_NESTING_DEPTH {
            return Err(self.invalid(&format!(
                "logpath nesting exceeds {MAX_NESTING_DEPTH} levels"
            )));
        }
        for item in &logpath.items {
            match item {
                LogPathItemSpec::Group(name) if !declared.contains(name.as_str()) => {
                    return Err(self.invalid(&format!("unknown group '{name}'")));
                }
                LogPathItemSpec::Group(_) => {}
                LogPathItemSpec::LogPath { logpath } => {
                    self.validate_logpath(logpath, declared, depth + 1)?;
                }
            }
        }
        Ok(())
    }

    /// 시나리오를 설정 집계에 반영합니다.
    ///
    /// 시나리오에 버전이 있으면 집계에 이미 설정된 버전을 덮어씁니다.
    pub fn build(&self, config: &mut SyslogNgConfig) -> Result<(), HarnessError> {
        self.validate()?;

        if let Some(ref version) = self.version {
            config.set_version(version.clone());
        }
        config.create_global_options(self.options.clone());

        let mut groups: HashMap<&str, Arc<StatementGroup>> = HashMap::new();
        for (name, drivers) in &self.sources {
            let statements = drivers.iter().cloned().map(Statement::from);
            groups.insert(name, config.create_named_statement_group(name, statements)?);
        }
        for (name, filters) in &self.filters {
            let statements = filters.iter().cloned().map(|f| config.create_filter(f));
            let statements: Vec<Statement> = statements.collect();
            groups.insert(name, config.create_named_statement_group(name, statements)?);
        }
        for (name, drivers) in &self.destinations {
            let statements = drivers.iter().cloned().map(Statement::from);
            groups.insert(name, config.create_named_statement_group(name, statements)?);
        }

        for spec in &self.logpaths {
            let items = self.resolve_items(spec, &groups, config)?;
            let flags: Vec<&str> = spec.flags.iter().map(String::as_str).collect();
            config.create_logpath(items, &flags)?;
        }
        Ok(())
    }

    fn resolve_items(
        &self,
        spec: &LogPathSpec,
        groups: &HashMap<&str, Arc<StatementGroup>>,
        config: &mut SyslogNgConfig,
    ) -> Result<Vec<LogPathInput>, HarnessError> {
        spec.items
            .iter()
            .map(|item| match item {
                LogPathItemSpec::Group(name) => groups
                    .get(name.as_str())
                    .map(|group| LogPathInput::Group(Arc::clone(group)))
                    .ok_or_else(|| self.invalid(&format!("unknown group '{name}'"))),
                LogPathItemSpec::LogPath { logpath } => {
                    let inner = self.build_inner(logpath, groups, config)?;
                    Ok(LogPathInput::LogPath(inner))
                }
            })
            .collect()
    }

    fn build_inner(
        &self,
        spec: &LogPathSpec,
        groups: &HashMap<&str, Arc<StatementGroup>>,
        config: &mut SyslogNgConfig,
    ) -> Result<LogPath, HarnessError> {
        let items = self.resolve_items(spec, groups, config)?;
        let flags: Vec<&str> = spec.flags.iter().map(String::as_str).collect();
        Ok(config.create_inner_logpath(items, &flags)?)
    }

    fn invalid(&self, reason: &str) -> HarnessError {
        HarnessError::InvalidScenario {
            name: self.name.clone(),
            reason: reason.to_owned(),
        }
    }
}
