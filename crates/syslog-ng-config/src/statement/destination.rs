//! 파일 destination 구문

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{StatementOptions, flags_value, render_file_driver};
use crate::option::OptionValue;

/// `file()` destination 드라이버
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileDestination {
    /// 기록할 파일 (상대 경로면 테스트 작업 디렉토리 기준)
    pub file_name: PathBuf,
    /// 드라이버 옵션
    #[serde(default)]
    pub options: FileDestinationOptions,
}

impl FileDestination {
    pub fn new(file_name: impl Into<PathBuf>) -> Self {
        Self {
            file_name: file_name.into(),
            options: FileDestinationOptions::default(),
        }
    }

    /// 옵션 레코드를 지정합니다.
    pub fn with_options(mut self, options: FileDestinationOptions) -> Self {
        self.options = options;
        self
    }

    pub(crate) fn render(&self, working_dir: &Path) -> String {
        render_file_driver(&self.file_name, working_dir, &self.options.option_pairs())
    }
}

/// `file()` destination이 인식하는 옵션
///
/// `perm` / `dir_perm`은 숫자로 받아 8진수 리터럴(`0644`)로 출력합니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileDestinationOptions {
    /// 출력 템플릿
    pub template: Option<String>,
    /// 템플릿 이스케이프 여부
    pub template_escape: Option<bool>,
    /// 디렉토리 자동 생성 여부
    pub create_dirs: Option<bool>,
    /// 생성 디렉토리 권한
    pub dir_perm: Option<u32>,
    /// 파일 권한
    pub perm: Option<u32>,
    /// 파일 소유자
    pub owner: Option<String>,
    /// 파일 그룹
    pub group: Option<String>,
    /// 한 번에 flush할 줄 수
    pub flush_lines: Option<u32>,
    /// 매 쓰기마다 fsync 여부
    pub fsync: Option<bool>,
    /// 유휴 파일을 닫기까지의 시간 (초)
    pub time_reap: Option<u32>,
    /// 목적지 플래그
    pub flags: Vec<String>,
}

impl StatementOptions for FileDestinationOptions {
    fn option_pairs(&self) -> Vec<(&'static str, OptionValue)> {
        let mut pairs = Vec::new();
        if let Some(ref v) = self.template {
            pairs.push(("template", OptionValue::from(v.as_str())));
        }
        if let Some(v) = self.template_escape {
            pairs.push(("template_escape", OptionValue::from(v)));
        }
        if let Some(v) = self.create_dirs {
            pairs.push(("create_dirs", OptionValue::from(v)));
        }
        if let Some(v) = self.dir_perm {
            pairs.push(("dir_perm", OptionValue::bare(format!("0{v:o}"))));
        }
        if let Some(v) = self.perm {
            pairs.push(("perm", OptionValue::bare(format!("0{v:o}"))));
        }
        if let Some(ref v) = self.owner {
            pairs.push(("owner", OptionValue::from(v.as_str())));
        }
        if let Some(ref v) = self.group {
            pairs.push(("group", OptionValue::from(v.as_str())));
        }
        if let Some(v) = self.flush_lines {
            pairs.push(("flush_lines", OptionValue::from(v)));
        }
        if let Some(v) = self.fsync {
            pairs.push(("fsync", OptionValue::from(v)));
        }
        if let Some(v) = self.time_reap {
            pairs.push(("time_reap", OptionValue::from(v)));
        }
        if let Some(v) = flags_value(&self.flags) {
            pairs.push(("flags", v));
        }
        pairs
    }
}
