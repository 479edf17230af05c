//! 파일 source 구문

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{StatementOptions, flags_value, render_file_driver};
use crate::option::OptionValue;

/// `file()` source 드라이버
///
/// # YAML 스키마
/// ```yaml
/// file_name: input.log
/// options:
///   follow_freq: 1
///   flags: [no-parse]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSource {
    /// 읽을 파일 (상대 경로면 테스트 작업 디렉토리 기준)
    pub file_name: PathBuf,
    /// 드라이버 옵션
    #[serde(default)]
    pub options: FileSourceOptions,
}

impl FileSource {
    pub fn new(file_name: impl Into<PathBuf>) -> Self {
        Self {
            file_name: file_name.into(),
            options: FileSourceOptions::default(),
        }
    }

    /// 옵션 레코드를 지정합니다.
    pub fn with_options(mut self, options: FileSourceOptions) -> Self {
        self.options = options;
        self
    }

    pub(crate) fn render(&self, working_dir: &Path) -> String {
        render_file_driver(&self.file_name, working_dir, &self.options.option_pairs())
    }
}

/// `file()` source가 인식하는 옵션
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileSourceOptions {
    /// 파일 변경 확인 주기 (초)
    pub follow_freq: Option<f64>,
    /// 소스 플래그 (no-parse, kernel, no-multi-line 등)
    pub flags: Vec<String>,
    /// 입력 인코딩
    pub encoding: Option<String>,
    /// 한 번에 읽을 최대 메시지 수
    pub log_fetch_limit: Option<u32>,
    /// 초기 윈도우 크기 (flow-control)
    pub log_iw_size: Option<u32>,
    /// 최대 메시지 크기 (바이트)
    pub log_msg_size: Option<u32>,
    /// 메시지 타임스탬프 유지 여부
    pub keep_timestamp: Option<bool>,
    /// PROGRAM 필드 덮어쓰기
    pub program_override: Option<String>,
    /// HOST 필드 덮어쓰기
    pub host_override: Option<String>,
}

impl StatementOptions for FileSourceOptions {
    fn option_pairs(&self) -> Vec<(&'static str, OptionValue)> {
        let mut pairs = Vec::new();
        if let Some(v) = self.follow_freq {
            pairs.push(("follow_freq", OptionValue::Float(v)));
        }
        if let Some(v) = flags_value(&self.flags) {
            pairs.push(("flags", v));
        }
        if let Some(ref v) = self.encoding {
            pairs.push(("encoding", OptionValue::from(v.as_str())));
        }
        if let Some(v) = self.log_fetch_limit {
            pairs.push(("log_fetch_limit", OptionValue::from(v)));
        }
        if let Some(v) = self.log_iw_size {
            pairs.push(("log_iw_size", OptionValue::from(v)));
        }
        if let Some(v) = self.log_msg_size {
            pairs.push(("log_msg_size", OptionValue::from(v)));
        }
        if let Some(v) = self.keep_timestamp {
            pairs.push(("keep_timestamp", OptionValue::from(v)));
        }
        if let Some(ref v) = self.program_override {
            pairs.push(("program_override", OptionValue::from(v.as_str())));
        }
        if let Some(ref v) = self.host_override {
            pairs.push(("host_override", OptionValue::from(v.as_str())));
        }
        pairs
    }
}
