//! filter 구문

use serde::{Deserialize, Serialize};

use super::StatementOptions;
use crate::option::OptionValue;

/// filter 구문
///
/// 설정된 조건 함수들을 `and`로 결합한 하나의 filter 식으로 렌더링합니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filter {
    pub options: FilterOptions,
}

impl Filter {
    pub fn new(options: FilterOptions) -> Self {
        Self { options }
    }

    /// 조건 함수가 하나도 없는지 여부 (빈 filter 식은 syslog-ng 문법 오류)
    pub fn is_empty(&self) -> bool {
        self.options.option_pairs().is_empty()
    }

    pub(crate) fn render(&self) -> String {
        self.options
            .option_pairs()
            .into_iter()
            .map(|(key, value)| match key {
                // expr는 원문 그대로 끼워 넣음
                "expr" => format!("({value})"),
                _ => format!("{key}({value})"),
            })
            .collect::<Vec<_>>()
            .join(" and ")
    }
}

/// filter 조건 함수
///
/// # YAML 스키마
/// ```yaml
/// program: app
/// level: info..err
/// expr: 'not message("debug")'
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterOptions {
    /// facility 목록 또는 범위 (`kern,mail`)
    pub facility: Option<String>,
    /// level 목록 또는 범위 (`info..err`)
    pub level: Option<String>,
    /// PROGRAM 정규식
    pub program: Option<String>,
    /// HOST 정규식
    pub host: Option<String>,
    /// MESSAGE 정규식
    pub message: Option<String>,
    /// 송신자 네트워크 (`10.0.0.0/8`)
    pub netmask: Option<String>,
    /// 태그
    pub tags: Option<String>,
    /// 위 함수로 표현할 수 없는 원문 filter 식
    pub expr: Option<String>,
}

impl StatementOptions for FilterOptions {
    fn option_pairs(&self) -> Vec<(&'static str, OptionValue)> {
        let mut pairs = Vec::new();
        if let Some(ref v) = self.facility {
            pairs.push(("facility", OptionValue::bare(v.as_str())));
        }
        if let Some(ref v) = self.level {
            pairs.push(("level", OptionValue::bare(v.as_str())));
        }
        if let Some(ref v) = self.program {
            pairs.push(("program", OptionValue::from(v.as_str())));
        }
        if let Some(ref v) = self.host {
            pairs.push(("host", OptionValue::from(v.as_str())));
        }
        if let Some(ref v) = self.message {
            pairs.push(("message", OptionValue::from(v.as_str())));
        }
        if let Some(ref v) = self.netmask {
            pairs.push(("netmask", OptionValue::from(v.as_str())));
        }
        if let Some(ref v) = self.tags {
            pairs.push(("tags", OptionValue::from(v.as_str())));
        }
        if let Some(ref v) = self.expr {
            pairs.push(("expr", OptionValue::bare(v.as_str())));
        }
        pairs
    }
}
