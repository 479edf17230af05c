//! 옵션 값 표현
//!
//! 전역 옵션과 드라이버 옵션의 값을 syslog-ng 문법으로 출력합니다.

use std::fmt;

use serde::{Deserialize, Serialize};

/// syslog-ng 옵션 값
///
/// - `Bool`은 `yes` / `no`로 출력됩니다.
/// - `Str`은 항상 큰따옴표로 감싸고 이스케이프합니다.
/// - `Bare`는 따옴표 없이 그대로 출력됩니다 (`level(info..err)`, `flags(final)` 등).
///
/// 역직렬화 시 문자열은 모두 `Str`이 됩니다. `Bare`는 코드에서만 만들 수 있습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bare(String),
}

impl OptionValue {
    /// 따옴표 없이 출력할 값을 만듭니다.
    pub fn bare(value: impl Into<String>) -> Self {
        Self::Bare(value.into())
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(true) => f.write_str("yes"),
            Self::Bool(false) => f.write_str("no"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(v) => f.write_str(&quote(v)),
            Self::Bare(v) => f.write_str(v),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for OptionValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for OptionValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u32> for OptionValue {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for OptionValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for OptionValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_owned())
    }
}

impl From<String> for OptionValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

/// 문자열을 syslog-ng 문자열 리터럴로 만듭니다.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

/// `key(value)` 쌍을 공백으로 이어 붙입니다.
pub(crate) fn render_pairs(pairs: &[(&str, OptionValue)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{key}({value})"))
        .collect::<Vec<_>>()
        .join(" ")
}
