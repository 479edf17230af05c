//! 구문 그룹 -- 같은 종류의 구문들을 하나의 식별자로 묶습니다.

use crate::error::SyslogNgConfigError;
use crate::statement::{Statement, StatementKind};

const MAX_GROUP_ID_LEN: usize = 256;

/// 구문 그룹
///
/// `source <id> { ... };` 같은 하나의 블록에 대응합니다.
/// 그룹은 비어 있을 수 없고, 모든 구문은 같은 종류여야 합니다.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementGroup {
    id: String,
    kind: StatementKind,
    statements: Vec<Statement>,
}

impl StatementGroup {
    /// 새 그룹을 만듭니다.
    ///
    /// # Errors
    /// - 식별자가 syslog-ng 식별자로 쓸 수 없는 경우
    /// - 구문이 하나도 없는 경우
    /// - 서로 다른 종류의 구문이 섞인 경우
    /// - 조건이 없는 filter가 있는 경우
    pub fn new(
        id: impl Into<String>,
        statements: impl IntoIterator<Item = Statement>,
    ) -> Result<Self, SyslogNgConfigError> {
        let id = id.into();
        validate_group_id(&id)?;

        let statements: Vec<Statement> = statements.into_iter().collect();
        let Some(first) = statements.first() else {
            return Err(SyslogNgConfigError::EmptyGroup { id });
        };
        let kind = first.kind();

        if let Some(other) = statements.iter().find(|s| s.kind() != kind) {
            return Err(SyslogNgConfigError::MixedGroup {
                id,
                expected: kind,
                found: other.kind(),
            });
        }

        if statements
            .iter()
            .any(|s| matches!(s, Statement::Filter(filter) if filter.is_empty()))
        {
            return Err(SyslogNgConfigError::EmptyFilter { id });
        }

        Ok(Self {
            id,
            kind,
            statements,
        })
    }

    /// 그룹 식별자
    pub fn id(&self) -> &str {
        &self.id
    }

    /// 그룹 종류 (블록 키워드)
    pub fn group_type(&self) -> StatementKind {
        self.kind
    }

    /// 삽입 순서대로의 구문 목록
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }
}

/// 그룹 식별자가 syslog-ng 식별자 규칙을 따르는지 검증합니다.
///
/// 첫 글자는 ASCII 문자 또는 `_`, 나머지는 ASCII 영숫자, `_`, `-`, `.`만 허용합니다.
pub(crate) fn validate_group_id(id: &str) -> Result<(), SyslogNgConfigError> {
    let invalid = |reason: &str| SyslogNgConfigError::InvalidGroupId {
        id: id.to_owned(),
        reason: reason.to_owned(),
    };

    let mut chars = id.chars();
    let Some(first) = chars.next() else {
        return Err(invalid("id must not be empty"));
    };

    if id.len() > MAX_GROUP_ID_LEN {
        return Err(invalid("id must not exceed 256 characters"));
    }

    if !(first.is_ascii_alphabetic() || first == '_') {
        return Err(invalid("id must start with a letter or '_'"));
    }

    if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')) {
        return Err(invalid("id may only contain letters, digits, '_', '-' or '.'"));
    }

    Ok(())
}
