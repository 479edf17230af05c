//! 설정 렌더러 -- 집계 상태를 syslog-ng 설정 텍스트로 직렬화합니다.
//!
//! # 출력 형식
//! ```text
//! @version: 3.38
//!
//! options {
//!     keep_hostname(yes);
//! };
//!
//! source source_1 {
//!     file("/work/input.log");
//! };
//!
//! log {
//!     source(source_1);
//!     flags(final);
//! };
//! ```
//!
//! 섹션 사이에는 빈 줄이 하나 들어가고, 비어 있는 섹션은 출력하지 않습니다.

use std::path::Path;

use crate::logpath::{LogPath, LogPathItem};
use crate::syslog_ng_config::SyslogNgConfig;

const INDENT: &str = "    ";

/// 설정 렌더러
///
/// 집계와 작업 디렉토리에 대한 순수 함수입니다. 상대 파일 경로는
/// 작업 디렉토리 기준으로 해석됩니다.
pub struct ConfigRenderer<'a> {
    config: &'a SyslogNgConfig,
    working_dir: &'a Path,
}

impl<'a> ConfigRenderer<'a> {
    pub fn new(config: &'a SyslogNgConfig, working_dir: &'a Path) -> Self {
        Self {
            config,
            working_dir,
        }
    }

    /// 전체 설정 텍스트를 생성합니다.
    pub fn render(&self) -> String {
        let mut sections = Vec::new();

        if let Some(version) = self.config.version() {
            sections.push(format!("@version: {version}\n"));
        }

        if !self.config.global_options().is_empty() {
            sections.push(self.render_global_options());
        }

        for group in self.config.statement_groups() {
            let mut section = format!("{} {} {{\n", group.group_type(), group.id());
            for statement in group.statements() {
                section.push_str(&format!(
                    "{INDENT}{};\n",
                    statement.render(self.working_dir)
                ));
            }
            section.push_str("};\n");
            sections.push(section);
        }

        for logpath in self.config.logpath_groups() {
            let mut section = String::new();
            render_logpath(&mut section, logpath, 0);
            sections.push(section);
        }

        sections.join("\n")
    }

    fn render_global_options(&self) -> String {
        let mut section = String::from("options {\n");
        for (name, value) in self.config.global_options() {
            section.push_str(&format!("{INDENT}{name}({value});\n"));
        }
        section.push_str("};\n");
        section
    }
}

/// 로그 경로 블록: 항목을 삽입 순서대로, 그 뒤에 플래그
fn render_logpath(out: &mut String, logpath: &LogPath, depth: usize) {
    let indent = INDENT.repeat(depth);
    let inner = INDENT.repeat(depth + 1);

    out.push_str(&format!("{indent}{} {{\n", logpath.group_type()));
    for item in logpath.logpath() {
        match item {
            LogPathItem::Group(group) => {
                out.push_str(&format!("{inner}{}({});\n", group.group_type(), group.id()));
            }
            LogPathItem::LogPath(nested) => render_logpath(out, nested, depth + 1),
        }
    }
    if !logpath.flags().is_empty() {
        out.push_str(&format!("{inner}flags({});\n", logpath.flags().join(", ")));
    }
    out.push_str(&format!("{indent}}};\n"));
}
