//! 리포트 경로 구성
//!
//! 한 번의 실행은 리포트 디렉토리 하나를 쓰고, 테스트 케이스마다
//! `<reports>/<name>/` 하위 디렉토리와 `testcase_<name>.log` 파일이 만들어집니다.

use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::HarnessError;

/// 기본 리포트 디렉토리의 상위 디렉토리
pub const REPORTS_ROOT: &str = "reports";

/// 리포트 디렉토리 이름에 쓰는 타임스탬프 형식 (마이크로초까지)
pub const REPORT_DATE_FORMAT: &str = "%Y-%m-%d-%H-%M-%S-%6f";

/// 현재 시각을 리포트 디렉토리 이름 형식으로 반환합니다.
pub fn current_date() -> String {
    Local::now().format(REPORT_DATE_FORMAT).to_string()
}

/// 기본 리포트 디렉토리: `reports/<current_date>`
pub fn relative_report_dir() -> PathBuf {
    Path::new(REPORTS_ROOT).join(current_date())
}

/// 테스트 케이스 디렉토리: `<reports>/<name>`
pub fn testcase_dir(reports_dir: &Path, testcase_name: &str) -> PathBuf {
    reports_dir.join(testcase_name)
}

/// 테스트 케이스 리포트 파일의 절대 경로: `<reports>/<name>/testcase_<name>.log`
///
/// # Errors
/// 상대 경로를 절대 경로로 바꿀 수 없는 경우 (현재 디렉토리 조회 실패)
pub fn report_file_path(reports_dir: &Path, testcase_name: &str) -> Result<PathBuf, HarnessError> {
    let relative =
        testcase_dir(reports_dir, testcase_name).join(format!("testcase_{testcase_name}.log"));
    std::path::absolute(&relative).map_err(|source| HarnessError::Report {
        path: relative.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_date_has_expected_shape() {
        let date = current_date();
        let parts: Vec<&str> = date.split('-').collect();
        assert_eq!(parts.len(), 7, "{date}");
        assert_eq!(parts[0].len(), 4);
        assert_eq!(parts[6].len(), 6);
        assert!(parts.iter().all(|p| p.chars().all(|c| c.is_ascii_digit())));
    }

    #[test]
    fn relative_report_dir_is_under_reports() {
        let dir = relative_report_dir();
        assert!(dir.is_relative());
        assert_eq!(dir.components().count(), 2);
        assert!(dir.starts_with(REPORTS_ROOT));
    }

    #[test]
    fn report_file_path_is_absolute() {
        let path = report_file_path(Path::new("reports/run"), "file_to_file").unwrap();
        assert!(path.is_absolute());
        assert!(path.ends_with("reports/run/file_to_file/testcase_file_to_file.log"));
    }

    #[test]
    fn report_file_path_keeps_absolute_reports_dir() {
        let path = report_file_path(Path::new("/tmp/reports"), "tc").unwrap();
        assert_eq!(path, PathBuf::from("/tmp/reports/tc/testcase_tc.log"));
    }
}
