//! 설정 파일 기록

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::SyslogNgConfigError;

/// 단일 파일에 대한 읽기/덮어쓰기
pub struct FileIo {
    path: PathBuf,
}

impl FileIo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 파일 내용을 `content`로 덮어씁니다.
    ///
    /// 부모 디렉토리는 만들지 않습니다.
    pub fn rewrite(&self, content: &str) -> Result<(), SyslogNgConfigError> {
        std::fs::write(&self.path, content).map_err(|source| self.io_error(source))?;
        debug!(path = %self.path.display(), bytes = content.len(), "file rewritten");
        Ok(())
    }

    /// 파일 전체를 문자열로 읽습니다.
    pub fn read(&self) -> Result<String, SyslogNgConfigError> {
        std::fs::read_to_string(&self.path).map_err(|source| self.io_error(source))
    }

    fn io_error(&self, source: std::io::Error) -> SyslogNgConfigError {
        SyslogNgConfigError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrite_replaces_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let file_io = FileIo::new(dir.path().join("test.conf"));

        file_io.rewrite("first content that is longer").unwrap();
        file_io.rewrite("second").unwrap();

        assert_eq!(file_io.read().unwrap(), "second");
    }

    #[test]
    fn rewrite_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let file_io = FileIo::new(dir.path().join("missing").join("test.conf"));

        let err = file_io.rewrite("content").unwrap_err();
        match err {
            SyslogNgConfigError::Io { source, .. } => {
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn read_missing_file_fails() {
        let file_io = FileIo::new("/nonexistent/ngtest/file.conf");
        assert!(file_io.read().is_err());
    }
}
