//! 시나리오 파일 로더 -- YAML 시나리오 파일을 디스크에서 로드합니다.
//!
//! 시나리오 디렉토리 내의 `.yml`/`.yaml` 파일을 파일 이름 순서로 스캔하고 파싱합니다.
//! 개별 파일 파싱 실패는 경고 로그를 남기고 건너뜁니다.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::HarnessError;
use crate::scenario::Scenario;

/// 시나리오 파일 로더 설정
const MAX_SCENARIO_FILE_SIZE: u64 = 1024 * 1024; // 1MB
const MAX_SCENARIOS_COUNT: usize = 10_000;

/// 시나리오 파일 로더
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// 디렉토리에서 모든 YAML 시나리오 파일을 로드합니다.
    ///
    /// `.yml` 또는 `.yaml` 확장자를 가진 파일만 처리합니다.
    /// 개별 파일 로딩 실패와 이름이 중복된 시나리오는 경고 로그를 남기고 건너뜁니다.
    ///
    /// # Errors
    /// - 디렉토리를 읽을 수 없는 경우
    /// - 시나리오 수가 `MAX_SCENARIOS_COUNT`를 초과하는 경우
    pub fn load_directory(dir: impl AsRef<Path>) -> Result<Vec<Scenario>, HarnessError> {
        let dir = dir.as_ref();

        let entries = std::fs::read_dir(dir).map_err(|e| HarnessError::ScenarioLoad {
            path: dir.display().to_string(),
            reason: format!("failed to read directory: {e}"),
        })?;

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| HarnessError::ScenarioLoad {
                path: dir.display().to_string(),
                reason: format!("failed to read directory entry: {e}"),
            })?;
            let path = entry.path();

            // .yml / .yaml 확장자만 처리
            let is_yaml = path
                .extension()
                .is_some_and(|ext| ext == "yml" || ext == "yaml");
            if is_yaml && path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();

        let mut scenarios = Vec::new();
        let mut seen_names = HashSet::new();

        for path in paths {
            match Self::load_file(&path) {
                Ok(scenario) => {
                    // 중복 이름 검사
                    if !seen_names.insert(scenario.name.clone()) {
                        tracing::warn!(
                            scenario = %scenario.name,
                            path = %path.display(),
                            "duplicate scenario name, skipping"
                        );
                        continue;
                    }
                    scenarios.push(scenario);
                }
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "failed to load scenario file, skipping"
                    );
                }
            }

            if scenarios.len() > MAX_SCENARIOS_COUNT {
                return Err(HarnessError::ScenarioLoad {
                    path: dir.display().to_string(),
                    reason: format!("too many scenarios: max {MAX_SCENARIOS_COUNT}"),
                });
            }
        }

        tracing::info!(
            dir = %dir.display(),
            count = scenarios.len(),
            "loaded scenarios"
        );

        Ok(scenarios)
    }

    /// 단일 YAML 파일에서 시나리오를 로드합니다.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Scenario, HarnessError> {
        let path = path.as_ref();

        // 파일 크기 검증
        let metadata = std::fs::metadata(path).map_err(|e| HarnessError::ScenarioLoad {
            path: path.display().to_string(),
            reason: format!("failed to read file metadata: {e}"),
        })?;

        if metadata.len() > MAX_SCENARIO_FILE_SIZE {
            return Err(HarnessError::ScenarioLoad {
                path: path.display().to_string(),
                reason: format!(
                    "file too large: {} bytes (max: {MAX_SCENARIO_FILE_SIZE})",
                    metadata.len()
                ),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| HarnessError::ScenarioLoad {
            path: path.display().to_string(),
            reason: format!("failed to read file: {e}"),
        })?;

        Self::parse_yaml(&content, &path.display().to_string())
    }

    /// YAML 문자열을 파싱하여 시나리오를 생성합니다.
    pub fn parse_yaml(yaml_str: &str, source: &str) -> Result<Scenario, HarnessError> {
        let scenario: Scenario =
            serde_yaml::from_str(yaml_str).map_err(|e| HarnessError::ScenarioLoad {
                path: source.to_owned(),
                reason: format!("YAML parse error: {e}"),
            })?;

        // 유효성 검증
        scenario.validate()?;

        Ok(scenario)
    }
}
