//! プロジェクトファイル発見ロジック
//!
//! imageflow.kdl を自動的に発見する（環境変数 → 上方向探索）。

use crate::error::{FlowError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// プロジェクトファイル名
pub const PROJECT_FILENAME: &str = "imageflow.kdl";

/// プロジェクトファイルの環境変数
pub const PROJECT_PATH_ENV: &str = "IMAGEFLOW_PROJECT_PATH";

/// imageflow.kdl を発見する
///
/// 検索順序:
/// 1. IMAGEFLOW_PROJECT_PATH 環境変数
/// 2. カレントディレクトリから上方向に imageflow.kdl / .imageflow/imageflow.kdl
#[tracing::instrument]
pub fn find_project_file() -> Result<PathBuf> {
    // 1. 環境変数
    if let Ok(path_str) = std::env::var(PROJECT_PATH_ENV) {
        let path = PathBuf::from(&path_str);
        debug!(env_path = %path_str, "Checking IMAGEFLOW_PROJECT_PATH");
        if path.is_file() {
            info!(project_path = %path.display(), "Found project file from environment variable");
            return Ok(path);
        }
        warn!(env_path = %path_str, "IMAGEFLOW_PROJECT_PATH is set but file does not exist");
    }

    // 2. カレントディレクトリから上に向かって探す
    let start_dir = std::env::current_dir()?;
    find_project_file_from(&start_dir)
}

/// 指定ディレクトリから上方向に imageflow.kdl を探す
pub fn find_project_file_from(start_dir: &Path) -> Result<PathBuf> {
    let mut current = start_dir.to_path_buf();
    debug!(start_dir = %start_dir.display(), "Searching for {}", PROJECT_FILENAME);

    loop {
        let candidates = [
            current.join(PROJECT_FILENAME),
            current.join(".imageflow").join(PROJECT_FILENAME),
        ];
        for candidate in candidates {
            if candidate.is_file() {
                info!(project_path = %candidate.display(), "Found project file");
                return Ok(candidate);
            }
        }

        if !current.pop() {
            break;
        }
    }

    warn!(start_dir = %start_dir.display(), "Project file not found");
    Err(FlowError::ProjectFileNotFound(start_dir.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_find_project_file_from_with_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        std::fs::write(root.join(PROJECT_FILENAME), "").unwrap();

        let result = find_project_file_from(root).unwrap();
        assert_eq!(result, root.join(PROJECT_FILENAME));
    }

    #[test]
    fn test_find_project_file_from_subdirectory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        std::fs::write(root.join(PROJECT_FILENAME), "").unwrap();

        let sub_dir = root.join("services").join("api");
        std::fs::create_dir_all(&sub_dir).unwrap();

        let result = find_project_file_from(&sub_dir).unwrap();
        assert_eq!(result, root.join(PROJECT_FILENAME));
    }

    #[test]
    fn test_find_project_file_in_hidden_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        let hidden = root.join(".imageflow");
        std::fs::create_dir(&hidden).unwrap();
        std::fs::write(hidden.join(PROJECT_FILENAME), "").unwrap();

        let result = find_project_file_from(root).unwrap();
        assert!(result.ends_with(".imageflow/imageflow.kdl"));
    }

    #[test]
    fn test_find_project_file_from_not_found() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = find_project_file_from(temp_dir.path());
        assert!(matches!(result, Err(FlowError::ProjectFileNotFound(_))));
    }

    #[test]
    #[serial]
    fn test_find_project_file_env_var() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("custom.kdl");
        std::fs::write(&path, "").unwrap();

        // SAFETY: serial テストで環境変数を操作
        unsafe {
            std::env::set_var(PROJECT_PATH_ENV, &path);
        }

        let result = find_project_file().unwrap();
        assert_eq!(result, path);

        unsafe {
            std::env::remove_var(PROJECT_PATH_ENV);
        }
    }
}
