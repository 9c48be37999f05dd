pub mod error;

pub use error::*;

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// シークレットファイルの環境変数
pub const SECRETS_PATH_ENV: &str = "IMAGEFLOW_SECRETS_PATH";

/// シークレットファイル名の候補（優先順）
pub const SECRETS_FILENAMES: [&str; 2] = ["secrets.local.kdl", "secrets.kdl"];

/// imageflowのグローバル設定ディレクトリ (~/.config/imageflow)
///
/// ディレクトリの作成は行わない。
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("imageflow"))
        .ok_or(ConfigError::ConfigDirNotFound)
}

/// secrets.kdl を探す
///
/// 以下の優先順位で検索:
/// 1. 環境変数 IMAGEFLOW_SECRETS_PATH (直接パス指定)
/// 2. カレントディレクトリ: secrets.local.kdl, secrets.kdl
/// 3. ./.imageflow/ ディレクトリ内: 同様の順序
/// 4. ~/.config/imageflow/secrets.kdl (グローバル設定)
pub fn find_secrets_file() -> Result<PathBuf> {
    // 1. 環境変数で直接指定
    if let Ok(secrets_path) = std::env::var(SECRETS_PATH_ENV) {
        let path = PathBuf::from(&secrets_path);
        if path.is_file() {
            debug!(path = %path.display(), "Using secrets file from environment variable");
            return Ok(path);
        }
        warn!(env_path = %secrets_path, "IMAGEFLOW_SECRETS_PATH is set but file does not exist");
    }

    // 2, 3. カレントディレクトリと ./.imageflow/
    let current_dir = std::env::current_dir()?;
    if let Some(path) = find_secrets_file_in(&current_dir) {
        return Ok(path);
    }

    // 4. グローバル設定ファイル (~/.config/imageflow/secrets.kdl)
    match get_config_dir() {
        Ok(config_dir) => {
            let global = config_dir.join("secrets.kdl");
            if global.is_file() {
                debug!(path = %global.display(), "Using global secrets file");
                return Ok(global);
            }
        }
        Err(e) => debug!(error = %e, "Skipping global secrets file"),
    }

    Err(ConfigError::SecretsFileNotFound)
}

/// 指定ディレクトリとその .imageflow/ からシークレットファイルを探す
pub fn find_secrets_file_in(dir: &Path) -> Option<PathBuf> {
    let search_dirs = [dir.to_path_buf(), dir.join(".imageflow")];
    search_dirs.iter()
        .flat_map(|d| SECRETS_FILENAMES.iter().map(move |name| d.join(name)))
        .find(|path| path.is_file())
        .inspect(|path| debug!(path = %path.display(), "Found secrets file"))
}
