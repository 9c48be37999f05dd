//! Docker config.json の読み込み

use crate::error::{Result, SecretError};
use crate::matcher::registry_matches;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Docker config.json の構造
#[derive(Debug, Default, Deserialize)]
pub struct DockerConfig {
    /// 認証情報 (レジストリ -> AuthEntry)
    #[serde(default)]
    pub auths: HashMap<String, AuthEntry>,
}

/// 認証エントリ
#[derive(Debug, Default, Deserialize)]
pub struct AuthEntry {
    /// Base64エンコードされた "username:password"
    pub auth: Option<String>,
}

impl DockerConfig {
    /// config.json を読み込む
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SecretError::DockerConfig {
            path: path.to_path_buf(),
            message: format!("Failed to read config.json: {}", e),
        })?;

        Self::parse(&content).map_err(|message| SecretError::DockerConfig {
            path: path.to_path_buf(),
            message,
        })
    }

    pub fn parse(content: &str) -> std::result::Result<Self, String> {
        serde_json::from_str(content).map_err(|e| format!("Failed to parse config.json: {}", e))
    }

    /// レジストリに対応するトークンを取得
    ///
    /// キーは `https://index.docker.io/v1/` のような URL 形式でもよい。
    /// 完全一致を優先し、なければ正規化したホストで照合する。
    pub fn token_for(&self, registry: &str) -> Option<&str> {
        if let Some(entry) = self.auths.get(registry)
            && let Some(auth) = entry.auth.as_deref()
            && !auth.is_empty()
        {
            return Some(auth);
        }

        // HashMap の順序に依存しないようキーをソートして走査
        let mut keys: Vec<&String> = self.auths.keys().collect();
        keys.sort();
        keys.into_iter()
            .filter(|key| registry_matches(registry, key))
            .filter_map(|key| self.auths[key].auth.as_deref())
            .find(|auth| !auth.is_empty())
    }
}

/// デフォルトの config.json パス
///
/// `DOCKER_CONFIG` が設定されていればその配下、なければ `~/.docker/config.json`。
pub fn default_docker_config_path() -> PathBuf {
    std::env::var("DOCKER_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .map(|h| h.join(".docker"))
                .unwrap_or_else(|| PathBuf::from(".docker"))
        })
        .join("config.json")
}
