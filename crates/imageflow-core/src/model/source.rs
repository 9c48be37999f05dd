//! ソース定義

use serde::{Deserialize, Serialize};
use std::fmt;

/// ビルド対象のソース
///
/// 比較は値の完全一致で行う。参照の正規化は呼び出し側の責務。
///
/// KDL形式：
/// ```kdl
/// source {
///     git url="https://github.com/org/app" revision="main"
/// }
/// source {
///     blob url="https://storage.example.com/app.tar.gz"
/// }
/// source {
///     registry image="registry.example.com/sources/app:latest"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceConfig {
    Git { url: String, revision: String },
    Blob { url: String },
    Registry { image: String },
}

impl fmt::Display for SourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceConfig::Git { url, revision } => write!(f, "git {}@{}", url, revision),
            SourceConfig::Blob { url } => write!(f, "blob {}", url),
            SourceConfig::Registry { image } => write!(f, "registry {}", image),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_equality_is_exact() {
        let a = SourceConfig::Git {
            url: "https://github.com/org/app".to_string(),
            revision: "main".to_string(),
        };
        let b = SourceConfig::Git {
            url: "https://github.com/org/app.git".to_string(),
            revision: "main".to_string(),
        };
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_source_display() {
        let git = SourceConfig::Git {
            url: "https://github.com/org/app".to_string(),
            revision: "v1".to_string(),
        };
        assert_eq!(git.to_string(), "git https://github.com/org/app@v1");

        let blob = SourceConfig::Blob {
            url: "https://example.com/app.tgz".to_string(),
        };
        assert_eq!(blob.to_string(), "blob https://example.com/app.tgz");

        let registry = SourceConfig::Registry {
            image: "gcr.io/sources/app".to_string(),
        };
        assert_eq!(registry.to_string(), "registry gcr.io/sources/app");
    }
}
