//! レジストリ認証のエラー型

use std::path::PathBuf;

/// シークレットストアのエラー
#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    #[error("名前空間が見つかりません: {0}")]
    NamespaceNotFound(String),

    #[error("シークレットが見つかりません: {namespace}/{name}")]
    SecretNotFound { namespace: String, name: String },

    #[error("サービスアカウントが見つかりません: {namespace}/{name}")]
    ServiceAccountNotFound { namespace: String, name: String },

    #[error("{namespace}/{name} にレジストリ '{registry}' の認証情報がありません")]
    CredentialNotFound {
        namespace: String,
        name: String,
        registry: String,
    },

    #[error("シークレット {namespace}/{name} は {expected} 形式ではありません")]
    UnexpectedSecretType {
        namespace: String,
        name: String,
        expected: &'static str,
    },

    #[error("Docker config の読み込みに失敗: {path}\n理由: {message}")]
    DockerConfig { path: PathBuf, message: String },

    #[error("KDL パースエラー: {0}")]
    KdlParse(#[from] kdl::KdlError),

    #[error("不正なシークレット定義: {0}")]
    InvalidConfig(String),

    #[error("IO エラー: {0}")]
    Io(#[from] std::io::Error),
}

impl SecretError {
    /// 認証情報の紐付けが存在しないことを表すエラーか
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SecretError::NamespaceNotFound(_)
                | SecretError::SecretNotFound { .. }
                | SecretError::ServiceAccountNotFound { .. }
                | SecretError::CredentialNotFound { .. }
        )
    }
}

/// キーチェーンによる解決のエラー
///
/// シークレットストアのエラーはそのまま透過する。
#[derive(Debug, thiserror::Error)]
pub enum KeychainError {
    #[error(transparent)]
    Secret(#[from] SecretError),

    #[error("レジストリ '{registry}' の認証情報が不正です: {message}")]
    MalformedCredential { registry: String, message: String },
}

impl KeychainError {
    pub fn is_not_found(&self) -> bool {
        match self {
            KeychainError::Secret(e) => e.is_not_found(),
            KeychainError::MalformedCredential { .. } => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, SecretError>;
