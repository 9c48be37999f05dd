//! レジストリ認証子
//!
//! キーチェーンの解決結果。HTTP Authorization ヘッダの値を生成する。

use crate::error::KeychainError;
use crate::secret::BasicCredentials;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fmt;

/// レジストリへの認証方法
#[derive(Clone, PartialEq, Eq)]
pub enum Authenticator {
    /// 認証なし
    Anonymous,
    /// base64 エンコード済みの `username:password`
    Basic(String),
}

impl Authenticator {
    /// エンコード済みトークンから認証子を作成
    ///
    /// トークンはそのまま保持するが、base64 として解釈できない場合はエラー。
    pub fn from_token(token: &str, registry: &str) -> Result<Self, KeychainError> {
        if token.is_empty() {
            return Err(KeychainError::MalformedCredential {
                registry: registry.to_string(),
                message: "token is empty".to_string(),
            });
        }

        STANDARD
            .decode(token)
            .map_err(|e| KeychainError::MalformedCredential {
                registry: registry.to_string(),
                message: format!("Failed to decode auth: {}", e),
            })?;

        Ok(Authenticator::Basic(token.to_string()))
    }

    /// ユーザー名とパスワードから認証子を作成
    pub fn from_basic(credentials: &BasicCredentials) -> Self {
        let raw = format!("{}:{}", credentials.username, credentials.password);
        Authenticator::Basic(STANDARD.encode(raw))
    }

    /// Authorization ヘッダの値（匿名なら None）
    pub fn authorization(&self) -> Option<String> {
        match self {
            Authenticator::Anonymous => None,
            Authenticator::Basic(token) => Some(format!("Basic {}", token)),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Authenticator::Anonymous)
    }
}

// トークンはログに出さない
impl fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Authenticator::Anonymous => f.write_str("Anonymous"),
            Authenticator::Basic(_) => f.write_str("Basic(<redacted>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_basic() {
        let auth = Authenticator::from_basic(&BasicCredentials::new("u", "p"));
        assert_eq!(auth.authorization().as_deref(), Some("Basic dTpw"));
        assert!(!auth.is_anonymous());
    }

    #[test]
    fn test_from_token_keeps_token_verbatim() {
        let auth = Authenticator::from_token("dXNlcjpwYXNz", "gcr.io").unwrap();
        assert_eq!(auth.authorization().as_deref(), Some("Basic dXNlcjpwYXNz"));
    }

    #[test]
    fn test_from_token_invalid_base64() {
        let err = Authenticator::from_token("not base64!!", "gcr.io").unwrap_err();
        assert!(matches!(
            err,
            KeychainError::MalformedCredential { ref registry, .. } if registry == "gcr.io"
        ));
    }

    #[test]
    fn test_from_token_empty() {
        assert!(Authenticator::from_token("", "gcr.io").is_err());
    }

    #[test]
    fn test_anonymous() {
        let auth = Authenticator::Anonymous;
        assert!(auth.is_anonymous());
        assert_eq!(auth.authorization(), None);
    }

    #[test]
    fn test_password_with_colon() {
        let auth = Authenticator::from_basic(&BasicCredentials::new("user", "pa:ss"));
        // base64("user:pa:ss")
        assert_eq!(auth.authorization().as_deref(), Some("Basic dXNlcjpwYTpzcw=="));
    }

    #[test]
    fn test_debug_redacts_token() {
        let auth = Authenticator::Basic("dTpw".to_string());
        assert!(!format!("{:?}", auth).contains("dTpw"));
    }
}
