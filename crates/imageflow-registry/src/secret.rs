//! シークレットストアの抽象

use crate::error::Result;
use std::fmt;

/// ユーザー名とパスワードの組
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl BasicCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// パスワードはログに出さない
impl fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// 認証情報の取得元
///
/// 実装は I/O を伴ってよい。呼び出しごとに最新の値を返し、キャッシュしないこと。
pub trait SecretStore: Send + Sync {
    /// pull secret からレジストリ用のエンコード済みトークン（base64 の `user:pass`）を取得
    fn secret_for_image_pull(
        &self,
        namespace: &str,
        secret_name: &str,
        registry: &str,
    ) -> Result<String>;

    /// サービスアカウントに紐づくレジストリ用のユーザー名・パスワードを取得
    fn secret_for_service_account(
        &self,
        service_account: &str,
        namespace: &str,
        registry: &str,
    ) -> Result<BasicCredentials>;
}
