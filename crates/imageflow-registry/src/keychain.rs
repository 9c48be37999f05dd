//! キーチェーン
//!
//! イメージ参照ごとに選ばれる認証情報の解決方法。
//! 接続先レジストリが決まった時点で [`Keychain::resolve`] を呼び、
//! その都度シークレットストアに問い合わせる（結果はキャッシュしない）。

use crate::auth::Authenticator;
use crate::error::KeychainError;
use crate::reference::ImageRef;
use crate::secret::SecretStore;
use std::fmt;
use std::sync::Arc;

/// レジストリホストから認証子を解決する
pub trait Keychain {
    fn resolve(&self, registry: &str) -> Result<Authenticator, KeychainError>;
}

/// 常に匿名でアクセスするキーチェーン
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnonymousKeychain;

impl Keychain for AnonymousKeychain {
    fn resolve(&self, _registry: &str) -> Result<Authenticator, KeychainError> {
        Ok(Authenticator::Anonymous)
    }
}

/// 名前空間の pull secret から解決するキーチェーン
#[derive(Clone)]
pub struct PullSecretKeychain {
    pub namespace: String,
    pub secret_name: String,
    store: Arc<dyn SecretStore>,
}

impl PullSecretKeychain {
    pub fn new(
        namespace: impl Into<String>,
        secret_name: impl Into<String>,
        store: Arc<dyn SecretStore>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            secret_name: secret_name.into(),
            store,
        }
    }
}

impl Keychain for PullSecretKeychain {
    #[tracing::instrument(skip(self), fields(namespace = %self.namespace, secret = %self.secret_name))]
    fn resolve(&self, registry: &str) -> Result<Authenticator, KeychainError> {
        tracing::debug!("Resolving pull secret");
        let token = self
            .store
            .secret_for_image_pull(&self.namespace, &self.secret_name, registry)?;
        Authenticator::from_token(&token, registry)
    }
}

impl fmt::Debug for PullSecretKeychain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PullSecretKeychain")
            .field("namespace", &self.namespace)
            .field("secret_name", &self.secret_name)
            .finish_non_exhaustive()
    }
}

/// サービスアカウントに紐づくシークレットから解決するキーチェーン
#[derive(Clone)]
pub struct ServiceAccountKeychain {
    pub namespace: String,
    pub service_account: String,
    store: Arc<dyn SecretStore>,
}

impl ServiceAccountKeychain {
    pub fn new(
        namespace: impl Into<String>,
        service_account: impl Into<String>,
        store: Arc<dyn SecretStore>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            service_account: service_account.into(),
            store,
        }
    }
}

impl Keychain for ServiceAccountKeychain {
    #[tracing::instrument(skip(self), fields(namespace = %self.namespace, service_account = %self.service_account))]
    fn resolve(&self, registry: &str) -> Result<Authenticator, KeychainError> {
        tracing::debug!("Resolving service account credentials");
        let credentials = self.store.secret_for_service_account(
            &self.service_account,
            &self.namespace,
            registry,
        )?;
        Ok(Authenticator::from_basic(&credentials))
    }
}

impl fmt::Debug for ServiceAccountKeychain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKeychain")
            .field("namespace", &self.namespace)
            .field("service_account", &self.service_account)
            .finish_non_exhaustive()
    }
}

/// ファクトリが返すキーチェーン
#[derive(Debug, Clone)]
pub enum ImageKeychain {
    Anonymous(AnonymousKeychain),
    PullSecret(PullSecretKeychain),
    ServiceAccount(ServiceAccountKeychain),
}

impl ImageKeychain {
    /// 種類名（ログ・表示用）
    pub fn kind(&self) -> &'static str {
        match self {
            ImageKeychain::Anonymous(_) => "anonymous",
            ImageKeychain::PullSecret(_) => "pull-secret",
            ImageKeychain::ServiceAccount(_) => "service-account",
        }
    }
}

impl Keychain for ImageKeychain {
    fn resolve(&self, registry: &str) -> Result<Authenticator, KeychainError> {
        match self {
            ImageKeychain::Anonymous(k) => k.resolve(registry),
            ImageKeychain::PullSecret(k) => k.resolve(registry),
            ImageKeychain::ServiceAccount(k) => k.resolve(registry),
        }
    }
}

/// イメージ参照からキーチェーンを選ぶ
#[derive(Clone)]
pub struct SecretKeychainFactory {
    store: Arc<dyn SecretStore>,
}

impl SecretKeychainFactory {
    pub fn new(store: Arc<dyn SecretStore>) -> Self {
        Self { store }
    }

    /// キーチェーンを選択
    ///
    /// - シークレットなし → 匿名
    /// - シークレットのみ → pull secret
    /// - シークレット + サービスアカウント → サービスアカウント
    ///
    /// 空文字は未設定として扱う。ストアにはアクセスしない。
    pub fn keychain_for_image_ref<R: ImageRef + ?Sized>(&self, reference: &R) -> ImageKeychain {
        if !reference.has_secret() {
            tracing::debug!(image = %reference.image(), "Using anonymous keychain");
            return ImageKeychain::Anonymous(AnonymousKeychain);
        }

        let namespace = reference.namespace();

        match reference.service_account().filter(|sa| !sa.is_empty()) {
            Some(service_account) => {
                tracing::debug!(
                    image = %reference.image(),
                    namespace,
                    service_account,
                    "Using service account keychain"
                );
                ImageKeychain::ServiceAccount(ServiceAccountKeychain::new(
                    namespace,
                    service_account,
                    Arc::clone(&self.store),
                ))
            }
            None => {
                // has_secret() で Some かつ非空であることを確認済み
                let secret_name = reference.secret_name().unwrap_or_default();
                tracing::debug!(
                    image = %reference.image(),
                    namespace,
                    secret = secret_name,
                    "Using pull secret keychain"
                );
                ImageKeychain::PullSecret(PullSecretKeychain::new(
                    namespace,
                    secret_name,
                    Arc::clone(&self.store),
                ))
            }
        }
    }
}

impl fmt::Debug for SecretKeychainFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKeychainFactory").finish_non_exhaustive()
    }
}
