//! イメージ参照

use crate::matcher::DOCKER_HUB_REGISTRY;

/// キーチェーン選択に使うイメージ参照
///
/// イメージ名・名前空間と、任意のシークレット / サービスアカウントの紐付けを持つ。
pub trait ImageRef {
    fn image(&self) -> &str;

    fn namespace(&self) -> &str;

    fn secret_name(&self) -> Option<&str>;

    fn service_account(&self) -> Option<&str>;

    /// シークレットが紐付いているか（空文字は未設定扱い）
    fn has_secret(&self) -> bool {
        self.secret_name().is_some_and(|s| !s.is_empty())
    }
}

/// ImageRef の標準実装
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageReference {
    pub image: String,
    pub namespace: String,
    pub secret_name: Option<String>,
    pub service_account: Option<String>,
}

impl ImageReference {
    pub fn new(image: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            namespace: namespace.into(),
            ..Default::default()
        }
    }

    pub fn with_secret(mut self, secret_name: impl Into<String>) -> Self {
        self.secret_name = Some(secret_name.into());
        self
    }

    pub fn with_service_account(mut self, service_account: impl Into<String>) -> Self {
        self.service_account = Some(service_account.into());
        self
    }

    /// 参照先イメージのレジストリホスト
    pub fn registry(&self) -> String {
        registry_host(&self.image)
    }
}

impl ImageRef for ImageReference {
    fn image(&self) -> &str {
        &self.image
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn secret_name(&self) -> Option<&str> {
        self.secret_name.as_deref()
    }

    fn service_account(&self) -> Option<&str> {
        self.service_account.as_deref()
    }
}

/// イメージ名からレジストリホストを抽出
///
/// # Examples
/// - `ghcr.io/org/app:tag` -> `ghcr.io`
/// - `myuser/app:tag` -> `index.docker.io`
/// - `localhost:5000/app` -> `localhost:5000`
/// - `gcr.io/project/app@sha256:...` -> `gcr.io`
pub fn registry_host(image: &str) -> String {
    // ダイジェストを除去
    let image = image.split('@').next().unwrap_or(image);
    let parts: Vec<&str> = image.split('/').collect();

    if parts.len() >= 2 {
        let first = parts[0];

        // 先頭要素がホスト名らしければレジストリとみなす:
        // - `.` を含む（例: ghcr.io, *.amazonaws.com）
        // - `:` を含む（例: localhost:5000）
        // - localhost
        if first.contains('.') || first.contains(':') || first == "localhost" {
            return first.to_string();
        }
    }

    // デフォルトは Docker Hub
    DOCKER_HUB_REGISTRY.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_host_ghcr() {
        assert_eq!(registry_host("ghcr.io/org/app"), "ghcr.io");
        assert_eq!(registry_host("ghcr.io/org/app:v1.0"), "ghcr.io");
    }

    #[test]
    fn test_registry_host_docker_hub() {
        assert_eq!(registry_host("myuser/app"), DOCKER_HUB_REGISTRY);
        assert_eq!(registry_host("nginx"), DOCKER_HUB_REGISTRY);
        assert_eq!(registry_host("nginx:alpine"), DOCKER_HUB_REGISTRY);
    }

    #[test]
    fn test_registry_host_ecr() {
        assert_eq!(
            registry_host("123456789.dkr.ecr.ap-northeast-1.amazonaws.com/app"),
            "123456789.dkr.ecr.ap-northeast-1.amazonaws.com"
        );
    }

    #[test]
    fn test_registry_host_localhost() {
        assert_eq!(registry_host("localhost:5000/myapp"), "localhost:5000");
        assert_eq!(registry_host("localhost/myapp"), "localhost");
    }

    #[test]
    fn test_registry_host_digest() {
        assert_eq!(
            registry_host("gcr.io/project/app@sha256:0123456789abcdef"),
            "gcr.io"
        );
    }

    #[test]
    fn test_has_secret() {
        let reference = ImageReference::new("gcr.io/app", "default");
        assert!(!reference.has_secret());

        let reference = reference.with_secret("");
        assert!(!reference.has_secret());

        let reference = reference.with_secret("regcred");
        assert!(reference.has_secret());
        assert_eq!(reference.registry(), "gcr.io");
    }
}
