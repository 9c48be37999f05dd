//! KDL ファイルによるシークレットストア
//!
//! `secrets.kdl` に名前空間ごとのシークレットとサービスアカウントを定義します。
//!
//! ```kdl
//! namespace "default" {
//!     secret "regcred" {
//!         auth "registry.example.com" "dXNlcjpwYXNz"
//!         docker-config "~/.docker/config.json"
//!     }
//!     secret "gcr-creds" registry="gcr.io" {
//!         username "u"
//!         password "p"
//!     }
//!     service-account "builder" {
//!         secret "gcr-creds"
//!     }
//! }
//! ```

mod parser;

use crate::docker_config::DockerConfig;
use crate::error::{Result, SecretError};
use crate::matcher::registry_matches;
use crate::secret::{BasicCredentials, SecretStore};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// pull secret の中身
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RegistrySecret {
    /// (レジストリ, エンコード済みトークン)
    pub auths: Vec<(String, String)>,
    /// 参照する Docker config.json（参照のたびに読み込む）
    pub docker_configs: Vec<PathBuf>,
}

impl RegistrySecret {
    pub fn is_empty(&self) -> bool {
        self.auths.is_empty() && self.docker_configs.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SecretEntry {
    /// pull secret
    Registry(RegistrySecret),
    /// サービスアカウント経由で使う basic-auth
    Basic {
        registry: String,
        credentials: BasicCredentials,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ServiceAccountEntry {
    pub secrets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct NamespaceSecrets {
    pub secrets: HashMap<String, SecretEntry>,
    pub service_accounts: HashMap<String, ServiceAccountEntry>,
}

/// secrets.kdl を元にした SecretStore
#[derive(Debug, Clone, Default)]
pub struct KdlSecretStore {
    namespaces: HashMap<String, NamespaceSecrets>,
}

impl KdlSecretStore {
    /// KDL 文字列から作成
    ///
    /// 相対パスの docker-config は `base_dir` 基準で解決する。
    pub fn parse(content: &str, base_dir: &Path) -> Result<Self> {
        let namespaces = parser::parse_secrets(content, base_dir)?;
        debug!(namespaces = namespaces.len(), "Parsed secrets");
        Ok(Self { namespaces })
    }

    /// ファイルから読み込む
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "Loading secrets file");
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::parse(&content, base_dir)
    }

    fn namespace(&self, namespace: &str) -> Result<&NamespaceSecrets> {
        self.namespaces
            .get(namespace)
            .ok_or_else(|| SecretError::NamespaceNotFound(namespace.to_string()))
    }

    fn secret(&self, namespace: &str, name: &str) -> Result<&SecretEntry> {
        self.namespace(namespace)?
            .secrets
            .get(name)
            .ok_or_else(|| SecretError::SecretNotFound {
                namespace: namespace.to_string(),
                name: name.to_string(),
            })
    }
}

impl SecretStore for KdlSecretStore {
    fn secret_for_image_pull(
        &self,
        namespace: &str,
        secret_name: &str,
        registry: &str,
    ) -> Result<String> {
        let SecretEntry::Registry(secret) = self.secret(namespace, secret_name)? else {
            return Err(SecretError::UnexpectedSecretType {
                namespace: namespace.to_string(),
                name: secret_name.to_string(),
                expected: "pull secret",
            });
        };

        // 1. auth エントリ（宣言順）
        if let Some((_, token)) = secret
            .auths
            .iter()
            .find(|(candidate, _)| registry_matches(registry, candidate))
        {
            debug!(namespace, secret = secret_name, registry, "Found auth entry");
            return Ok(token.clone());
        }

        // 2. Docker config.json
        for path in &secret.docker_configs {
            let config = DockerConfig::load(path)?;
            if let Some(token) = config.token_for(registry) {
                debug!(
                    namespace,
                    secret = secret_name,
                    registry,
                    path = %path.display(),
                    "Found auth in docker config"
                );
                return Ok(token.to_string());
            }
        }

        Err(SecretError::CredentialNotFound {
            namespace: namespace.to_string(),
            name: secret_name.to_string(),
            registry: registry.to_string(),
        })
    }

    fn secret_for_service_account(
        &self,
        service_account: &str,
        namespace: &str,
        registry: &str,
    ) -> Result<BasicCredentials> {
        let account = self
            .namespace(namespace)?
            .service_accounts
            .get(service_account)
            .ok_or_else(|| SecretError::ServiceAccountNotFound {
                namespace: namespace.to_string(),
                name: service_account.to_string(),
            })?;

        for secret_name in &account.secrets {
            match self.secret(namespace, secret_name)? {
                SecretEntry::Basic {
                    registry: candidate,
                    credentials,
                } if registry_matches(registry, candidate) => {
                    debug!(
                        namespace,
                        service_account,
                        secret = %secret_name,
                        registry,
                        "Found service account credentials"
                    );
                    return Ok(credentials.clone());
                }
                _ => continue,
            }
        }

        Err(SecretError::CredentialNotFound {
            namespace: namespace.to_string(),
            name: service_account.to_string(),
            registry: registry.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SECRETS: &str = r#"
        namespace "default" {
            secret "regcred" {
                auth "registry.example.com" "dXNlcjpwYXNz"
                auth "https://index.docker.io/v1/" "aHViOnNlY3JldA=="
            }
            secret "gcr-creds" registry="gcr.io" {
                username "gcr-user"
                password "gcr-pass"
            }
            secret "ghcr-creds" registry="ghcr.io" {
                username "ghcr-user"
                password "ghcr-pass"
            }
            service-account "builder" {
                secret "regcred"
                secret "gcr-creds"
                secret "ghcr-creds"
            }
            service-account "broken" {
                secret "missing"
            }
        }
        namespace "team-a"
    "#;

    fn store() -> KdlSecretStore {
        KdlSecretStore::parse(SECRETS, Path::new(".")).unwrap()
    }

    #[test]
    fn test_image_pull_auth_entry() {
        let store = store();
        assert_eq!(
            store
                .secret_for_image_pull("default", "regcred", "registry.example.com")
                .unwrap(),
            "dXNlcjpwYXNz"
        );
        assert_eq!(
            store
                .secret_for_image_pull("default", "regcred", "docker.io")
                .unwrap(),
            "aHViOnNlY3JldA=="
        );
    }

    #[test]
    fn test_image_pull_registry_not_bound() {
        let err = store()
            .secret_for_image_pull("default", "regcred", "quay.io")
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(matches!(err, SecretError::CredentialNotFound { ref registry, .. } if registry == "quay.io"));
    }

    #[test]
    fn test_image_pull_missing_secret_and_namespace() {
        let store = store();
        assert!(matches!(
            store.secret_for_image_pull("default", "missing", "gcr.io"),
            Err(SecretError::SecretNotFound { .. })
        ));
        assert!(matches!(
            store.secret_for_image_pull("team-a", "regcred", "gcr.io"),
            Err(SecretError::SecretNotFound { .. })
        ));
        assert!(matches!(
            store.secret_for_image_pull("nowhere", "regcred", "gcr.io"),
            Err(SecretError::NamespaceNotFound(_))
        ));
    }

    #[test]
    fn test_image_pull_basic_secret_is_wrong_type() {
        let err = store()
            .secret_for_image_pull("default", "gcr-creds", "gcr.io")
            .unwrap_err();
        assert!(matches!(err, SecretError::UnexpectedSecretType { .. }));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_service_account_picks_matching_registry() {
        let store = store();
        assert_eq!(
            store
                .secret_for_service_account("builder", "default", "gcr.io")
                .unwrap(),
            BasicCredentials::new("gcr-user", "gcr-pass")
        );
        assert_eq!(
            store
                .secret_for_service_account("builder", "default", "ghcr.io")
                .unwrap(),
            BasicCredentials::new("ghcr-user", "ghcr-pass")
        );
    }

    #[test]
    fn test_service_account_errors() {
        let store = store();
        assert!(matches!(
            store.secret_for_service_account("builder", "default", "registry.example.com"),
            Err(SecretError::CredentialNotFound { .. })
        ));
        assert!(matches!(
            store.secret_for_service_account("nobody", "default", "gcr.io"),
            Err(SecretError::ServiceAccountNotFound { .. })
        ));
        assert!(matches!(
            store.secret_for_service_account("broken", "default", "gcr.io"),
            Err(SecretError::SecretNotFound { .. })
        ));
    }

    #[test]
    fn test_docker_config_is_read_on_every_lookup() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.json");
        fs::write(
            &config_path,
            r#"{"auths": {"quay.io": {"auth": "Zmlyc3Q6MQ=="}}}"#,
        )
        .unwrap();

        let secrets_path = dir.path().join("secrets.kdl");
        fs::write(
            &secrets_path,
            r#"
            namespace "default" {
                secret "local" {
                    docker-config "config.json"
                }
            }
            "#,
        )
        .unwrap();

        let store = KdlSecretStore::from_file(&secrets_path).unwrap();
        assert_eq!(
            store
                .secret_for_image_pull("default", "local", "quay.io")
                .unwrap(),
            "Zmlyc3Q6MQ=="
        );

        // ローテーション後は新しい値を返す
        fs::write(
            &config_path,
            r#"{"auths": {"quay.io": {"auth": "c2Vjb25kOjI="}}}"#,
        )
        .unwrap();
        assert_eq!(
            store
                .secret_for_image_pull("default", "local", "quay.io")
                .unwrap(),
            "c2Vjb25kOjI="
        );
    }

    #[test]
    fn test_docker_config_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = KdlSecretStore::parse(
            r#"
            namespace "default" {
                secret "local" {
                    docker-config "missing.json"
                }
            }
            "#,
            dir.path(),
        )
        .unwrap();

        assert!(matches!(
            store.secret_for_image_pull("default", "local", "quay.io"),
            Err(SecretError::DockerConfig { .. })
        ));
    }

    #[test]
    fn test_from_file_missing() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            KdlSecretStore::from_file(dir.path().join("secrets.kdl")),
            Err(SecretError::Io(_))
        ));
    }
}
