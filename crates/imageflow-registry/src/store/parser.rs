//! secrets.kdl のパース

use super::{NamespaceSecrets, RegistrySecret, SecretEntry, ServiceAccountEntry};
use crate::docker_config::default_docker_config_path;
use crate::error::{Result, SecretError};
use crate::secret::BasicCredentials;
use kdl::{KdlDocument, KdlNode};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// secrets.kdl をパース
///
/// 相対パスの docker-config は `base_dir` 基準で解決する。
pub(super) fn parse_secrets(
    content: &str,
    base_dir: &Path,
) -> Result<HashMap<String, NamespaceSecrets>> {
    let doc: KdlDocument = content.parse()?;
    let mut namespaces: HashMap<String, NamespaceSecrets> = HashMap::new();

    for node in doc.nodes() {
        match node.name().value() {
            "namespace" => {
                let name = required_name(node)?;
                let parsed = parse_namespace(node, &name, base_dir)?;
                if namespaces.insert(name.clone(), parsed).is_some() {
                    return Err(SecretError::InvalidConfig(format!(
                        "namespace '{}' が重複しています",
                        name
                    )));
                }
            }
            other => {
                debug!(node = other, "Skipping unknown node");
            }
        }
    }

    Ok(namespaces)
}

fn parse_namespace(node: &KdlNode, namespace: &str, base_dir: &Path) -> Result<NamespaceSecrets> {
    let mut secrets = NamespaceSecrets::default();

    let Some(children) = node.children() else {
        return Ok(secrets);
    };

    for child in children.nodes() {
        match child.name().value() {
            "secret" => {
                let name = required_name(child)?;
                let entry = parse_secret(child, &name, base_dir)?;
                if secrets.secrets.insert(name.clone(), entry).is_some() {
                    return Err(SecretError::InvalidConfig(format!(
                        "secret '{}/{}' が重複しています",
                        namespace, name
                    )));
                }
            }
            "service-account" => {
                let name = required_name(child)?;
                let entry = parse_service_account(child)?;
                if secrets.service_accounts.insert(name.clone(), entry).is_some() {
                    return Err(SecretError::InvalidConfig(format!(
                        "service-account '{}/{}' が重複しています",
                        namespace, name
                    )));
                }
            }
            other => {
                debug!(node = other, namespace, "Skipping unknown node");
            }
        }
    }

    Ok(secrets)
}

/// secret ノードをパース
///
/// `username` / `password` を持てば basic-auth、それ以外は pull secret。
fn parse_secret(node: &KdlNode, name: &str, base_dir: &Path) -> Result<SecretEntry> {
    let mut registry_secret = RegistrySecret::default();
    let mut username = None;
    let mut password = None;

    if let Some(children) = node.children() {
        for child in children.nodes() {
            match child.name().value() {
                "auth" => {
                    let args = string_args(child);
                    let [registry, token] = args.as_slice() else {
                        return Err(SecretError::InvalidConfig(format!(
                            "secret '{}' の auth にはレジストリとトークンが必要です",
                            name
                        )));
                    };
                    registry_secret
                        .auths
                        .push((registry.to_string(), token.to_string()));
                }
                "docker-config" => {
                    let path = match string_args(child).first() {
                        Some(path) => resolve_path(path, base_dir),
                        None => default_docker_config_path(),
                    };
                    registry_secret.docker_configs.push(path);
                }
                "username" => username = string_args(child).first().map(|s| s.to_string()),
                "password" => password = string_args(child).first().map(|s| s.to_string()),
                other => {
                    debug!(node = other, secret = name, "Skipping unknown node");
                }
            }
        }
    }

    match (username, password) {
        (None, None) => {
            if let Some(registry) = string_prop(node, "registry") {
                return Err(SecretError::InvalidConfig(format!(
                    "secret '{}' に registry=\"{}\" がありますが username / password がありません",
                    name, registry
                )));
            }
            Ok(SecretEntry::Registry(registry_secret))
        }
        (Some(username), Some(password)) => {
            if !registry_secret.is_empty() {
                return Err(SecretError::InvalidConfig(format!(
                    "secret '{}' に basic-auth と auth / docker-config を同時に指定できません",
                    name
                )));
            }
            let registry = string_prop(node, "registry").ok_or_else(|| {
                SecretError::InvalidConfig(format!(
                    "basic-auth の secret '{}' には registry 属性が必要です",
                    name
                ))
            })?;
            Ok(SecretEntry::Basic {
                registry: registry.to_string(),
                credentials: BasicCredentials::new(username, password),
            })
        }
        _ => Err(SecretError::InvalidConfig(format!(
            "secret '{}' には username と password の両方が必要です",
            name
        ))),
    }
}

fn parse_service_account(node: &KdlNode) -> Result<ServiceAccountEntry> {
    let mut entry = ServiceAccountEntry::default();

    if let Some(children) = node.children() {
        for child in children.nodes() {
            if child.name().value() == "secret" {
                entry.secrets.push(required_name(child)?);
            }
        }
    }

    Ok(entry)
}

/// `~/` はホームディレクトリ、相対パスは base_dir 基準
fn resolve_path(path: &str, base_dir: &Path) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }

    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        base_dir.join(path)
    }
}

fn string_args(node: &KdlNode) -> Vec<&str> {
    node.entries()
        .iter()
        .filter(|e| e.name().is_none())
        .filter_map(|e| e.value().as_string())
        .collect()
}

fn string_prop<'a>(node: &'a KdlNode, key: &str) -> Option<&'a str> {
    node.entries()
        .iter()
        .find(|e| e.name().is_some_and(|n| n.value() == key))
        .and_then(|e| e.value().as_string())
}

fn required_name(node: &KdlNode) -> Result<String> {
    string_args(node)
        .first()
        .map(|s| s.to_string())
        .ok_or_else(|| {
            SecretError::InvalidConfig(format!("{} には名前が必要です", node.name().value()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<HashMap<String, NamespaceSecrets>> {
        parse_secrets(content, Path::new("/etc/imageflow"))
    }

    #[test]
    fn test_parse_pull_secret() {
        let namespaces = parse(
            r#"
            namespace "default" {
                secret "regcred" {
                    auth "registry.example.com" "dXNlcjpwYXNz"
                    docker-config "docker/config.json"
                }
            }
            "#,
        )
        .unwrap();

        let SecretEntry::Registry(secret) = &namespaces["default"].secrets["regcred"] else {
            panic!("expected registry secret");
        };
        assert_eq!(
            secret.auths,
            vec![(
                "registry.example.com".to_string(),
                "dXNlcjpwYXNz".to_string()
            )]
        );
        assert_eq!(
            secret.docker_configs,
            vec![PathBuf::from("/etc/imageflow/docker/config.json")]
        );
    }

    #[test]
    fn test_parse_basic_secret_and_service_account() {
        let namespaces = parse(
            r#"
            namespace "team-a" {
                secret "gcr-creds" registry="gcr.io" {
                    username "u"
                    password "p"
                }
                service-account "builder" {
                    secret "gcr-creds"
                    secret "other"
                }
            }
            "#,
        )
        .unwrap();

        let ns = &namespaces["team-a"];
        assert!(matches!(
            &ns.secrets["gcr-creds"],
            SecretEntry::Basic { registry, credentials }
                if registry == "gcr.io" && credentials == &BasicCredentials::new("u", "p")
        ));
        assert_eq!(ns.service_accounts["builder"].secrets, vec!["gcr-creds", "other"]);
    }

    #[test]
    fn test_parse_docker_config_without_path_uses_default() {
        let namespaces = parse(
            r#"
            namespace "default" {
                secret "local" {
                    docker-config
                }
            }
            "#,
        )
        .unwrap();

        let SecretEntry::Registry(secret) = &namespaces["default"].secrets["local"] else {
            panic!("expected registry secret");
        };
        assert_eq!(secret.docker_configs.len(), 1);
        assert!(secret.docker_configs[0].ends_with("config.json"));
    }

    #[test]
    fn test_resolve_path() {
        let base = Path::new("/base");
        assert_eq!(resolve_path("/abs/config.json", base), PathBuf::from("/abs/config.json"));
        assert_eq!(resolve_path("rel/config.json", base), PathBuf::from("/base/rel/config.json"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(resolve_path("~/.docker/config.json", base), home.join(".docker/config.json"));
        }
    }

    #[test]
    fn test_parse_basic_secret_without_registry_error() {
        let result = parse(
            r#"
            namespace "default" {
                secret "creds" {
                    username "u"
                    password "p"
                }
            }
            "#,
        );
        assert!(matches!(result, Err(SecretError::InvalidConfig(_))));
    }

    #[test]
    fn test_parse_username_only_error() {
        let result = parse(
            r#"
            namespace "default" {
                secret "creds" registry="gcr.io" {
                    username "u"
                }
            }
            "#,
        );
        assert!(matches!(result, Err(SecretError::InvalidConfig(_))));
    }

    #[test]
    fn test_parse_auth_missing_token_error() {
        let result = parse(
            r#"
            namespace "default" {
                secret "regcred" {
                    auth "gcr.io"
                }
            }
            "#,
        );
        assert!(matches!(result, Err(SecretError::InvalidConfig(_))));
    }

    #[test]
    fn test_parse_duplicate_secret_error() {
        let result = parse(
            r#"
            namespace "default" {
                secret "regcred" { auth "gcr.io" "dTpw"; }
                secret "regcred" { auth "ghcr.io" "dTpw"; }
            }
            "#,
        );
        assert!(matches!(result, Err(SecretError::InvalidConfig(_))));
    }

    #[test]
    fn test_parse_invalid_kdl() {
        let result = parse("namespace \"default\" {");
        assert!(matches!(result, Err(SecretError::KdlParse(_))));
    }
}
