//! レジストリホストの照合

/// Docker Hub の正規ホスト名
pub const DOCKER_HUB_REGISTRY: &str = "index.docker.io";

/// レジストリ名を正規化
///
/// - 前後の空白を除去し小文字化
/// - `https://` / `http://` スキームとパスを除去
///   （`https://index.docker.io/v1/` → `index.docker.io`）
/// - Docker Hub の別名（`docker.io`, `registry-1.docker.io`）を `index.docker.io` に統一
pub fn normalize_registry(registry: &str) -> String {
    let r = registry.trim().to_lowercase();
    let r = r
        .strip_prefix("https://")
        .or_else(|| r.strip_prefix("http://"))
        .unwrap_or(&r);
    let host = r.split('/').next().unwrap_or(r);

    match host {
        "docker.io" | "registry-1.docker.io" | DOCKER_HUB_REGISTRY => {
            DOCKER_HUB_REGISTRY.to_string()
        }
        _ => host.to_string(),
    }
}

/// 要求されたレジストリと設定上のレジストリが同じホストを指すか
///
/// どちらかが空の場合は一致しない。
pub fn registry_matches(requested: &str, configured: &str) -> bool {
    let requested = normalize_registry(requested);
    let configured = normalize_registry(configured);
    !requested.is_empty() && requested == configured
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_plain_host() {
        assert_eq!(normalize_registry("gcr.io"), "gcr.io");
        assert_eq!(normalize_registry("  GHCR.io "), "ghcr.io");
        assert_eq!(normalize_registry("localhost:5000"), "localhost:5000");
    }

    #[test]
    fn test_normalize_strips_scheme_and_path() {
        assert_eq!(normalize_registry("https://gcr.io"), "gcr.io");
        assert_eq!(normalize_registry("http://localhost:5000/v2/"), "localhost:5000");
        assert_eq!(
            normalize_registry("https://index.docker.io/v1/"),
            DOCKER_HUB_REGISTRY
        );
    }

    #[test]
    fn test_docker_hub_aliases() {
        for alias in ["docker.io", "registry-1.docker.io", "index.docker.io"] {
            assert_eq!(normalize_registry(alias), DOCKER_HUB_REGISTRY);
        }
        assert!(registry_matches("docker.io", "https://index.docker.io/v1/"));
    }

    #[test]
    fn test_registry_matches() {
        assert!(registry_matches("registry.example.com", "https://registry.example.com"));
        assert!(!registry_matches("registry.example.com", "gcr.io"));
        assert!(!registry_matches("registry.example.com:5000", "registry.example.com"));
    }

    #[test]
    fn test_empty_never_matches() {
        assert!(!registry_matches("", ""));
        assert!(!registry_matches("gcr.io", ""));
    }
}
