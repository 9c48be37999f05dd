//! source / buildpack ノードのパース

use super::{first_arg, string_prop};
use crate::error::{FlowError, Result};
use crate::model::{BuildpackMetadata, SourceConfig};
use kdl::KdlNode;

/// source ノードをパース
///
/// 子ノードに `git` / `blob` / `registry` のいずれか1つを持つ。
pub fn parse_source(node: &KdlNode) -> Result<SourceConfig> {
    let children = node
        .children()
        .ok_or_else(|| FlowError::InvalidConfig("source には git / blob / registry のいずれかが必要です".to_string()))?;

    let mut source = None;

    for child in children.nodes() {
        let parsed = match child.name().value() {
            "git" => {
                let url = string_prop(child, "url").ok_or_else(|| {
                    FlowError::InvalidConfig("git には url が必要です".to_string())
                })?;
                let revision = string_prop(child, "revision").ok_or_else(|| {
                    FlowError::InvalidConfig("git には revision が必要です".to_string())
                })?;
                SourceConfig::Git {
                    url: url.to_string(),
                    revision: revision.to_string(),
                }
            }
            "blob" => {
                let url = string_prop(child, "url").ok_or_else(|| {
                    FlowError::InvalidConfig("blob には url が必要です".to_string())
                })?;
                SourceConfig::Blob {
                    url: url.to_string(),
                }
            }
            "registry" => {
                let image = string_prop(child, "image").ok_or_else(|| {
                    FlowError::InvalidConfig("registry には image が必要です".to_string())
                })?;
                SourceConfig::Registry {
                    image: image.to_string(),
                }
            }
            _ => continue,
        };

        if source.replace(parsed).is_some() {
            return Err(FlowError::InvalidConfig(
                "source の種類は1つだけ指定してください".to_string(),
            ));
        }
    }

    source.ok_or_else(|| FlowError::InvalidConfig("source には git / blob / registry のいずれかが必要です".to_string()))
}

/// buildpack ノードをパース
///
/// `buildpack "io.buildpacks.java" version="1.0"`
pub fn parse_buildpack(node: &KdlNode) -> Result<BuildpackMetadata> {
    let id = first_arg(node)
        .ok_or_else(|| FlowError::InvalidConfig("buildpack には ID が必要です".to_string()))?;
    let version = string_prop(node, "version").unwrap_or_default();
    Ok(BuildpackMetadata::new(id, version))
}
