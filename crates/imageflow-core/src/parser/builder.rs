//! builder ノードのパース

use super::source::parse_buildpack;
use super::{DEFAULT_NAMESPACE, first_arg, resource_name, string_prop};
use crate::error::{FlowError, Result};
use crate::model::{Builder, BuilderSpec, BuilderStatus, ObjectMeta};
use kdl::KdlNode;

/// builder ノードをパース
pub fn parse_builder(node: &KdlNode) -> Result<Builder> {
    let name = resource_name(node)?;
    let metadata = ObjectMeta::new(
        name.clone(),
        string_prop(node, "namespace").unwrap_or(DEFAULT_NAMESPACE),
    );

    let mut image = None;
    let mut status = BuilderStatus::default();

    if let Some(children) = node.children() {
        for child in children.nodes() {
            match child.name().value() {
                "image" => image = first_arg(child).map(|s| s.to_string()),
                "buildpack" => status.builder_metadata.push(parse_buildpack(child)?),
                _ => {}
            }
        }
    }

    let image = image.ok_or_else(|| {
        FlowError::InvalidConfig(format!("builder '{}' には image が必要です", name))
    })?;

    Ok(Builder {
        metadata,
        spec: BuilderSpec { image },
        status,
    })
}
