//! build ノードのパース

use super::source::{parse_buildpack, parse_source};
use super::{DEFAULT_NAMESPACE, first_arg, first_u64, resource_name, string_prop};
use crate::error::{FlowError, Result};
use crate::model::{
    BUILD_NUMBER_LABEL, Build, BuildSpec, BuildStatus, IMAGE_LABEL, ObjectMeta,
};
use kdl::KdlNode;

/// build ノードをパース
///
/// `image` プロパティと `number` から所有イメージ・ビルド番号のラベルを付与する。
pub fn parse_build(node: &KdlNode) -> Result<Build> {
    let name = resource_name(node)?;
    let mut metadata = ObjectMeta::new(
        name.clone(),
        string_prop(node, "namespace").unwrap_or(DEFAULT_NAMESPACE),
    );

    let mut number = None;
    let mut tag = None;
    let mut builder = None;
    let mut service_account = None;
    let mut source = None;
    let mut status = BuildStatus::default();

    if let Some(children) = node.children() {
        for child in children.nodes() {
            match child.name().value() {
                "number" => number = first_u64(child)?,
                "tag" => tag = first_arg(child).map(|s| s.to_string()),
                "builder" => builder = first_arg(child).map(|s| s.to_string()),
                "service-account" => service_account = first_arg(child).map(|s| s.to_string()),
                "source" => source = Some(parse_source(child)?),
                "buildpack" => status.build_metadata.push(parse_buildpack(child)?),
                _ => {}
            }
        }
    }

    let missing = |field: &str| {
        FlowError::InvalidConfig(format!("build '{}' には {} が必要です", name, field))
    };

    let build_number = number.ok_or_else(|| missing("number"))?;

    metadata
        .labels
        .insert(BUILD_NUMBER_LABEL.to_string(), build_number.to_string());
    if let Some(image) = string_prop(node, "image") {
        metadata
            .labels
            .insert(IMAGE_LABEL.to_string(), image.to_string());
    }

    Ok(Build {
        spec: BuildSpec {
            build_number,
            image: tag.ok_or_else(|| missing("tag"))?,
            builder: builder.ok_or_else(|| missing("builder"))?,
            service_account,
            source: source.ok_or_else(|| missing("source"))?,
        },
        metadata,
        status,
    })
}
