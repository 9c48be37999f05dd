//! image ノードのパース

use super::source::parse_source;
use super::{DEFAULT_NAMESPACE, first_arg, first_u64, resource_name, string_prop};
use crate::error::{FlowError, Result};
use crate::model::{Image, ImageSpec, ImageStatus, ObjectMeta};
use kdl::KdlNode;

/// image ノードをパース
pub fn parse_image(node: &KdlNode) -> Result<Image> {
    let name = resource_name(node)?;
    let mut metadata = ObjectMeta::new(
        name.clone(),
        string_prop(node, "namespace").unwrap_or(DEFAULT_NAMESPACE),
    );
    metadata.uid = string_prop(node, "uid").unwrap_or_default().to_string();

    let mut tag = None;
    let mut builder_ref = None;
    let mut service_account = None;
    let mut source = None;
    let mut status = ImageStatus::default();

    if let Some(children) = node.children() {
        for child in children.nodes() {
            match child.name().value() {
                "tag" => tag = first_arg(child).map(|s| s.to_string()),
                "builder" => builder_ref = first_arg(child).map(|s| s.to_string()),
                "service-account" => service_account = first_arg(child).map(|s| s.to_string()),
                "source" => source = Some(parse_source(child)?),
                "build-counter" => {
                    if let Some(counter) = first_u64(child)? {
                        // 次のビルド番号 (counter + 1) が u64 に収まること
                        if counter == u64::MAX {
                            return Err(FlowError::InvalidConfig(format!(
                                "image '{}' の build-counter が上限に達しています: {}",
                                name, counter
                            )));
                        }
                        status.build_counter = counter;
                    }
                }
                _ => {}
            }
        }
    }

    let missing = |field: &str| {
        FlowError::InvalidConfig(format!("image '{}' には {} が必要です", name, field))
    };

    Ok(Image {
        spec: ImageSpec {
            image: tag.ok_or_else(|| missing("tag"))?,
            builder_ref: builder_ref.ok_or_else(|| missing("builder"))?,
            service_account,
            source: source.ok_or_else(|| missing("source"))?,
        },
        metadata,
        status,
    })
}
