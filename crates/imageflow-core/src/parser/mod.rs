//! KDLパーサー
//!
//! `imageflow.kdl` をパースして Project を生成します。
//! 各ノードタイプのパース処理はモジュールに分離されています。

mod build;
mod builder;
mod image;
mod source;


use build::parse_build;
use builder::parse_builder;
use image::parse_image;

// 他クレートから再利用可能なパース関数
pub use source::{parse_buildpack, parse_source};

use crate::error::{FlowError, Result};
use crate::model::Project;
use kdl::{KdlDocument, KdlNode};
use std::fs;
use std::path::Path;
use tracing::debug;

/// 名前空間を省略した場合の既定値
pub const DEFAULT_NAMESPACE: &str = "default";

/// KDLファイルをパースしてProjectを生成
pub fn parse_project_file<P: AsRef<Path>>(path: P) -> Result<Project> {
    let content = fs::read_to_string(path.as_ref())?;
    debug!(path = %path.as_ref().display(), "Parsing project file");
    parse_project(&content)
}

/// KDL文字列をパース
pub fn parse_project(content: &str) -> Result<Project> {
    let doc: KdlDocument = content.parse()?;

    let mut project = Project::default();

    for node in doc.nodes() {
        match node.name().value() {
            "image" => {
                let image = parse_image(node)?;
                let name = image.metadata.name.clone();
                if project.images.insert(name.clone(), image).is_some() {
                    return Err(FlowError::DuplicateResource {
                        kind: "image",
                        name,
                    });
                }
            }
            "builder" => {
                let builder = parse_builder(node)?;
                let name = builder.metadata.name.clone();
                if project.builders.insert(name.clone(), builder).is_some() {
                    return Err(FlowError::DuplicateResource {
                        kind: "builder",
                        name,
                    });
                }
            }
            "build" => {
                project.builds.push(parse_build(node)?);
            }
            other => {
                // 不明なノードはスキップ
                debug!(node = other, "Skipping unknown node");
            }
        }
    }

    debug!(
        images = project.images.len(),
        builders = project.builders.len(),
        builds = project.builds.len(),
        "Parsed project"
    );

    Ok(project)
}

/// ノードの最初の引数（名前なしエントリ）を文字列として取得
pub(crate) fn first_arg(node: &KdlNode) -> Option<&str> {
    node.entries()
        .iter()
        .find(|e| e.name().is_none())
        .and_then(|e| e.value().as_string())
}

/// 名前付きプロパティを文字列として取得
pub(crate) fn string_prop<'a>(node: &'a KdlNode, key: &str) -> Option<&'a str> {
    node.entries()
        .iter()
        .find(|e| e.name().is_some_and(|n| n.value() == key))
        .and_then(|e| e.value().as_string())
}

/// ノードの最初の引数を非負整数として取得
pub(crate) fn first_u64(node: &KdlNode) -> Result<Option<u64>> {
    let Some(entry) = node.entries().iter().find(|e| e.name().is_none()) else {
        return Ok(None);
    };
    let value = entry.value().as_integer().ok_or_else(|| {
        FlowError::InvalidConfig(format!("{} には整数を指定してください", node.name().value()))
    })?;
    u64::try_from(value).map(Some).map_err(|_| {
        FlowError::InvalidConfig(format!(
            "{} には0以上の整数を指定してください: {}",
            node.name().value(),
            value
        ))
    })
}

/// リソースノードの名前（必須）を取得
pub(crate) fn resource_name(node: &KdlNode) -> Result<String> {
    first_arg(node)
        .map(|s| s.to_string())
        .ok_or_else(|| FlowError::InvalidConfig(format!("{} には名前が必要です", node.name().value())))
}
