//! ビルダー定義

use super::buildpack::BuildpackMetadataList;
use super::meta::ObjectMeta;
use serde::{Deserialize, Serialize};

/// ビルダー
///
/// KDL形式：
/// ```kdl
/// builder "base" {
///     image "registry.example.com/builder:base"
///     buildpack "io.buildpacks.java" version="1.0"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Builder {
    pub metadata: ObjectMeta,
    pub spec: BuilderSpec,
    #[serde(default)]
    pub status: BuilderStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderSpec {
    /// ビルダーイメージ
    pub image: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderStatus {
    /// ビルダーが現在提供している Buildpack
    #[serde(default)]
    pub builder_metadata: BuildpackMetadataList,
}

impl Builder {
    pub fn name(&self) -> &str {
        &self.metadata.name
    }
}
