//! イメージ定義

use super::meta::{GroupVersionKind, ObjectMeta, OwnerRefable};
use super::source::SourceConfig;
use super::{API_GROUP, API_VERSION};
use serde::{Deserialize, Serialize};

/// ビルド対象のイメージ
///
/// KDL形式：
/// ```kdl
/// image "my-app" namespace="default" {
///     tag "registry.example.com/team/my-app"
///     service-account "builder"
///     builder "base"
///     source {
///         git url="https://github.com/org/app" revision="main"
///     }
///     build-counter 3
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub metadata: ObjectMeta,
    pub spec: ImageSpec,
    #[serde(default)]
    pub status: ImageStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSpec {
    /// 出力先のイメージタグ
    pub image: String,
    /// 使用するビルダー名
    pub builder_ref: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_account: Option<String>,
    pub source: SourceConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageStatus {
    /// これまでに生成したビルドの数
    ///
    /// 永続化とインクリメントはリコンサイラの責務。
    #[serde(default)]
    pub build_counter: u64,
}

impl Image {
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn namespace(&self) -> &str {
        &self.metadata.namespace
    }
}

impl OwnerRefable for Image {
    fn object_meta(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn group_version_kind(&self) -> GroupVersionKind {
        GroupVersionKind {
            group: API_GROUP,
            version: API_VERSION,
            kind: "Image",
        }
    }
}
