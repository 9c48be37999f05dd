//! ビルド定義

use super::buildpack::BuildpackMetadataList;
use super::meta::ObjectMeta;
use super::source::SourceConfig;
use serde::{Deserialize, Serialize};

/// ビルド番号ラベル
pub const BUILD_NUMBER_LABEL: &str = "image.build.imageflow.dev/buildNumber";

/// 所有イメージ名ラベル
pub const IMAGE_LABEL: &str = "image.build.imageflow.dev/image";

/// ビルド
///
/// KDL形式：
/// ```kdl
/// build "my-app-build-3-x9k2q" namespace="default" image="my-app" {
///     number 3
///     tag "registry.example.com/team/my-app"
///     builder "registry.example.com/builder:base"
///     service-account "builder"
///     source {
///         git url="https://github.com/org/app" revision="main"
///     }
///     buildpack "io.buildpacks.java" version="1.0"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Build {
    pub metadata: ObjectMeta,
    pub spec: BuildSpec,
    #[serde(default)]
    pub status: BuildStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildSpec {
    pub build_number: u64,
    /// 出力先のイメージタグ
    pub image: String,
    /// ビルダーイメージ
    pub builder: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_account: Option<String>,
    pub source: SourceConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildStatus {
    /// このビルドで実際に使われた Buildpack
    #[serde(default)]
    pub build_metadata: BuildpackMetadataList,
}

impl Build {
    pub fn build_number(&self) -> u64 {
        self.spec.build_number
    }

    /// 所有イメージ名（ラベルから取得）
    pub fn image_name(&self) -> Option<&str> {
        self.metadata.label(IMAGE_LABEL)
    }
}
