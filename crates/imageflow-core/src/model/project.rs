//! プロジェクト定義
//!
//! 1つの `imageflow.kdl` に含まれるリソースの集合。

use super::build::Build;
use super::builder::Builder;
use super::image::Image;
use crate::error::{FlowError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// イメージ名 → Image
    pub images: BTreeMap<String, Image>,
    /// ビルダー名 → Builder
    pub builders: BTreeMap<String, Builder>,
    pub builds: Vec<Build>,
}

impl Project {
    pub fn image(&self, name: &str) -> Result<&Image> {
        self.images
            .get(name)
            .ok_or_else(|| FlowError::ImageNotFound(name.to_string()))
    }

    /// イメージが参照するビルダーを解決
    pub fn builder_for(&self, image: &Image) -> Result<&Builder> {
        self.builders
            .get(&image.spec.builder_ref)
            .ok_or_else(|| FlowError::BuilderNotFound {
                image: image.name().to_string(),
                builder: image.spec.builder_ref.clone(),
            })
    }

    /// イメージに紐づくビルドを取得
    ///
    /// 名前と名前空間を複製して比較するため、返り値は `image` の借用に依存しない。
    pub fn builds_for<'a>(&'a self, image: &Image) -> impl Iterator<Item = &'a Build> + use<'a> {
        let name = image.name().to_string();
        let namespace = image.namespace().to_string();
        self.builds.iter().filter(move |build| {
            build.image_name() == Some(name.as_str()) && build.metadata.namespace == namespace
        })
    }

    /// イメージの最新ビルド（ビルド番号が最大のもの）
    pub fn latest_build(&self, image: &Image) -> Option<&Build> {
        self.builds_for(image).max_by_key(|build| build.build_number())
    }
}
