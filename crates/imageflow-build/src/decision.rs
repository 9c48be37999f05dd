//! ビルド要否の判定
//!
//! 直前のビルドとイメージの設定・ビルダーの状態を比較し、
//! 新しいビルドが必要かどうかを決める純粋関数群。

use imageflow_core::{Build, Builder, Image};
use std::fmt;

/// ビルドが必要な理由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildReason {
    /// 過去のビルドが存在しない
    FirstBuild,
    /// イメージタグまたはソースが直前のビルドと異なる
    ConfigChanged,
    /// 直前のビルドで使った Buildpack をビルダーが提供しなくなった
    BuildpacksChanged,
}

impl fmt::Display for BuildReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildReason::FirstBuild => write!(f, "no previous build"),
            BuildReason::ConfigChanged => write!(f, "image or source changed"),
            BuildReason::BuildpacksChanged => write!(f, "builder no longer provides used buildpacks"),
        }
    }
}

/// 新しいビルドが必要か
pub fn build_needed(image: &Image, last_build: Option<&Build>, builder: &Builder) -> bool {
    build_reason(image, last_build, builder).is_some()
}

/// ビルドが必要な理由を返す（不要なら None）
///
/// 設定の比較は正規化せず値の完全一致で行う。
/// Buildpack はビルドで使われたものがすべてビルダーに残っていれば一致とみなす
/// （ビルダー側が増えるだけなら再ビルドしない）。
pub fn build_reason(
    image: &Image,
    last_build: Option<&Build>,
    builder: &Builder,
) -> Option<BuildReason> {
    let Some(build) = last_build else {
        tracing::debug!(image = %image.name(), "No previous build");
        return Some(BuildReason::FirstBuild);
    };

    let reason = if !config_matches(image, build) {
        Some(BuildReason::ConfigChanged)
    } else if !built_with_builder_buildpacks(builder, build) {
        Some(BuildReason::BuildpacksChanged)
    } else {
        None
    };

    tracing::debug!(
        image = %image.name(),
        build_number = build.build_number(),
        reason = ?reason,
        "Evaluated build necessity"
    );

    reason
}

fn config_matches(image: &Image, build: &Build) -> bool {
    image.spec.image == build.spec.image && image.spec.source == build.spec.source
}

fn built_with_builder_buildpacks(builder: &Builder, build: &Build) -> bool {
    build
        .status
        .build_metadata
        .iter()
        .all(|bp| builder.status.builder_metadata.include(bp))
}
