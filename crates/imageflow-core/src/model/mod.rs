//! モデル定義
//!
//! imageflowで扱うリソースモデルを定義します。
//! 各モデルはリソース種別ごとにモジュールに分離されています。

mod build;
mod builder;
mod buildpack;
mod image;
mod meta;
mod project;
mod source;

// Re-exports
pub use build::*;
pub use builder::*;
pub use buildpack::*;
pub use image::*;
pub use meta::*;
pub use project::*;
pub use source::*;

/// リソースの API グループ
pub const API_GROUP: &str = "build.imageflow.dev";

/// リソースの API バージョン
pub const API_VERSION: &str = "v1alpha1";
