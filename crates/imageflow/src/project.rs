//! プロジェクトファイルの読み込み

use anyhow::Context;
use imageflow_core::Project;
use std::path::{Path, PathBuf};

/// imageflow.kdl を読み込む
///
/// パス指定がなければカレントディレクトリから上方向に探す。
pub fn load(path: Option<&Path>) -> anyhow::Result<(PathBuf, Project)> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => imageflow_core::find_project_file()
            .context("imageflow.kdl が見つかりません（--project で指定できます）")?,
    };

    let project = imageflow_core::parse_project_file(&path)
        .with_context(|| format!("{} の読み込みに失敗しました", path.display()))?;

    Ok((path, project))
}
