use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlowError {
    #[error("KDLパースエラー: {0}")]
    KdlParse(#[from] kdl::KdlError),

    #[error("ファイル読み込みエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("無効な設定: {0}")]
    InvalidConfig(String),

    #[error("{kind} '{name}' が重複して定義されています")]
    DuplicateResource { kind: &'static str, name: String },

    #[error("イメージが見つかりません: {0}")]
    ImageNotFound(String),

    #[error("イメージ '{image}' が参照するビルダー '{builder}' が見つかりません")]
    BuilderNotFound { image: String, builder: String },

    #[error(
        "プロジェクトファイルが見つかりません\n探索開始位置: {0}\nヒント: imageflow.kdl を含むディレクトリで実行するか、IMAGEFLOW_PROJECT_PATH を設定してください"
    )]
    ProjectFileNotFound(PathBuf),
}

pub type Result<T> = std::result::Result<T, FlowError>;
