use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("設定ディレクトリが見つかりません")]
    ConfigDirNotFound,

    #[error(
        "シークレットファイルが見つかりません。以下の場所を確認してください:\n\
        - カレントディレクトリ: secrets.local.kdl, secrets.kdl\n\
        - ./.imageflow/ ディレクトリ\n\
        - ~/.config/imageflow/secrets.kdl\n\
        または IMAGEFLOW_SECRETS_PATH 環境変数で直接指定できます"
    )]
    SecretsFileNotFound,

    #[error("IO エラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
