mod commands;
mod project;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "imageflow")]
#[command(about = "イメージの再ビルド判定とレジストリ認証を、KDL ひとつで。", long_about = None)]
struct Cli {
    /// imageflow.kdl のパス（省略時は自動検出）
    #[arg(long, global = true, env = "IMAGEFLOW_PROJECT_PATH")]
    project: Option<PathBuf>,

    /// secrets.kdl のパス（省略時は自動検出）
    #[arg(long, global = true, env = "IMAGEFLOW_SECRETS_PATH")]
    secrets: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// イメージの再ビルドが必要か判定
    Check {
        /// イメージ名（imageflow.kdl の image ノード名）
        image: String,
    },
    /// 次の Build を生成して表示
    NextBuild {
        /// イメージ名（imageflow.kdl の image ノード名）
        image: String,
        /// 出力形式
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// レジストリの認証情報を解決して Authorization ヘッダを表示
    Auth {
        /// イメージ参照（例: ghcr.io/org/app:v1）
        image: String,
        /// 名前空間
        #[arg(short, long, default_value = "default")]
        namespace: String,
        /// pull secret 名
        #[arg(short, long)]
        secret: Option<String>,
        /// サービスアカウント名（--secret と併用）
        #[arg(long)]
        service_account: Option<String>,
        /// 接続先レジストリ（省略時はイメージ参照から判定）
        #[arg(short, long)]
        registry: Option<String>,
    },
    /// バージョン情報を表示
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // ログは stderr に出力（stdout はコマンド出力専用）
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match cli.command {
        Commands::Check { image } => commands::check::handle(cli.project.as_deref(), &image),
        Commands::NextBuild { image, format } => {
            commands::next_build::handle(cli.project.as_deref(), &image, format)
        }
        Commands::Auth {
            image,
            namespace,
            secret,
            service_account,
            registry,
        } => commands::auth::handle(
            cli.secrets.as_deref(),
            commands::auth::AuthArgs {
                image,
                namespace,
                secret,
                service_account,
                registry,
            },
        ),
        Commands::Version => {
            println!("imageflow {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
