use clap::{Parser, Subcommand};
use deepfake_detector_common::DetectionMethod;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "deepfake-detector")]
#[command(about = "Detect deepfakes: upload an image to the analysis service and show the verdict", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 解析APIのベースURL（環境変数・設定ファイルより優先）
    #[arg(long, global = true)]
    pub api_base_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像を解析して判定結果を表示
    Analyze {
        /// 画像ファイル (JPG/PNG/WEBP)
        #[arg(required = true)]
        image: PathBuf,

        /// 検出方式 (basic/advanced)。省略時は設定の既定値
        #[arg(short, long)]
        method: Option<DetectionMethod>,

        /// 結果をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// お問い合わせを送信（未指定の項目は対話入力）
    Contact {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        subject: Option<String>,

        #[arg(long)]
        message: Option<String>,
    },

    /// バックエンドの状態を確認
    Health,

    /// 設定を表示/編集
    Config {
        /// ベースURLを設定
        #[arg(long)]
        set_api_base_url: Option<String>,

        /// アップロード上限(MB)を設定
        #[arg(long)]
        set_max_upload_mb: Option<u64>,

        /// 既定の検出方式を設定
        #[arg(long)]
        set_method: Option<DetectionMethod>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
