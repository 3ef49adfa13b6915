use clap::{Parser, Subcommand};
use crate::ai_provider::AiProvider;
use omni_ocr_common::OcrStyle;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "omni-ocr")]
#[command(about = "Vision-model OCR: text, markdown, LaTeX, tables, JSON or descriptions from an image", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 推論バックエンド (ollama/gemini)
    #[arg(long, default_value = "ollama", global = true)]
    pub backend: AiProvider,

    /// エンドポイント（省略時はバックエンドの既定値）
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// モデル名（省略時はバックエンドの既定値）
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// リクエストのタイムアウト秒数
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像を認識してテキストを出力
    Recognize {
        /// 画像ファイルのパス（"-" で標準入力）
        #[arg(required = true)]
        image: PathBuf,

        /// 認識スタイル (text/markdown/latex/table/json/description)
        #[arg(short, long, default_value = "text")]
        style: OcrStyle,

        /// 出力ファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 認識スタイルの一覧を表示
    Styles {
        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 有効な設定を表示
    Config {
        /// JSONで出力（APIキーは含めない）
        #[arg(long)]
        json: bool,
    },
}
