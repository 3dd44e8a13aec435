use clap::{Args, Parser, Subcommand};
use fanout_heatmap_common::Assistant;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fanout-heatmap")]
#[command(about = "Query Fan-Out × Search Console 掲載順位ヒートマップ生成ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// 入力ファイル（2つとも必須）
#[derive(Args, Clone, Debug)]
pub struct InputArgs {
    /// Query Fan-Out ファイル（csv/xlsx）
    #[arg(required = true)]
    pub fanout: PathBuf,

    /// Search Console「クエリ」エクスポート（csv/xlsx）
    #[arg(required = true)]
    pub gsc: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 照合してヒートマップを出力
    Report {
        #[command(flatten)]
        input: InputArgs,

        /// 出力形式 (html/excel/json/text/gaps/all)。省略時は設定値
        #[arg(short, long)]
        format: Option<ExportFormat>,

        /// 出力ファイル/ディレクトリ（デフォルト: カレント）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// タイトル（ファイル名にも使用）
        #[arg(short, long)]
        title: Option<String>,
    },

    /// AIアシスタント向けの分析依頼文を表示
    Prompt {
        #[command(flatten)]
        input: InputArgs,

        /// 貼り付け先 (chatgpt/claude/gemini/perplexity/grok)
        #[arg(short, long)]
        assistant: Option<Assistant>,

        /// 貼り付け先を対話的に選択
        #[arg(long, conflicts_with = "assistant")]
        pick: bool,

        /// 依頼文をファイルにも保存
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// コンテンツギャップ一覧をCSVで出力
    Gaps {
        #[command(flatten)]
        input: InputArgs,

        /// 出力CSV（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 単語一致率の閾値（0.0-1.0、これを超えると一致）
        #[arg(long)]
        min_similarity: Option<f64>,

        /// 文字数差の上限（これ未満で一致）
        #[arg(long)]
        max_length_delta: Option<usize>,

        /// 採用スコアの下限
        #[arg(long)]
        min_score: Option<f64>,

        /// 依頼文に列挙するギャップ件数
        #[arg(long)]
        gap_preview_limit: Option<usize>,

        /// 既定の出力形式
        #[arg(long)]
        default_format: Option<ExportFormat>,

        /// 既定値に戻す
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Html,
    Excel,
    Json,
    Text,
    Gaps,
    All,
}

impl ExportFormat {
    /// `All` を展開した個別形式
    pub fn expand(&self) -> Vec<ExportFormat> {
        match self {
            ExportFormat::All => vec![
                ExportFormat::Html,
                ExportFormat::Excel,
                ExportFormat::Json,
                ExportFormat::Gaps,
            ],
            other => vec![*other],
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(ExportFormat::Html),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "json" => Ok(ExportFormat::Json),
            "text" | "txt" => Ok(ExportFormat::Text),
            "gaps" | "csv" => Ok(ExportFormat::Gaps),
            "all" => Ok(ExportFormat::All),
            _ => Err(format!(
                "Unknown format: {}. Use html, excel, json, text, gaps, or all",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Html => write!(f, "html"),
            ExportFormat::Excel => write!(f, "excel"),
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Text => write!(f, "text"),
            ExportFormat::Gaps => write!(f, "gaps"),
            ExportFormat::All => write!(f, "all"),
        }
    }
}
