use thiserror::Error;

#[derive(Error, Debug)]
pub enum HeatmapError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("未対応の入力形式です（csv/xlsx/xlsm/xls/odsのみ）: {0}")]
    UnsupportedInput(String),

    #[error("スプレッドシート読み込みエラー: {0}")]
    Spreadsheet(String),

    #[error("出力エラー: {0}")]
    Export(String),

    #[error("対話入力エラー: {0}")]
    Interactive(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] fanout_heatmap_common::Error),
}

pub type Result<T> = std::result::Result<T, HeatmapError>;
