//! 入力ファイルの読み込み
//!
//! 拡張子で CSV / スプレッドシートを振り分け、共通ライブラリの `Table` に揃える。

mod spreadsheet;

use crate::error::{HeatmapError, Result};
use fanout_heatmap_common::{CandidateQuery, ObservedQuery, Table};
use std::path::Path;

/// 対応する入力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Csv,
    Spreadsheet,
}

const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "ods"];

/// 拡張子から入力形式を判定
pub fn input_kind(path: &Path) -> Option<InputKind> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    if ext == "csv" {
        Some(InputKind::Csv)
    } else if SPREADSHEET_EXTENSIONS.contains(&ext.as_str()) {
        Some(InputKind::Spreadsheet)
    } else {
        None
    }
}

/// ファイルを表として読み込む（1行目がヘッダー）
pub fn load_table(path: &Path) -> Result<Table> {
    if !path.exists() {
        return Err(HeatmapError::FileNotFound(path.display().to_string()));
    }

    let table = match input_kind(path) {
        Some(InputKind::Csv) => {
            let content = std::fs::read_to_string(path)?;
            Table::from_csv_str(&content)?
        }
        Some(InputKind::Spreadsheet) => spreadsheet::read_first_sheet(path)?,
        None => return Err(HeatmapError::UnsupportedInput(path.display().to_string())),
    };

    tracing::debug!(
        path = %path.display(),
        rows = table.len(),
        columns = table.headers().len(),
        "table loaded"
    );
    Ok(table)
}

/// Query Fan-Out 表を読み込む
pub fn load_candidates(path: &Path) -> Result<Vec<CandidateQuery>> {
    let candidates = load_table(path)?.to_candidates()?;
    tracing::info!(count = candidates.len(), "candidate queries loaded");
    Ok(candidates)
}

/// Search Console 表を読み込む
pub fn load_observed(path: &Path) -> Result<Vec<ObservedQuery>> {
    let observed = load_table(path)?.to_observed()?;
    tracing::info!(count = observed.len(), "observed queries loaded");
    Ok(observed)
}
