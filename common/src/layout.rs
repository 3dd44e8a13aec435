//! ヒートマップのレイアウト定数
//!
//! HTML・Excel・テキスト出力で共通の寸法と表示幅。

/// クエリ表示の最大文字数（超える場合は省略）
pub const QUERY_LABEL_MAX_CHARS: usize = 60;

/// ヒートマップ（HTML）のセル寸法（px）
pub const CELL_WIDTH_PX: u32 = 600;
pub const CELL_HEIGHT_PX: u32 = 35;
pub const LABEL_WIDTH_PX: u32 = 500;

/// Excel列幅（文字数単位）
pub const EXCEL_QUERY_COL_WIDTH: f64 = 60.0;
pub const EXCEL_TAG_COL_WIDTH: f64 = 16.0;
pub const EXCEL_METRIC_COL_WIDTH: f64 = 12.0;

/// テキスト表のクエリ列幅
pub const TEXT_QUERY_COL_WIDTH: usize = 48;

/// 長いクエリを `max_chars` 文字に収める（末尾 "..."）
pub fn truncate_label(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let keep = max_chars.saturating_sub(3);
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str("...");
    truncated
}
