use crate::error::{HeatmapError, Result};
use calamine::{open_workbook_auto, Reader};
use fanout_heatmap_common::Table;
use std::path::Path;

/// 先頭シートを文字列の表として読む
pub(super) fn read_first_sheet(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| HeatmapError::Spreadsheet(format!("{}: {}", path.display(), e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| HeatmapError::Spreadsheet(format!("シートがありません: {}", path.display())))?
        .map_err(|e| HeatmapError::Spreadsheet(format!("{}: {}", path.display(), e)))?;

    // 数値セルは表示形式のまま文字列化し、解釈は Table 側に任せる
    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect();

    Ok(Table::from_rows(rows))
}
