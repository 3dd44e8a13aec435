//! Excel生成（共通ライブラリ）
//!
//! シート構成:
//! - Heatmap: 1行1クエリ、順位セルを区分色で塗る
//! - Summary: 集計・区分分布・分類別内訳
//! - Gaps: コンテンツギャップ一覧
//! - Brief: 分析依頼文

use crate::aggregate::GroupStats;
use crate::bucket::PositionBucket;
use crate::layout::{EXCEL_METRIC_COL_WIDTH, EXCEL_QUERY_COL_WIDTH, EXCEL_TAG_COL_WIDTH};
use crate::report::Report;
use rust_xlsxwriter::*;

fn xlsx_error(context: &'static str) -> impl Fn(XlsxError) -> String {
    move |e| format!("{}: {}", context, e)
}

/// Excelをバッファに生成
pub fn generate_excel_buffer(report: &Report, title: &str) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(0x1E293B))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0x475569));

    let title_format = Format::new().set_bold().set_font_size(14.0);

    write_heatmap_sheet(&mut workbook, report, title, &header_format, &title_format)?;
    write_summary_sheet(&mut workbook, report, &header_format, &title_format)?;
    write_gaps_sheet(&mut workbook, report, &header_format)?;
    write_brief_sheet(&mut workbook, report)?;

    workbook
        .save_to_buffer()
        .map_err(xlsx_error("Excel保存エラー"))
}

fn bucket_format(bucket: PositionBucket) -> Format {
    Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(bucket.rgb()))
        .set_align(FormatAlign::Center)
        .set_num_format("0.0")
}

fn write_heatmap_sheet(
    workbook: &mut Workbook,
    report: &Report,
    title: &str,
    header_format: &Format,
    title_format: &Format,
) -> Result<(), String> {
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Heatmap").map_err(xlsx_error("シート名設定エラー"))?;

    let widths = [
        EXCEL_QUERY_COL_WIDTH,
        EXCEL_TAG_COL_WIDTH,
        EXCEL_TAG_COL_WIDTH,
        EXCEL_TAG_COL_WIDTH,
        EXCEL_METRIC_COL_WIDTH,
        EXCEL_METRIC_COL_WIDTH,
        EXCEL_METRIC_COL_WIDTH,
        EXCEL_METRIC_COL_WIDTH,
        EXCEL_TAG_COL_WIDTH,
        EXCEL_QUERY_COL_WIDTH,
    ];
    for (col, width) in widths.iter().enumerate() {
        worksheet
            .set_column_width(col as u16, *width)
            .map_err(xlsx_error("列幅設定エラー"))?;
    }

    worksheet
        .write_string_with_format(0, 0, title, title_format)
        .map_err(xlsx_error("タイトル書き込みエラー"))?;

    let headers = [
        "Query", "Type", "Intent", "Format", "Position", "Clicks", "Impressions", "CTR", "Bucket",
        "Matched query",
    ];
    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string_with_format(2, col as u16, *header, header_format)
            .map_err(xlsx_error("ヘッダー書き込みエラー"))?;
    }
    worksheet.set_freeze_panes(3, 1).map_err(xlsx_error("ウィンドウ枠固定エラー"))?;

    for (i, record) in report.records.iter().enumerate() {
        let row = 3 + i as u32;
        let bucket = PositionBucket::classify(record.position);
        let cell_format = bucket_format(bucket);

        worksheet
            .write_string(row, 0, record.query.as_str())
            .and_then(|ws| ws.write_string(row, 1, record.category.as_str()))
            .and_then(|ws| ws.write_string(row, 2, record.intent.as_str()))
            .and_then(|ws| ws.write_string(row, 3, record.format.as_str()))
            .map_err(xlsx_error("クエリ書き込みエラー"))?;

        match record.position {
            Some(position) if !record.is_gap => {
                worksheet
                    .write_number_with_format(row, 4, position, &cell_format)
                    .and_then(|ws| ws.write_number(row, 5, record.clicks as f64))
                    .and_then(|ws| ws.write_number(row, 6, record.impressions as f64))
                    .and_then(|ws| ws.write_string(row, 7, record.ctr.as_str()))
                    .map_err(xlsx_error("順位書き込みエラー"))?;
            }
            _ => {
                worksheet
                    .write_string_with_format(row, 4, "GAP", &cell_format)
                    .and_then(|ws| ws.write_number(row, 5, 0))
                    .and_then(|ws| ws.write_number(row, 6, 0))
                    .and_then(|ws| ws.write_string(row, 7, record.ctr.as_str()))
                    .map_err(xlsx_error("ギャップ書き込みエラー"))?;
            }
        }

        worksheet
            .write_string(row, 8, bucket.id())
            .and_then(|ws| ws.write_string(row, 9, record.matched_query.as_deref().unwrap_or("")))
            .map_err(xlsx_error("区分書き込みエラー"))?;
    }

    Ok(())
}

fn write_summary_sheet(
    workbook: &mut Workbook,
    report: &Report,
    header_format: &Format,
    title_format: &Format,
) -> Result<(), String> {
    let summary = &report.summary;
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Summary").map_err(xlsx_error("シート名設定エラー"))?;
    worksheet
        .set_column_width(0, EXCEL_QUERY_COL_WIDTH / 2.0)
        .map_err(xlsx_error("列幅設定エラー"))?;

    let stats = [
        ("Queries analyzed", summary.total as f64),
        ("Ranking queries", summary.ranking as f64),
        ("Content gaps", summary.gaps as f64),
        ("In top 3", summary.top3 as f64),
        ("In top 10", summary.top10 as f64),
        ("Total clicks", summary.total_clicks as f64),
        ("Total impressions", summary.total_impressions as f64),
    ];

    worksheet
        .write_string_with_format(0, 0, "Overview", title_format)
        .map_err(xlsx_error("見出し書き込みエラー"))?;
    let mut row: u32 = 1;
    for (label, value) in stats {
        worksheet
            .write_string(row, 0, label)
            .and_then(|ws| ws.write_number(row, 1, value))
            .map_err(xlsx_error("集計書き込みエラー"))?;
        row += 1;
    }

    row += 1;
    worksheet
        .write_string_with_format(row, 0, "Position buckets", title_format)
        .map_err(xlsx_error("見出し書き込みエラー"))?;
    row += 1;
    for (bucket, count) in &summary.bucket_counts {
        worksheet
            .write_string_with_format(row, 0, bucket.label(), &bucket_format(*bucket))
            .and_then(|ws| ws.write_string(row, 1, bucket.id()))
            .and_then(|ws| ws.write_number(row, 2, *count as f64))
            .map_err(xlsx_error("区分分布書き込みエラー"))?;
        row += 1;
    }

    for (heading, groups) in [("By type", &report.by_category), ("By format", &report.by_format)] {
        row += 1;
        worksheet
            .write_string_with_format(row, 0, heading, title_format)
            .map_err(xlsx_error("見出し書き込みエラー"))?;
        row += 1;
        row = write_group_table(worksheet, row, groups, header_format)?;
    }

    Ok(())
}

/// 内訳表を書き込み、次の行番号を返す
fn write_group_table(
    worksheet: &mut Worksheet,
    start_row: u32,
    groups: &[GroupStats],
    header_format: &Format,
) -> Result<u32, String> {
    for (col, header) in ["Group", "Queries", "Ranking", "Gaps", "Avg position"].iter().enumerate() {
        worksheet
            .write_string_with_format(start_row, col as u16, *header, header_format)
            .map_err(xlsx_error("ヘッダー書き込みエラー"))?;
    }

    let mut row = start_row + 1;
    for group in groups {
        worksheet
            .write_string(row, 0, group.key.as_str())
            .and_then(|ws| ws.write_number(row, 1, group.total as f64))
            .and_then(|ws| ws.write_number(row, 2, group.ranking as f64))
            .and_then(|ws| ws.write_number(row, 3, group.gaps as f64))
            .map_err(xlsx_error("内訳書き込みエラー"))?;

        let written = match group.mean_position {
            Some(mean) => worksheet.write_number(row, 4, mean),
            None => worksheet.write_string(row, 4, "n/a"),
        };
        written.map_err(xlsx_error("平均順位書き込みエラー"))?;

        row += 1;
    }

    Ok(row)
}

fn write_gaps_sheet(
    workbook: &mut Workbook,
    report: &Report,
    header_format: &Format,
) -> Result<(), String> {
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Gaps").map_err(xlsx_error("シート名設定エラー"))?;
    worksheet
        .set_column_width(0, EXCEL_QUERY_COL_WIDTH)
        .map_err(xlsx_error("列幅設定エラー"))?;

    for (col, header) in ["Query", "Type", "Intent", "Format"].iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, header_format)
            .map_err(xlsx_error("ヘッダー書き込みエラー"))?;
    }

    for (i, gap) in report.gaps().enumerate() {
        let row = 1 + i as u32;
        worksheet
            .write_string(row, 0, gap.query.as_str())
            .and_then(|ws| ws.write_string(row, 1, gap.category.as_str()))
            .and_then(|ws| ws.write_string(row, 2, gap.intent.as_str()))
            .and_then(|ws| ws.write_string(row, 3, gap.format.as_str()))
            .map_err(xlsx_error("ギャップ書き込みエラー"))?;
    }

    Ok(())
}

fn write_brief_sheet(workbook: &mut Workbook, report: &Report) -> Result<(), String> {
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Brief").map_err(xlsx_error("シート名設定エラー"))?;
    worksheet
        .set_column_width(0, 120)
        .map_err(xlsx_error("列幅設定エラー"))?;

    // 1行1セル（セル内改行より貼り付けやすい）
    for (i, line) in report.brief.lines().enumerate() {
        worksheet
            .write_string(i as u32, 0, line)
            .map_err(xlsx_error("依頼文書き込みエラー"))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportOptions;
    use crate::types::{CandidateQuery, JoinedRecord, ObservedQuery};

    #[test]
    fn test_generate_excel_buffer() {
        let records = vec![
            JoinedRecord::matched(
                &CandidateQuery::with_tags("best running shoes", "related", "commercial", "listicle"),
                &ObservedQuery::new("best running shoes", 2.0, 10, 100),
            ),
            JoinedRecord::gap(&CandidateQuery::with_tags("trail shoes", "implicit", "info", "guide")),
        ];
        let report = Report::build(records, &ReportOptions::default());

        let buffer = generate_excel_buffer(&report, "Heatmap").expect("Excel生成失敗");
        // xlsxはZIP
        assert!(buffer.starts_with(b"PK"));
    }

    #[test]
    fn test_generate_excel_buffer_empty() {
        let report = Report::build(Vec::new(), &ReportOptions::default());
        assert!(generate_excel_buffer(&report, "Empty").is_ok());
    }
}
