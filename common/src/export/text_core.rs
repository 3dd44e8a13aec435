//! 端末表示用のテキスト表

use crate::bucket::PositionBucket;
use crate::layout::{truncate_label, TEXT_QUERY_COL_WIDTH};
use crate::report::{format_position, format_share, format_thousands, Report};
use std::fmt::Write;

/// 集計＋1行1クエリの固定幅表
pub fn render_table(report: &Report) -> String {
    let summary = &report.summary;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Ranking: {} ({})  Gaps: {} ({})  Top 3: {}  Top 10: {}  Clicks: {}",
        summary.ranking,
        format_share(summary.ranking_share()),
        summary.gaps,
        format_share(summary.gap_share()),
        summary.top3,
        summary.top10,
        format_thousands(summary.total_clicks),
    );
    let _ = writeln!(out);

    let query_width = TEXT_QUERY_COL_WIDTH;
    let _ = writeln!(
        out,
        "{:>4}  {:<query_width$}  {:<14}  {:>8}  {:<10}  {:>8}",
        "#", "Query", "Type", "Position", "Bucket", "Clicks",
    );
    let _ = writeln!(out, "{}", "-".repeat(query_width + 56));

    for (i, record) in report.records.iter().enumerate() {
        let bucket = PositionBucket::classify(record.position);
        let position = if record.is_gap {
            "GAP".to_string()
        } else {
            format_position(record.position)
        };

        let _ = writeln!(
            out,
            "{:>4}  {:<query_width$}  {:<14}  {:>8}  {:<10}  {:>8}",
            i + 1,
            truncate_label(&record.query, query_width),
            truncate_label(&record.category, 14),
            position,
            bucket.id(),
            format_thousands(record.clicks),
        );
    }

    out
}
