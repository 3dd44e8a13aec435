//! 静的HTMLヒートマップの生成
//!
//! 外部スクリプトに依存しない1ファイルのページを組み立てる。
//! ツールチップは `title` 属性で表示する。

use crate::assistant::Assistant;
use crate::bucket::PositionBucket;
use crate::layout::{truncate_label, CELL_HEIGHT_PX, CELL_WIDTH_PX, LABEL_WIDTH_PX, QUERY_LABEL_MAX_CHARS};
use crate::report::{format_position, format_thousands, Report};
use crate::types::JoinedRecord;
use std::fmt::Write;

const STYLE: &str = r#"
body { margin: 0; padding: 20px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background: #0f172a; color: #f8fafc; }
h1 { font-size: 24px; margin: 0 0 20px; }
.stats-grid { display: grid; grid-template-columns: repeat(5, 1fr); gap: 15px; margin-bottom: 30px; }
.stat-card { background: #1e293b; border-radius: 8px; padding: 20px; border-left: 4px solid #3b82f6; }
.stat-value { font-size: 32px; font-weight: bold; margin-bottom: 5px; }
.stat-label { color: #94a3b8; font-size: 14px; }
.legend { background: #1e293b; border-radius: 8px; padding: 20px; margin-bottom: 30px; display: flex; flex-wrap: wrap; gap: 12px; }
.legend-item { display: flex; align-items: center; gap: 6px; font-size: 12px; color: #94a3b8; }
.swatch { width: 18px; height: 18px; border-radius: 4px; display: inline-block; }
.heatmap { background: #1e293b; border-radius: 12px; padding: 30px; overflow-x: auto; margin-bottom: 30px; }
.row { display: flex; align-items: center; margin-bottom: 2px; }
.label { text-align: right; padding-right: 10px; flex-shrink: 0; }
.query-label { font-size: 13px; color: #e2e8f0; }
.type-label { font-size: 11px; color: #94a3b8; }
.cell { border-radius: 6px; color: #fff; font-weight: bold; text-align: center; display: flex; flex-direction: column; justify-content: center; }
.cell .metrics { font-size: 11px; font-weight: normal; opacity: 0.9; }
.gap { opacity: 0.7; font-size: 16px; }
.ai-section { background: linear-gradient(135deg, #1e293b, #0f172a); border-radius: 12px; padding: 25px; margin-bottom: 30px; border: 2px solid #3b82f6; }
.prompt-box { background: #1e293b; border: 1px solid #475569; border-radius: 6px; padding: 15px; color: #cbd5e1; font-size: 13px; white-space: pre-wrap; font-family: monospace; }
.ai-links a { color: #93c5fd; margin-right: 15px; }
footer { color: #64748b; font-size: 12px; }
"#;

/// ヒートマップページを生成
pub fn generate_html(report: &Report, title: &str, generated_at: &str) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "<!DOCTYPE html>");
    let _ = writeln!(out, "<html lang=\"en\">");
    let _ = writeln!(out, "<head>");
    let _ = writeln!(out, "<meta charset=\"utf-8\">");
    let _ = writeln!(out, "<title>{}</title>", escape_html(title));
    let _ = writeln!(out, "<style>{}</style>", STYLE);
    let _ = writeln!(out, "</head>");
    let _ = writeln!(out, "<body>");
    let _ = writeln!(out, "<h1>{}</h1>", escape_html(title));

    write_stats(&mut out, report);
    write_legend(&mut out);
    write_brief(&mut out, &report.brief);
    write_heatmap(&mut out, &report.records);

    let _ = writeln!(out, "<footer>Generated {}</footer>", escape_html(generated_at));
    let _ = writeln!(out, "</body>");
    let _ = writeln!(out, "</html>");
    out
}

fn write_stats(out: &mut String, report: &Report) {
    let summary = &report.summary;
    let cards = [
        (summary.ranking.to_string(), "Ranking Queries", "#10b981"),
        (summary.gaps.to_string(), "Content Gaps", "#ef4444"),
        (summary.top3.to_string(), "In Top 3", "#10b981"),
        (summary.top10.to_string(), "In Top 10", "#3b82f6"),
        (format_thousands(summary.total_clicks), "Total Clicks", "#f59e0b"),
    ];

    let _ = writeln!(out, "<div class=\"stats-grid\">");
    for (value, label, color) in cards {
        let _ = writeln!(
            out,
            "<div class=\"stat-card\" style=\"border-left-color: {color};\"><div class=\"stat-value\" style=\"color: {color};\">{value}</div><div class=\"stat-label\">{label}</div></div>"
        );
    }
    let _ = writeln!(out, "</div>");
}

fn write_legend(out: &mut String) {
    let _ = writeln!(out, "<div class=\"legend\">");
    // 順位の良い順、順位なしは最後
    let buckets = PositionBucket::ALL
        .iter()
        .filter(|b| **b != PositionBucket::NoRank)
        .chain(std::iter::once(&PositionBucket::NoRank));
    for bucket in buckets {
        let _ = writeln!(
            out,
            "<span class=\"legend-item\"><span class=\"swatch\" style=\"background: {};\"></span>{}</span>",
            bucket.hex(),
            bucket.label()
        );
    }
    let _ = writeln!(out, "</div>");
}

fn write_brief(out: &mut String, brief: &str) {
    let _ = writeln!(out, "<div class=\"ai-section\">");
    let _ = writeln!(out, "<h3>AI-Powered Insights</h3>");
    let _ = writeln!(out, "<div class=\"prompt-box\">{}</div>", escape_html(brief));
    let _ = write!(out, "<p class=\"ai-links\">Paste into: ");
    for assistant in Assistant::ALL {
        let _ = write!(
            out,
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>",
            assistant.url(),
            assistant.name()
        );
    }
    let _ = writeln!(out, "</p>");
    let _ = writeln!(out, "</div>");
}

fn write_heatmap(out: &mut String, records: &[JoinedRecord]) {
    let _ = writeln!(out, "<div class=\"heatmap\">");
    for record in records {
        let bucket = PositionBucket::classify(record.position);
        let _ = writeln!(
            out,
            "<div class=\"row\" data-bucket=\"{}\"><div class=\"label\" style=\"width: {}px;\"><div class=\"query-label\">{}</div><div class=\"type-label\">[{}]</div></div>",
            bucket.id(),
            LABEL_WIDTH_PX,
            escape_html(&truncate_label(&record.query, QUERY_LABEL_MAX_CHARS)),
            escape_html(&record.category),
        );

        let _ = write!(
            out,
            "<div class=\"cell\" title=\"{}\" style=\"width: {}px; height: {}px; background: {};\">",
            escape_html(&tooltip(record)),
            CELL_WIDTH_PX - 2,
            CELL_HEIGHT_PX - 2,
            bucket.hex(),
        );
        if record.is_gap {
            let _ = write!(out, "<span class=\"gap\">CONTENT GAP - NOT RANKING</span>");
        } else {
            let _ = write!(
                out,
                "<span>Position: {}</span><span class=\"metrics\">{} clicks | {} impressions</span>",
                format_position(record.position),
                format_thousands(record.clicks),
                format_thousands(record.impressions),
            );
        }
        let _ = writeln!(out, "</div></div>");
    }
    let _ = writeln!(out, "</div>");
}

/// ツールチップ文言
fn tooltip(record: &JoinedRecord) -> String {
    if record.is_gap {
        format!("{}\nStatus: CONTENT GAP", record.query)
    } else {
        format!(
            "{}\nPosition: {}\nClicks: {}",
            record.query,
            format_position(record.position),
            record.clicks
        )
    }
}

/// HTML特殊文字のエスケープ
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportOptions;
    use crate::types::{CandidateQuery, ObservedQuery};

    fn sample_report() -> Report {
        let records = vec![
            JoinedRecord::matched(
                &CandidateQuery::with_tags("best running shoes", "related", "commercial", "listicle"),
                &ObservedQuery::new("best running shoes", 2.0, 1500, 25000),
            ),
            JoinedRecord::gap(&CandidateQuery::with_tags(
                "<script>alert(1)</script>",
                "implicit",
                "informational",
                "guide",
            )),
        ];
        Report::build(records, &ReportOptions::default())
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
    }

    #[test]
    fn test_generate_html_structure() {
        let html = generate_html(&sample_report(), "Fan-Out Heatmap", "2026-01-01 09:00");

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Fan-Out Heatmap</title>"));
        assert_eq!(html.matches("class=\"stat-card\"").count(), 5);
        assert!(html.contains("Position: 2.0"));
        assert!(html.contains("1,500 clicks | 25,000 impressions"));
        assert!(html.contains("CONTENT GAP - NOT RANKING"));
        assert!(html.contains("background: #10b981;"));
        assert!(html.contains("data-bucket=\"no-rank\""));
        assert!(html.contains("https://claude.ai/"));
        assert!(html.contains("Generated 2026-01-01 09:00"));
    }

    #[test]
    fn test_generate_html_escapes_queries() {
        let html = generate_html(&sample_report(), "t", "now");
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn test_legend_lists_every_bucket() {
        let html = generate_html(&sample_report(), "t", "now");
        for bucket in PositionBucket::ALL {
            assert!(html.contains(bucket.label()), "{}", bucket);
        }
    }

    #[test]
    fn test_tooltip() {
        let report = sample_report();
        assert_eq!(tooltip(&report.records[0]), "best running shoes\nPosition: 2.0\nClicks: 1500");
        assert!(tooltip(&report.records[1]).ends_with("Status: CONTENT GAP"));
    }
}
