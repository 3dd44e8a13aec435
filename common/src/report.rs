//! 分析依頼文（AIアシスタント貼り付け用）の生成
//!
//! 入力が同じなら常に同じ文字列を返す。

use crate::aggregate::{by_category, by_format, GroupStats, Summary};
use crate::types::JoinedRecord;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// 生成オプション
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    /// 上位・下位として挙げる件数
    pub highlight_count: usize,
    /// 列挙するギャップの最大件数
    pub gap_preview_limit: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            highlight_count: 3,
            gap_preview_limit: 10,
        }
    }
}

/// 出力に渡す一式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub records: Vec<JoinedRecord>,
    pub summary: Summary,
    pub by_category: Vec<GroupStats>,
    pub by_format: Vec<GroupStats>,
    pub brief: String,
}

impl Report {
    pub fn build(records: Vec<JoinedRecord>, options: &ReportOptions) -> Self {
        let summary = Summary::from_records(&records);
        let by_category = by_category(&records);
        let by_format = by_format(&records);
        let brief = render_brief(&records, &summary, &by_category, &by_format, options);

        Self {
            records,
            summary,
            by_category,
            by_format,
            brief,
        }
    }

    pub fn gaps(&self) -> impl Iterator<Item = &JoinedRecord> {
        self.records.iter().filter(|r| r.is_gap)
    }
}

const CLOSING_REQUEST: &str = "Please analyze this data and provide:
1. Key patterns in performance
2. Priority content gaps to address
3. Strategic recommendations
4. 30-day action plan";

/// 分析依頼文を生成
pub fn render_brief(
    records: &[JoinedRecord],
    summary: &Summary,
    by_category: &[GroupStats],
    by_format: &[GroupStats],
    options: &ReportOptions,
) -> String {
    let mut out = String::new();

    // Stringへの書き込みは失敗しない
    let _ = writeln!(out, "I'm analyzing my query fan-out strategy. Here are the results:");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "OVERALL: {} queries analyzed, {} ranking ({}), {} gaps ({})",
        summary.total,
        summary.ranking,
        format_share(summary.ranking_share()),
        summary.gaps,
        format_share(summary.gap_share()),
    );
    let _ = writeln!(out, "TOP 3 POSITIONS: {} queries", summary.top3);
    let _ = writeln!(out, "TOP 10 POSITIONS: {} queries", summary.top10);
    let _ = writeln!(out, "TOTAL CLICKS: {}", format_thousands(summary.total_clicks));
    let _ = writeln!(out);

    let mut ranked: Vec<&JoinedRecord> = records
        .iter()
        .filter(|r| !r.is_gap && r.position.is_some())
        .collect();
    ranked.sort_by(|a, b| position_of(a).total_cmp(&position_of(b)));

    let _ = writeln!(out, "TOP PERFORMERS:");
    write_highlights(&mut out, ranked.iter().take(options.highlight_count).copied());
    let _ = writeln!(out);

    // 順位の悪い順（同順位は入力順を維持）
    let mut weakest = ranked.clone();
    weakest.sort_by(|a, b| position_of(b).total_cmp(&position_of(a)));

    let _ = writeln!(out, "WEAKEST RANKINGS:");
    write_highlights(&mut out, weakest.iter().take(options.highlight_count).copied());
    let _ = writeln!(out);

    let _ = writeln!(out, "BY CATEGORY:");
    write_groups(&mut out, by_category);
    let _ = writeln!(out);

    let _ = writeln!(out, "BY FORMAT:");
    write_groups(&mut out, by_format);
    let _ = writeln!(out);

    let _ = writeln!(out, "CONTENT GAPS: {} queries not ranking", summary.gaps);
    let gaps: Vec<&JoinedRecord> = records.iter().filter(|r| r.is_gap).collect();
    for gap in gaps.iter().take(options.gap_preview_limit) {
        let _ = writeln!(out, "- \"{}\" [{}]", gap.query, gap.category);
    }
    if gaps.len() > options.gap_preview_limit {
        let _ = writeln!(out, "+{} more", gaps.len() - options.gap_preview_limit);
    }
    let _ = writeln!(out);

    out.push_str(CLOSING_REQUEST);
    out
}

fn position_of(record: &JoinedRecord) -> f64 {
    record.position.unwrap_or(f64::INFINITY)
}

fn write_highlights<'a>(out: &mut String, records: impl Iterator<Item = &'a JoinedRecord>) {
    let mut written = 0;
    for (i, record) in records.enumerate() {
        let _ = writeln!(
            out,
            "{}. \"{}\" - Pos {} ({} clicks)",
            i + 1,
            record.query,
            format_position(record.position),
            format_thousands(record.clicks),
        );
        written += 1;
    }
    if written == 0 {
        let _ = writeln!(out, "(none)");
    }
}

fn write_groups(out: &mut String, groups: &[GroupStats]) {
    if groups.is_empty() {
        let _ = writeln!(out, "(none)");
        return;
    }

    for group in groups {
        let key = if group.key.is_empty() { "(blank)" } else { group.key.as_str() };
        let _ = writeln!(
            out,
            "- {}: {} queries, {} ranking, {} gaps, avg position {}",
            key,
            group.total,
            group.ranking,
            group.gaps,
            format_position(group.mean_position),
        );
    }
}

/// 順位表示（小数1桁、なしは "n/a"）
pub fn format_position(position: Option<f64>) -> String {
    match position {
        Some(p) => format!("{:.1}", p),
        None => "n/a".to_string(),
    }
}

/// 割合表示（"40.0%"、母数0は "n/a"）
pub fn format_share(share: Option<f64>) -> String {
    match share {
        Some(s) => format!("{:.1}%", s * 100.0),
        None => "n/a".to_string(),
    }
}

/// 3桁区切り（1234567 → "1,234,567"）
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CandidateQuery, ObservedQuery};

    fn ranking(query: &str, position: f64, clicks: u64) -> JoinedRecord {
        let candidate = CandidateQuery::with_tags(query, "related", "informational", "guide");
        JoinedRecord::matched(&candidate, &ObservedQuery::new(query, position, clicks, 100))
    }

    fn gap(query: &str) -> JoinedRecord {
        JoinedRecord::gap(&CandidateQuery::with_tags(query, "implicit", "commercial", "listicle"))
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_format_position_and_share() {
        assert_eq!(format_position(Some(2.0)), "2.0");
        assert_eq!(format_position(Some(7.46)), "7.5");
        assert_eq!(format_position(None), "n/a");
        assert_eq!(format_share(Some(0.4)), "40.0%");
        assert_eq!(format_share(None), "n/a");
    }

    #[test]
    fn test_brief_sections() {
        let records = vec![
            ranking("b", 12.0, 1),
            ranking("a", 1.5, 1500),
            gap("x"),
            ranking("c", 60.0, 0),
            ranking("d", 4.0, 7),
        ];
        let report = Report::build(records, &ReportOptions::default());
        let brief = &report.brief;

        assert!(brief.starts_with("I'm analyzing my query fan-out strategy."));
        assert!(brief.contains("OVERALL: 5 queries analyzed, 4 ranking (80.0%), 1 gaps (20.0%)"));
        assert!(brief.contains("TOTAL CLICKS: 1,508"));
        assert!(brief.contains(
            "TOP PERFORMERS:\n1. \"a\" - Pos 1.5 (1,500 clicks)\n2. \"d\" - Pos 4.0 (7 clicks)\n3. \"b\" - Pos 12.0 (1 clicks)\n"
        ));
        assert!(brief.contains(
            "WEAKEST RANKINGS:\n1. \"c\" - Pos 60.0 (0 clicks)\n2. \"b\" - Pos 12.0 (1 clicks)\n3. \"d\" - Pos 4.0 (7 clicks)\n"
        ));
        assert!(brief.contains("- related: 4 queries, 4 ranking, 0 gaps, avg position 19.4"));
        assert!(brief.contains("- implicit: 1 queries, 0 ranking, 1 gaps, avg position n/a"));
        assert!(brief.contains("CONTENT GAPS: 1 queries not ranking\n- \"x\" [implicit]\n"));
        assert!(brief.ends_with("4. 30-day action plan"));
    }

    #[test]
    fn test_gap_preview_limit_and_more_suffix() {
        let records: Vec<JoinedRecord> = (1..=13).map(|i| gap(&format!("gap {}", i))).collect();
        let report = Report::build(records, &ReportOptions::default());

        assert!(report.brief.contains("- \"gap 10\""));
        assert!(!report.brief.contains("- \"gap 11\""));
        assert!(report.brief.contains("+3 more"));
    }

    #[test]
    fn test_no_more_suffix_at_limit() {
        let records: Vec<JoinedRecord> = (1..=10).map(|i| gap(&format!("gap {}", i))).collect();
        let report = Report::build(records, &ReportOptions::default());
        assert!(!report.brief.contains(" more\n"));
    }

    #[test]
    fn test_empty_report() {
        let report = Report::build(Vec::new(), &ReportOptions::default());
        assert!(report.brief.contains("OVERALL: 0 queries analyzed, 0 ranking (n/a), 0 gaps (n/a)"));
        assert!(report.brief.contains("TOP PERFORMERS:\n(none)"));
        assert!(report.brief.contains("BY CATEGORY:\n(none)"));
    }

    #[test]
    fn test_brief_is_deterministic() {
        let build = || {
            Report::build(
                vec![ranking("a", 3.0, 1), ranking("b", 3.0, 2), gap("c")],
                &ReportOptions::default(),
            )
        };
        assert_eq!(build().brief, build().brief);
        // 同順位は入力順
        assert!(build().brief.contains("1. \"a\" - Pos 3.0"));
    }
}
