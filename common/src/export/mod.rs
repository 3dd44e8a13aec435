//! Export core modules shared by the CLI.
//!
//! 各出力形式は `ReportBackend` を実装し、照合処理とは独立に差し替えられる。

pub mod csv_core;
pub mod html_core;
pub mod text_core;

#[cfg(feature = "excel")]
pub mod excel_core;

use crate::error::Result;
use crate::report::Report;

/// 出力形式の共通インターフェース
pub trait ReportBackend {
    /// 表示名
    fn name(&self) -> &'static str;
    /// 出力ファイルの拡張子
    fn extension(&self) -> &'static str;
    /// バイト列に描画
    fn render(&self, report: &Report) -> Result<Vec<u8>>;
}

/// 静的HTMLヒートマップ
#[derive(Debug, Clone)]
pub struct HtmlBackend {
    pub title: String,
    /// フッターに表示する生成日時
    pub generated_at: String,
}

impl ReportBackend for HtmlBackend {
    fn name(&self) -> &'static str {
        "HTML"
    }

    fn extension(&self) -> &'static str {
        "html"
    }

    fn render(&self, report: &Report) -> Result<Vec<u8>> {
        Ok(html_core::generate_html(report, &self.title, &self.generated_at).into_bytes())
    }
}

/// Excelブック
#[cfg(feature = "excel")]
#[derive(Debug, Clone)]
pub struct ExcelBackend {
    pub title: String,
}

#[cfg(feature = "excel")]
impl ReportBackend for ExcelBackend {
    fn name(&self) -> &'static str {
        "Excel"
    }

    fn extension(&self) -> &'static str {
        "xlsx"
    }

    fn render(&self, report: &Report) -> Result<Vec<u8>> {
        excel_core::generate_excel_buffer(report, &self.title)
            .map_err(crate::error::Error::Export)
    }
}

/// 端末向けの固定幅テキスト表
#[derive(Debug, Clone, Copy, Default)]
pub struct TextBackend;

impl ReportBackend for TextBackend {
    fn name(&self) -> &'static str {
        "Text"
    }

    fn extension(&self) -> &'static str {
        "txt"
    }

    fn render(&self, report: &Report) -> Result<Vec<u8>> {
        Ok(text_core::render_table(report).into_bytes())
    }
}

/// レポート全体のJSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBackend;

impl ReportBackend for JsonBackend {
    fn name(&self) -> &'static str {
        "JSON"
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn render(&self, report: &Report) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(report)?)
    }
}

/// コンテンツギャップ一覧のCSV
#[derive(Debug, Clone, Copy, Default)]
pub struct GapsCsvBackend;

impl ReportBackend for GapsCsvBackend {
    fn name(&self) -> &'static str {
        "Gaps CSV"
    }

    fn extension(&self) -> &'static str {
        "csv"
    }

    fn render(&self, report: &Report) -> Result<Vec<u8>> {
        csv_core::gaps_csv(&report.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportOptions;
    use crate::types::{CandidateQuery, JoinedRecord, ObservedQuery};

    fn sample_report() -> Report {
        let ranked = JoinedRecord::matched(
            &CandidateQuery::with_tags("best running shoes", "related", "commercial", "listicle"),
            &ObservedQuery::new("best running shoes", 2.0, 10, 100),
        );
        let gap = JoinedRecord::gap(&CandidateQuery::with_tags(
            "running shoes, wide feet",
            "implicit",
            "informational",
            "guide",
        ));
        Report::build(vec![ranked, gap], &ReportOptions::default())
    }

    #[test]
    fn test_backends_are_swappable() {
        let report = sample_report();
        let backends: Vec<Box<dyn ReportBackend>> = vec![
            Box::new(HtmlBackend {
                title: "Heatmap".to_string(),
                generated_at: "2026-01-01 00:00".to_string(),
            }),
            Box::new(TextBackend),
            Box::new(JsonBackend),
            Box::new(GapsCsvBackend),
        ];

        for backend in backends {
            let bytes = backend.render(&report).expect("描画失敗");
            assert!(!bytes.is_empty(), "{} が空", backend.name());
        }
    }

    #[test]
    fn test_json_backend_roundtrip() {
        let report = sample_report();
        let bytes = JsonBackend.render(&report).unwrap();
        let parsed: Report = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_extensions() {
        assert_eq!(TextBackend.extension(), "txt");
        assert_eq!(JsonBackend.extension(), "json");
        assert_eq!(GapsCsvBackend.extension(), "csv");
    }
}
