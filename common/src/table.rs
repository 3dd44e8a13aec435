//! 表データ読み込みモジュール
//!
//! CSV文字列（またはCLI側でスプレッドシートから変換した行）を
//! 列名付きの表として保持し、照合用の型へ変換する。
//! 必須列の欠落・数値の不正は照合前にエラーとする。

use crate::error::{Error, Result};
use crate::types::{CandidateQuery, ObservedQuery};

/// fan-out側の必須列
pub const CANDIDATE_QUERY: &str = "query";
pub const CANDIDATE_CATEGORY: &str = "type";
pub const CANDIDATE_INTENT: &str = "user_intent";
pub const CANDIDATE_FORMAT: &str = "routing_format";

/// Search Console側の必須列
pub const OBSERVED_QUERY: &str = "Top queries";
pub const OBSERVED_POSITION: &str = "Position";
pub const OBSERVED_CLICKS: &str = "Clicks";
pub const OBSERVED_IMPRESSIONS: &str = "Impressions";
pub const OBSERVED_CTR: &str = "CTR";

const CANDIDATE_TABLE: &str = "fan-out";
const OBSERVED_TABLE: &str = "search console";

/// ヘッダー行＋データ行
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// 変換済みの行から作成（先頭行がヘッダー）
    pub fn from_rows(mut rows: Vec<Vec<String>>) -> Self {
        // 空行は除外
        rows.retain(|row| row.iter().any(|cell| !cell.trim().is_empty()));
        if rows.is_empty() {
            return Self::default();
        }

        let headers = rows
            .remove(0)
            .into_iter()
            .map(|h| h.trim().to_string())
            .collect();
        Self { headers, rows }
    }

    /// CSV文字列から読み込み
    pub fn from_csv_str(content: &str) -> Result<Self> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        Ok(Self::from_rows(parse_csv_records(content)?))
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 列番号を取得（大文字小文字を区別）
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    fn require(&self, table: &'static str, column: &'static str) -> Result<usize> {
        self.column_index(column)
            .ok_or(Error::MissingColumn { table, column })
    }

    /// セル値（列が足りない行は空文字）
    fn cell(&self, row: usize, column: usize) -> &str {
        self.rows[row]
            .get(column)
            .map(|s| s.trim())
            .unwrap_or("")
    }

    /// fan-out表として解釈
    pub fn to_candidates(&self) -> Result<Vec<CandidateQuery>> {
        let query = self.require(CANDIDATE_TABLE, CANDIDATE_QUERY)?;
        let category = self.require(CANDIDATE_TABLE, CANDIDATE_CATEGORY)?;
        let intent = self.require(CANDIDATE_TABLE, CANDIDATE_INTENT)?;
        let format = self.require(CANDIDATE_TABLE, CANDIDATE_FORMAT)?;

        let mut candidates = Vec::with_capacity(self.rows.len());
        for row in 0..self.rows.len() {
            let text = self.cell(row, query);
            if text.is_empty() {
                return Err(Error::InvalidValue {
                    table: CANDIDATE_TABLE,
                    row: sheet_row(row),
                    column: CANDIDATE_QUERY,
                    value: String::new(),
                });
            }

            candidates.push(CandidateQuery::with_tags(
                text,
                self.cell(row, category),
                self.cell(row, intent),
                self.cell(row, format),
            ));
        }

        Ok(candidates)
    }

    /// Search Console表として解釈
    pub fn to_observed(&self) -> Result<Vec<ObservedQuery>> {
        let query = self.require(OBSERVED_TABLE, OBSERVED_QUERY)?;
        let position = self.require(OBSERVED_TABLE, OBSERVED_POSITION)?;
        let clicks = self.require(OBSERVED_TABLE, OBSERVED_CLICKS)?;
        let impressions = self.require(OBSERVED_TABLE, OBSERVED_IMPRESSIONS)?;
        let ctr = self.require(OBSERVED_TABLE, OBSERVED_CTR)?;

        let mut observed = Vec::with_capacity(self.rows.len());
        for row in 0..self.rows.len() {
            let invalid = |column: &'static str, value: &str| Error::InvalidValue {
                table: OBSERVED_TABLE,
                row: sheet_row(row),
                column,
                value: value.to_string(),
            };

            let raw_position = self.cell(row, position);
            let parsed_position = parse_position(raw_position)
                .ok_or_else(|| invalid(OBSERVED_POSITION, raw_position))?;

            let raw_clicks = self.cell(row, clicks);
            let parsed_clicks =
                parse_count(raw_clicks).ok_or_else(|| invalid(OBSERVED_CLICKS, raw_clicks))?;

            let raw_impressions = self.cell(row, impressions);
            let parsed_impressions = parse_count(raw_impressions)
                .ok_or_else(|| invalid(OBSERVED_IMPRESSIONS, raw_impressions))?;

            observed.push(ObservedQuery {
                text: self.cell(row, query).to_string(),
                position: parsed_position,
                clicks: parsed_clicks,
                impressions: parsed_impressions,
                ctr: self.cell(row, ctr).to_string(),
            });
        }

        Ok(observed)
    }
}

/// データ行番号→シート上の行番号（ヘッダーが1行目）
fn sheet_row(index: usize) -> usize {
    index + 2
}

/// 桁区切りを除去
fn strip_grouping(value: &str) -> String {
    value.trim().chars().filter(|c| *c != ',').collect()
}

/// 掲載順位（正の有限値のみ）
fn parse_position(value: &str) -> Option<f64> {
    let position: f64 = strip_grouping(value).parse().ok()?;
    (position.is_finite() && position > 0.0).then_some(position)
}

/// クリック数・表示回数（"12" / "1,234" / "12.0"）
fn parse_count(value: &str) -> Option<u64> {
    let cleaned = strip_grouping(value);
    if let Ok(count) = cleaned.parse::<u64>() {
        return Some(count);
    }

    // スプレッドシート由来の "12.0" を許容
    let float: f64 = cleaned.parse().ok()?;
    // u64 に収まらない値は飽和させず不正扱い
    let in_range = float.is_finite() && float >= 0.0 && float < u64::MAX as f64;
    (in_range && float.fract() == 0.0).then_some(float as u64)
}

/// CSVをレコード単位に分割（クォート・改行入りフィールド対応、列数の不揃いは許容）
fn parse_csv_records(content: &str) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = Vec::new();
    for record in reader.records() {
        records.push(record?.iter().map(str::to_string).collect());
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FANOUT_CSV: &str = "query,type,user_intent,routing_format,reasoning
best running shoes,related,commercial,listicle,\"popular, broad\"
running shoes for beginners,implicit,informational,guide,
";

    const GSC_CSV: &str = "Top queries,Clicks,Impressions,CTR,Position
best running shoes,10,100,10%,2
\"shoes, running\",\"1,234\",\"12,000\",10.28%,7.5
";

    #[test]
    fn test_parse_csv_records_quotes() {
        let records = parse_csv_records("a,\"b,c\",\"say \"\"hi\"\"\"\r\n1,2,3").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], vec!["a", "b,c", "say \"hi\""]);
        assert_eq!(records[1], vec!["1", "2", "3"]);
    }

    #[test]
    fn test_parse_csv_records_multiline_field() {
        let records = parse_csv_records("q,n\n\"line1\nline2\",1\n").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1][0], "line1\nline2");
    }

    #[test]
    fn test_from_csv_str_skips_bom_and_blank_lines() {
        let table = Table::from_csv_str("\u{feff}query,type\n\nfoo,bar\n\n").unwrap();
        assert_eq!(table.headers(), &["query".to_string(), "type".to_string()]);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_to_candidates() {
        let table = Table::from_csv_str(FANOUT_CSV).unwrap();
        let candidates = table.to_candidates().unwrap();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].text, "best running shoes");
        assert_eq!(candidates[0].category, "related");
        assert_eq!(candidates[1].intent, "informational");
        assert_eq!(candidates[1].format, "guide");
    }

    #[test]
    fn test_to_observed_with_grouping() {
        let table = Table::from_csv_str(GSC_CSV).unwrap();
        let observed = table.to_observed().unwrap();

        assert_eq!(observed.len(), 2);
        assert_eq!(observed[0].position, 2.0);
        assert_eq!(observed[1].text, "shoes, running");
        assert_eq!(observed[1].clicks, 1234);
        assert_eq!(observed[1].impressions, 12000);
        assert_eq!(observed[1].ctr, "10.28%");
    }

    #[test]
    fn test_missing_column_is_case_sensitive() {
        let table = Table::from_csv_str("top queries,Clicks,Impressions,CTR,Position\nfoo,1,2,3%,4\n").unwrap();
        let err = table.to_observed().unwrap_err();
        assert!(matches!(
            err,
            Error::MissingColumn { column: "Top queries", .. }
        ));
    }

    #[test]
    fn test_invalid_position_reports_sheet_row() {
        let table = Table::from_csv_str(
            "Top queries,Clicks,Impressions,CTR,Position\nfoo,1,2,3%,4\nbar,1,2,3%,n/a\n",
        )
        .unwrap();
        match table.to_observed().unwrap_err() {
            Error::InvalidValue { row, column, value, .. } => {
                assert_eq!(row, 3);
                assert_eq!(column, "Position");
                assert_eq!(value, "n/a");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_empty_candidate_query_rejected() {
        let table = Table::from_csv_str("query,type,user_intent,routing_format\n,related,x,y\n").unwrap();
        assert!(matches!(
            table.to_candidates().unwrap_err(),
            Error::InvalidValue { column: "query", row: 2, .. }
        ));
    }

    #[test]
    fn test_parse_count_variants() {
        assert_eq!(parse_count("12"), Some(12));
        assert_eq!(parse_count("1,234"), Some(1234));
        assert_eq!(parse_count("12.0"), Some(12));
        assert_eq!(parse_count("12.5"), None);
        assert_eq!(parse_count("-1"), None);
        assert_eq!(parse_count("1e30"), None);
        assert_eq!(parse_count("1e3"), Some(1000));
        assert_eq!(parse_count(""), None);
    }

    #[test]
    fn test_parse_position_rejects_non_positive() {
        assert_eq!(parse_position("3.25"), Some(3.25));
        assert_eq!(parse_position("0"), None);
        assert_eq!(parse_position("inf"), None);
    }

    #[test]
    fn test_inch_mark_inside_field_is_literal() {
        let table = Table::from_csv_str(
            "Top queries,Clicks,Impressions,CTR,Position\n12\" pizza stone,1,10,10%,3\nbest running shoes,2,20,10%,4\n",
        )
        .unwrap();
        let observed = table.to_observed().unwrap();

        assert_eq!(observed.len(), 2);
        assert_eq!(observed[0].text, "12\" pizza stone");
        assert_eq!(observed[0].position, 3.0);
        assert_eq!(observed[1].text, "best running shoes");
    }

    #[test]
    fn test_huge_count_is_invalid() {
        let table = Table::from_csv_str(
            "Top queries,Clicks,Impressions,CTR,Position\nfoo,1e30,10,1%,3\n",
        )
        .unwrap();
        assert!(matches!(
            table.to_observed().unwrap_err(),
            Error::InvalidValue { column: "Clicks", row: 2, .. }
        ));
    }

    #[test]
    fn test_ragged_rows_are_tolerated() {
        let table = Table::from_csv_str("query,type,user_intent,routing_format\nshoes,related\n").unwrap();
        let candidates = table.to_candidates().unwrap();
        assert_eq!(candidates[0].category, "related");
        assert_eq!(candidates[0].format, "");
    }
}
