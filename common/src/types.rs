//! 照合対象の型定義
//!
//! CLIと各エクスポートで共有される型:
//! - CandidateQuery: fan-out側（照合元）の1行
//! - ObservedQuery: Search Console側（実績）の1行
//! - JoinedRecord: 照合結果（候補1件につき必ず1件）

use serde::{Deserialize, Serialize};

/// fan-out側のクエリ
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateQuery {
    pub text: String,
    /// `type` 列
    pub category: String,
    /// `user_intent` 列
    pub intent: String,
    /// `routing_format` 列
    pub format: String,
}

impl CandidateQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_tags(
        text: impl Into<String>,
        category: impl Into<String>,
        intent: impl Into<String>,
        format: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
            intent: intent.into(),
            format: format.into(),
        }
    }
}

/// Search Console側のクエリ（順位・クリック等の実績付き）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservedQuery {
    pub text: String,
    /// 平均掲載順位（1.0が最上位）
    pub position: f64,
    pub clicks: u64,
    pub impressions: u64,
    /// エクスポートされた表記のまま（例: "3.2%"）
    pub ctr: String,
}

impl ObservedQuery {
    pub fn new(text: impl Into<String>, position: f64, clicks: u64, impressions: u64) -> Self {
        Self {
            text: text.into(),
            position,
            clicks,
            impressions,
            ctr: String::new(),
        }
    }
}

/// 照合結果
///
/// 一致なしの場合は `is_gap = true`、順位なし、クリック・表示回数0。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JoinedRecord {
    pub query: String,
    pub category: String,
    pub intent: String,
    pub format: String,

    #[serde(default)]
    pub position: Option<f64>,

    #[serde(default)]
    pub clicks: u64,

    #[serde(default)]
    pub impressions: u64,

    #[serde(default)]
    pub ctr: String,

    /// 一致したSearch Console側のクエリ（原文）
    #[serde(default)]
    pub matched_query: Option<String>,

    #[serde(default)]
    pub is_gap: bool,
}

impl JoinedRecord {
    pub fn matched(candidate: &CandidateQuery, observed: &ObservedQuery) -> Self {
        Self {
            query: candidate.text.clone(),
            category: candidate.category.clone(),
            intent: candidate.intent.clone(),
            format: candidate.format.clone(),
            position: Some(observed.position),
            clicks: observed.clicks,
            impressions: observed.impressions,
            ctr: observed.ctr.clone(),
            matched_query: Some(observed.text.clone()),
            is_gap: false,
        }
    }

    pub fn gap(candidate: &CandidateQuery) -> Self {
        Self {
            query: candidate.text.clone(),
            category: candidate.category.clone(),
            intent: candidate.intent.clone(),
            format: candidate.format.clone(),
            position: None,
            clicks: 0,
            impressions: 0,
            ctr: "0%".to_string(),
            matched_query: None,
            is_gap: true,
        }
    }

    /// 順位あり（ギャップでない）
    pub fn is_ranking(&self) -> bool {
        !self.is_gap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gap_record_defaults() {
        let candidate = CandidateQuery::with_tags("best shoes", "related", "commercial", "listicle");
        let record = JoinedRecord::gap(&candidate);

        assert!(record.is_gap);
        assert!(!record.is_ranking());
        assert_eq!(record.position, None);
        assert_eq!(record.clicks, 0);
        assert_eq!(record.impressions, 0);
        assert_eq!(record.ctr, "0%");
        assert_eq!(record.category, "related");
    }

    #[test]
    fn test_matched_record_copies_metrics() {
        let candidate = CandidateQuery::new("best shoes");
        let mut observed = ObservedQuery::new("Best Shoes", 4.5, 12, 340);
        observed.ctr = "3.5%".to_string();

        let record = JoinedRecord::matched(&candidate, &observed);
        assert!(!record.is_gap);
        assert_eq!(record.query, "best shoes");
        assert_eq!(record.position, Some(4.5));
        assert_eq!(record.clicks, 12);
        assert_eq!(record.impressions, 340);
        assert_eq!(record.ctr, "3.5%");
        assert_eq!(record.matched_query.as_deref(), Some("Best Shoes"));
    }

    #[test]
    fn test_joined_record_serialize() {
        let record = JoinedRecord::gap(&CandidateQuery::new("trail running"));
        let json = serde_json::to_string(&record).expect("シリアライズ失敗");
        assert!(json.contains("\"query\":\"trail running\""));
        assert!(json.contains("\"position\":null"));
        assert!(json.contains("\"is_gap\":true"));
    }
}
