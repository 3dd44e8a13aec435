//! 集計モジュール
//!
//! 照合結果から件数・クリック数・区分分布、分類別の内訳を求める。

use crate::bucket::PositionBucket;
use crate::types::JoinedRecord;
use serde::{Deserialize, Serialize};

/// 全体集計
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    /// 順位ありの件数
    pub ranking: usize,
    /// ギャップ（順位なし）の件数
    pub gaps: usize,
    /// 3位以内
    pub top3: usize,
    /// 10位以内
    pub top10: usize,
    pub total_clicks: u64,
    pub total_impressions: u64,
    /// 区分ごとの件数（`PositionBucket::ALL` の順、0件も含む）
    pub bucket_counts: Vec<(PositionBucket, usize)>,
}

impl Summary {
    pub fn from_records(records: &[JoinedRecord]) -> Self {
        let mut summary = Summary {
            total: records.len(),
            bucket_counts: PositionBucket::ALL.iter().map(|b| (*b, 0)).collect(),
            ..Default::default()
        };

        for record in records {
            let bucket = PositionBucket::classify(record.position);
            summary.bucket_counts[bucket.index()].1 += 1;

            if record.is_gap {
                summary.gaps += 1;
                continue;
            }

            summary.ranking += 1;
            summary.total_clicks += record.clicks;
            summary.total_impressions += record.impressions;

            if let Some(position) = record.position {
                if position <= 3.0 {
                    summary.top3 += 1;
                }
                if position <= 10.0 {
                    summary.top10 += 1;
                }
            }
        }

        summary
    }

    /// 区分の件数
    pub fn bucket_count(&self, bucket: PositionBucket) -> usize {
        self.bucket_counts
            .iter()
            .find(|(b, _)| *b == bucket)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// 順位ありの割合（0件なら None）
    pub fn ranking_share(&self) -> Option<f64> {
        share(self.ranking, self.total)
    }

    /// ギャップの割合（0件なら None）
    pub fn gap_share(&self) -> Option<f64> {
        share(self.gaps, self.total)
    }
}

fn share(part: usize, total: usize) -> Option<f64> {
    (total > 0).then(|| part as f64 / total as f64)
}

/// 分類別の内訳
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupStats {
    pub key: String,
    pub total: usize,
    pub ranking: usize,
    pub gaps: usize,
    /// 順位ありの平均順位（順位ありが0件なら None）
    pub mean_position: Option<f64>,
}

/// キーごとに集計（初出順）
pub fn group_by<F>(records: &[JoinedRecord], key: F) -> Vec<GroupStats>
where
    F: Fn(&JoinedRecord) -> &str,
{
    let mut groups: Vec<GroupStats> = Vec::new();
    let mut position_sums: Vec<f64> = Vec::new();

    for record in records {
        let name = key(record);
        let index = match groups.iter().position(|g| g.key == name) {
            Some(index) => index,
            None => {
                groups.push(GroupStats {
                    key: name.to_string(),
                    total: 0,
                    ranking: 0,
                    gaps: 0,
                    mean_position: None,
                });
                position_sums.push(0.0);
                groups.len() - 1
            }
        };

        let group = &mut groups[index];
        group.total += 1;

        match record.position {
            Some(position) if !record.is_gap => {
                group.ranking += 1;
                position_sums[index] += position;
            }
            _ => group.gaps += 1,
        }
    }

    for (group, sum) in groups.iter_mut().zip(position_sums) {
        group.mean_position = (group.ranking > 0).then(|| sum / group.ranking as f64);
    }

    groups
}

/// `type` 列ごとの内訳
pub fn by_category(records: &[JoinedRecord]) -> Vec<GroupStats> {
    group_by(records, |r| r.category.as_str())
}

/// `routing_format` 列ごとの内訳
pub fn by_format(records: &[JoinedRecord]) -> Vec<GroupStats> {
    group_by(records, |r| r.format.as_str())
}

/// `user_intent` 列ごとの内訳
pub fn by_intent(records: &[JoinedRecord]) -> Vec<GroupStats> {
    group_by(records, |r| r.intent.as_str())
}
