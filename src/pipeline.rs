//! 読み込み → 照合 → 集計の一連処理

use crate::config::Config;
use crate::error::Result;
use crate::loader;
use fanout_heatmap_common::{CandidateQuery, JoinedRecord, MatchPolicy, Matcher, ObservedQuery, Report};
use rayon::prelude::*;
use std::path::Path;

/// 候補ごとに並列照合（順序は候補の入力順を維持）
pub fn join_tables(
    candidates: &[CandidateQuery],
    observed: &[ObservedQuery],
    policy: &MatchPolicy,
) -> Vec<JoinedRecord> {
    let matcher = Matcher::new(observed, *policy);
    candidates
        .par_iter()
        .map(|candidate| matcher.match_one(candidate))
        .collect()
}

/// 2ファイルからレポート一式を組み立てる
pub fn build_report(fanout: &Path, gsc: &Path, config: &Config) -> Result<Report> {
    let candidates = loader::load_candidates(fanout)?;
    let observed = loader::load_observed(gsc)?;
    let records = join_tables(&candidates, &observed, &config.policy);
    Ok(Report::build(records, &config.report))
}
