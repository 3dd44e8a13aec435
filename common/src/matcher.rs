//! クエリ照合モジュール
//!
//! fan-out側の各クエリについて、Search Console側から最も近いクエリを1件選ぶ。
//!
//! ## 判定
//! 1. 小文字化・前後空白除去後に完全一致 → スコア100
//! 2. それ以外はスペース区切りの単語一致率で判定
//!    - 一致率 = 一致単語数 / max(候補単語数, 実績単語数)
//!    - 一致率 > 0.7 かつ 文字数差 < 20 → スコア = 一致率 × 90
//! 3. スコア > 50 の中で最大のものを採用（同点は先勝ち）
//!
//! 実績側の行は複数の候補に使われてもよい。

use crate::types::{CandidateQuery, JoinedRecord, ObservedQuery};
use serde::{Deserialize, Serialize};

/// 照合の閾値
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchPolicy {
    /// 単語一致率の下限（これを超える必要あり）
    pub min_similarity: f64,
    /// 文字数差の上限（これ未満が必要）
    pub max_length_delta: usize,
    /// あいまい一致時の係数
    pub fuzzy_weight: f64,
    /// 完全一致時のスコア
    pub exact_score: f64,
    /// 採用スコアの下限（これを超える必要あり）
    pub min_score: f64,
    /// 一致判定に使う単語の最小文字数（これを超える必要あり）
    pub min_token_chars: usize,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            min_similarity: 0.7,
            max_length_delta: 20,
            fuzzy_weight: 90.0,
            exact_score: 100.0,
            min_score: 50.0,
            min_token_chars: 2,
        }
    }
}

impl MatchPolicy {
    /// あいまい一致のスコア（閾値を満たさなければ None）
    pub fn fuzzy_score(&self, similarity: f64, length_delta: usize) -> Option<f64> {
        (similarity > self.min_similarity && length_delta < self.max_length_delta)
            .then(|| similarity * self.fuzzy_weight)
    }
}

/// 比較用に正規化（小文字化・前後空白除去）
pub fn normalize_query(text: &str) -> String {
    text.trim().to_lowercase()
}

/// 単語一致率
///
/// 候補側の単語のうち `min_token_chars` 文字を超えるものが実績側に含まれる数を、
/// 両者の単語数の大きい方で割る。分母が0なら0。
pub fn token_similarity(candidate: &str, observed: &str, min_token_chars: usize) -> f64 {
    let candidate_tokens: Vec<&str> = candidate.split(' ').collect();
    let observed_tokens: Vec<&str> = observed.split(' ').collect();

    let denominator = candidate_tokens.len().max(observed_tokens.len());
    if denominator == 0 {
        return 0.0;
    }

    let matching = candidate_tokens
        .iter()
        // 文字数はUnicodeスカラー値で数える（UTF-16単位ではないため絵文字等は1文字）
        .filter(|token| token.chars().count() > min_token_chars)
        .filter(|token| observed_tokens.contains(*token))
        .count();

    matching as f64 / denominator as f64
}

/// 正規化済みの2文字列のスコア
pub fn score(candidate: &str, observed: &str, policy: &MatchPolicy) -> f64 {
    if candidate == observed {
        return policy.exact_score;
    }

    let similarity = token_similarity(candidate, observed, policy.min_token_chars);
    let length_delta = candidate.chars().count().abs_diff(observed.chars().count());

    policy.fuzzy_score(similarity, length_delta).unwrap_or(0.0)
}

/// 実績側を正規化済みで保持する照合器
#[derive(Debug, Clone)]
pub struct Matcher<'a> {
    observed: &'a [ObservedQuery],
    normalized: Vec<String>,
    policy: MatchPolicy,
}

impl<'a> Matcher<'a> {
    pub fn new(observed: &'a [ObservedQuery], policy: MatchPolicy) -> Self {
        let normalized = observed.iter().map(|o| normalize_query(&o.text)).collect();
        Self {
            observed,
            normalized,
            policy,
        }
    }

    /// 最良の一致（実績側のインデックスとスコア）
    pub fn best_match(&self, candidate: &CandidateQuery) -> Option<(usize, f64)> {
        let needle = normalize_query(&candidate.text);
        let mut best: Option<(usize, f64)> = None;

        for (index, haystack) in self.normalized.iter().enumerate() {
            let current = score(&needle, haystack, &self.policy);
            let best_score = best.map(|(_, s)| s).unwrap_or(0.0);

            if current > best_score && current > self.policy.min_score {
                best = Some((index, current));
            }
        }

        best
    }

    /// 候補1件を照合
    pub fn match_one(&self, candidate: &CandidateQuery) -> JoinedRecord {
        match self.best_match(candidate) {
            Some((index, match_score)) => {
                let observed = &self.observed[index];
                tracing::debug!(
                    query = %candidate.text,
                    matched = %observed.text,
                    score = match_score,
                    "matched"
                );
                JoinedRecord::matched(candidate, observed)
            }
            None => {
                tracing::debug!(query = %candidate.text, "content gap");
                JoinedRecord::gap(candidate)
            }
        }
    }
}

/// 全候補を照合（入力順・件数を維持）
pub fn match_queries(
    candidates: &[CandidateQuery],
    observed: &[ObservedQuery],
    policy: &MatchPolicy,
) -> Vec<JoinedRecord> {
    let matcher = Matcher::new(observed, *policy);
    candidates.iter().map(|c| matcher.match_one(c)).collect()
}
