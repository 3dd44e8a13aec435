//! 掲載順位の区分（ヒートマップの色分け）

use serde::{Deserialize, Serialize};

/// 順位区分
///
/// 並び順が良い→悪いの順序を表す。`NoRank` は順位なし（ギャップ）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PositionBucket {
    NoRank,
    Excellent,
    VeryGood,
    Good,
    Fair,
    Mediocre,
    Weak,
    Poor,
    Worst,
}

impl PositionBucket {
    /// 全区分（表示順）
    pub const ALL: [PositionBucket; 9] = [
        PositionBucket::NoRank,
        PositionBucket::Excellent,
        PositionBucket::VeryGood,
        PositionBucket::Good,
        PositionBucket::Fair,
        PositionBucket::Mediocre,
        PositionBucket::Weak,
        PositionBucket::Poor,
        PositionBucket::Worst,
    ];

    /// 順位から区分を決定（上限は含む）
    pub fn classify(position: Option<f64>) -> Self {
        let Some(position) = position else {
            return PositionBucket::NoRank;
        };

        if position <= 3.0 {
            PositionBucket::Excellent
        } else if position <= 5.0 {
            PositionBucket::VeryGood
        } else if position <= 10.0 {
            PositionBucket::Good
        } else if position <= 15.0 {
            PositionBucket::Fair
        } else if position <= 20.0 {
            PositionBucket::Mediocre
        } else if position <= 30.0 {
            PositionBucket::Weak
        } else if position <= 50.0 {
            PositionBucket::Poor
        } else {
            PositionBucket::Worst
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            PositionBucket::NoRank => "no-rank",
            PositionBucket::Excellent => "excellent",
            PositionBucket::VeryGood => "very-good",
            PositionBucket::Good => "good",
            PositionBucket::Fair => "fair",
            PositionBucket::Mediocre => "mediocre",
            PositionBucket::Weak => "weak",
            PositionBucket::Poor => "poor",
            PositionBucket::Worst => "worst",
        }
    }

    /// 凡例用ラベル
    pub fn label(&self) -> &'static str {
        match self {
            PositionBucket::NoRank => "Not ranking",
            PositionBucket::Excellent => "1-3",
            PositionBucket::VeryGood => "4-5",
            PositionBucket::Good => "6-10",
            PositionBucket::Fair => "11-15",
            PositionBucket::Mediocre => "16-20",
            PositionBucket::Weak => "21-30",
            PositionBucket::Poor => "31-50",
            PositionBucket::Worst => "50+",
        }
    }

    /// 表示色（RGB）
    pub fn rgb(&self) -> u32 {
        match self {
            PositionBucket::NoRank => 0x374151,
            PositionBucket::Excellent => 0x10B981,
            PositionBucket::VeryGood => 0x84CC16,
            PositionBucket::Good => 0xFACC15,
            PositionBucket::Fair => 0xFBBF24,
            PositionBucket::Mediocre => 0xFB923C,
            PositionBucket::Weak => 0xF97316,
            PositionBucket::Poor => 0xEF4444,
            PositionBucket::Worst => 0xDC2626,
        }
    }

    /// CSS用の色（`#rrggbb`）
    pub fn hex(&self) -> String {
        format!("#{:06x}", self.rgb())
    }

    /// 区分の上限順位（NoRank・Worstは None）
    pub fn upper_bound(&self) -> Option<f64> {
        match self {
            PositionBucket::Excellent => Some(3.0),
            PositionBucket::VeryGood => Some(5.0),
            PositionBucket::Good => Some(10.0),
            PositionBucket::Fair => Some(15.0),
            PositionBucket::Mediocre => Some(20.0),
            PositionBucket::Weak => Some(30.0),
            PositionBucket::Poor => Some(50.0),
            PositionBucket::NoRank | PositionBucket::Worst => None,
        }
    }

    /// 表示順のインデックス
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for PositionBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl std::str::FromStr for PositionBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PositionBucket::ALL
            .into_iter()
            .find(|b| b.id() == s.to_lowercase())
            .ok_or_else(|| format!("Unknown bucket: {}", s))
    }
}
