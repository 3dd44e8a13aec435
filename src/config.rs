use crate::cli::ExportFormat;
use crate::error::{HeatmapError, Result};
use fanout_heatmap_common::{MatchPolicy, ReportOptions};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 設定ファイルの場所を上書きする環境変数
pub const CONFIG_PATH_ENV: &str = "FANOUT_HEATMAP_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 照合の閾値
    pub policy: MatchPolicy,
    /// 依頼文の列挙件数
    pub report: ReportOptions,
    /// `report` コマンドの既定出力形式
    pub default_format: String,
    /// 出力タイトル
    pub title: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            policy: MatchPolicy::default(),
            report: ReportOptions::default(),
            default_format: "html".into(),
            title: "Query Fan-Out Position Heatmap".into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &std::path::Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &std::path::Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        // 環境変数を優先
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let home = dirs::home_dir()
            .ok_or_else(|| HeatmapError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("fanout-heatmap").join("config.json"))
    }

    /// 既定の出力形式
    pub fn default_format(&self) -> Result<ExportFormat> {
        self.default_format
            .parse()
            .map_err(HeatmapError::Config)
    }

    fn validate(&self) -> Result<()> {
        let policy = &self.policy;
        if !(0.0..=1.0).contains(&policy.min_similarity) {
            return Err(HeatmapError::Config(format!(
                "min_similarity は0.0〜1.0で指定してください: {}",
                policy.min_similarity
            )));
        }
        if !policy.min_score.is_finite() || !policy.fuzzy_weight.is_finite() {
            return Err(HeatmapError::Config("スコア設定が不正です".into()));
        }
        self.default_format()?;
        Ok(())
    }
}
