//! Query Fan-Out × Search Console 掲載順位ヒートマップ
//!
//! 照合・集計の本体は `fanout_heatmap_common`、このクレートはファイル入出力と CLI を担う。

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod loader;
pub mod logging;
pub mod pipeline;
