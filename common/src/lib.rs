//! Fan-out Heatmap Common Library
//!
//! CLIと各出力形式で共有される照合・区分・集計・依頼文生成

pub mod types;
pub mod table;
pub mod matcher;
pub mod bucket;
pub mod aggregate;
pub mod report;
pub mod assistant;
pub mod layout;
pub mod error;
pub mod export;

pub use types::{CandidateQuery, JoinedRecord, ObservedQuery};
pub use table::Table;
pub use matcher::{match_queries, MatchPolicy, Matcher};
pub use bucket::PositionBucket;
pub use aggregate::{by_category, by_format, by_intent, group_by, GroupStats, Summary};
pub use report::{render_brief, Report, ReportOptions};
pub use assistant::Assistant;
pub use error::{Error, Result};
pub use export::ReportBackend;
