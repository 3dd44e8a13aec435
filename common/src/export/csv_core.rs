//! コンテンツギャップ一覧のCSV出力

use crate::error::{Error, Result};
use crate::types::JoinedRecord;

const GAPS_HEADER: [&str; 4] = ["query", "category", "intent", "format"];

/// ギャップのみをCSV化（ヘッダー付き、入力順、必要な値だけクォート）
pub fn gaps_csv(records: &[JoinedRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(GAPS_HEADER)?;

    for record in records.iter().filter(|r| r.is_gap) {
        writer.write_record([
            record.query.as_str(),
            record.category.as_str(),
            record.intent.as_str(),
            record.format.as_str(),
        ])?;
    }

    writer.into_inner().map_err(|e| Error::Io(e.into_error()))
}
