//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing column \"{column}\" in {table} table")]
    MissingColumn { table: &'static str, column: &'static str },

    #[error("Invalid value in {table} table, row {row}, column \"{column}\": {value:?}")]
    InvalidValue {
        table: &'static str,
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("Export error: {0}")]
    Export(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = Error::Io(io_error);
        let display = format!("{}", error);
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_error_display_missing_column() {
        let error = Error::MissingColumn { table: "observed", column: "Top queries" };
        assert_eq!(
            format!("{}", error),
            "Missing column \"Top queries\" in observed table"
        );
    }

    #[test]
    fn test_error_display_invalid_value() {
        let error = Error::InvalidValue {
            table: "observed",
            row: 3,
            column: "Position",
            value: "abc".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("row 3"));
        assert!(display.contains("\"Position\""));
        assert!(display.contains("\"abc\""));
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }

    #[test]
    fn test_error_from_csv() {
        let io_error = std::io::Error::new(std::io::ErrorKind::Other, "broken pipe");
        let error: Error = csv::Error::from(io_error).into();
        assert!(matches!(error, Error::Csv(_)));
        assert!(format!("{}", error).contains("CSV error"));
    }
}
