/// Errors raised while loading the trending-video dataset.
///
/// Loading is the only fallible stage. Once a `Dataset` exists, filtering and
/// aggregation cannot fail.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("Failed to open '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    #[error("Line {line}: cannot parse '{value}' in column '{column}' as a non-negative integer")]
    InvalidValue {
        line: u64,
        column: String,
        value: String,
    },
}

pub type DataResult<T> = Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_message() {
        let err = DataError::MissingColumn("views".to_string());
        assert_eq!(err.to_string(), "Missing required column 'views'");
    }

    #[test]
    fn test_invalid_value_message() {
        let err = DataError::InvalidValue {
            line: 3,
            column: "likes".to_string(),
            value: "lots".to_string(),
        };
        assert!(err.to_string().starts_with("Line 3:"));
        assert!(err.to_string().contains("'lots'"));
    }
}
