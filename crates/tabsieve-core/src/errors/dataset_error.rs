//! Dataset construction errors.

use super::error_code::{self, SieveErrorCode};

/// Structural errors raised while assembling a `Dataset`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DatasetError {
    #[error("Column `{column}` has {actual} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("Column name must not be empty")]
    EmptyColumnName,

    #[error("Row {row} is out of range for {len} rows")]
    RowOutOfRange { row: usize, len: usize },
}

impl SieveErrorCode for DatasetError {
    fn error_code(&self) -> &'static str {
        error_code::DATASET_ERROR
    }
}
