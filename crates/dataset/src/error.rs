//! Dataset error types.

use thiserror::Error;

/// Result type alias for dataset operations.
pub type Result<T> = std::result::Result<T, DatasetError>;

/// Errors raised at the dataset boundary.
///
/// `MissingColumns` is fatal to the whole pipeline. `UnparseableDate` is
/// non-fatal: the caller still holds the raw table and decides whether to
/// proceed without date-dependent engines.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DatasetError {
    /// One or more required columns are absent; every missing name is listed
    #[error("missing required columns: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    /// The date column could not be normalized by any known format
    #[error("unparseable date '{value}' at row {row}")]
    UnparseableDate { row: usize, value: String },

    /// A numeric cell failed to parse or is not finite
    #[error("invalid {column} value '{value}' at row {row}")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    /// A pushed row does not match the table's column count
    #[error("row {row} has {actual} cells, expected {expected}")]
    RowShape {
        row: usize,
        expected: usize,
        actual: usize,
    },
}
