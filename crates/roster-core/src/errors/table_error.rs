/// Table model and column-contract errors.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("required column '{column}' missing from {table}")]
    ColumnMissing { column: String, table: String },

    #[error("row {row} has {actual} values, expected {expected}")]
    RowWidthMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("column '{column}' has {actual} values, table has {expected} rows")]
    ColumnLengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("duplicate values in key column '{column}': {values:?}")]
    DuplicateKey { column: String, values: Vec<String> },

    #[error("fixture record {index} is not a JSON object")]
    InvalidRecord { index: usize },

    #[error("record {index} has a non-scalar value in '{column}'")]
    InvalidCell { index: usize, column: String },

    #[error("csv output failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl TableError {
    /// Shorthand for a missing column in a named table.
    pub fn missing(column: impl Into<String>, table: impl Into<String>) -> Self {
        Self::ColumnMissing {
            column: column.into(),
            table: table.into(),
        }
    }
}
