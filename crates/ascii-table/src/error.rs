//! Error types for table reading and writing.

use thiserror::Error;

/// Result type for table operations.
pub type TableResult<T> = Result<T, TableError>;

/// Error types for table I/O.
#[derive(Error, Debug)]
pub enum TableError {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Table has no header line
    #[error("table has no header line")]
    MissingHeader,

    /// Requested column is not in the header
    #[error("column '{0}' not found")]
    MissingColumn(String),

    /// A row has the wrong number of values
    #[error("line {line}: expected {expected} values, found {found}")]
    RowLength {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A value could not be parsed as a number
    #[error("line {line}: cannot parse '{token}' as a number")]
    Parse { line: usize, token: String },
}

impl From<tempfile::PersistError> for TableError {
    fn from(err: tempfile::PersistError) -> Self {
        Self::Io(err.error)
    }
}
