//! Error types for dbl output parsing.

use hydro_common::HydroError;
use thiserror::Error;

/// Result type for parser operations.
pub type PlutoResult<T> = Result<T, PlutoError>;

/// Error types for dbl output parsing.
#[derive(Error, Debug)]
pub enum PlutoError {
    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Malformed grid, log or data file
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    /// No entry for the requested cycle in dbl.out
    #[error("Cycle {0} not listed in dbl.out")]
    CycleNotFound(u32),

    /// Error building the snapshot
    #[error(transparent)]
    Snapshot(#[from] HydroError),
}

impl PlutoError {
    pub fn invalid_format(msg: impl Into<String>) -> Self {
        Self::InvalidFormat(msg.into())
    }
}

impl From<PlutoError> for HydroError {
    fn from(err: PlutoError) -> Self {
        match err {
            PlutoError::IoError(e) => HydroError::Io(e),
            PlutoError::Snapshot(e) => e,
            other => HydroError::source_error(other.to_string()),
        }
    }
}
