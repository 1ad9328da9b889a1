//! Error types for coupling operations.

use ascii_table::TableError;
use hydro_common::HydroError;
use thiserror::Error;

/// Errors raised while exchanging data between the two codes.
#[derive(Error, Debug)]
pub enum CouplingError {
    /// Snapshot, grid or unit error.
    #[error(transparent)]
    Hydro(#[from] HydroError),

    /// Table read/write error.
    #[error("table error: {0}")]
    Table(#[from] TableError),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration or run parameters.
    #[error("configuration error: {0}")]
    Config(String),

    /// A cell index column holds something that is not a non-negative integer.
    #[error("row {row}: invalid cell index {column}={value}")]
    InvalidIndex {
        row: usize,
        column: &'static str,
        value: f64,
    },

    /// `prev_prefactor * rate_coeff * nenh` vanished under the `fail` policy.
    #[error("zero denominator rescaling {process} at cell ({i}, {j})")]
    ZeroDenominator {
        process: &'static str,
        i: usize,
        j: usize,
    },

    /// The rate ratio for a cell is NaN (a NaN rate or 0/0) under the `fail` policy.
    #[error("undefined rate ratio for {process} at cell ({i}, {j})")]
    UndefinedRatio {
        process: &'static str,
        i: usize,
        j: usize,
    },
}

impl CouplingError {
    /// Create a Config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<serde_yaml::Error> for CouplingError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Config(format!("YAML error: {}", err))
    }
}

/// Result type for coupling operations.
pub type CouplingResult<T> = std::result::Result<T, CouplingError>;
