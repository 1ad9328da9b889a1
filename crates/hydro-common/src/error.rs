//! Error types for the coupling crates.

use thiserror::Error;

/// Result type alias using HydroError.
pub type HydroResult<T> = Result<T, HydroError>;

/// Primary error type for grid and snapshot operations.
#[derive(Debug, Error)]
pub enum HydroError {
    // === Input Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unit '{0}' not found in definitions file")]
    MissingUnit(String),

    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    // === Grid Errors ===
    #[error("Invalid axis '{axis}': {message}")]
    InvalidAxis { axis: String, message: String },

    #[error("Field '{0}' not present in snapshot")]
    FieldNotFound(String),

    #[error("Index ({i}, {j}) out of bounds for field '{field}' of shape ({nx1}, {nx2})")]
    IndexOutOfBounds {
        field: String,
        i: usize,
        j: usize,
        nx1: usize,
        nx2: usize,
    },

    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    // === Source Errors ===
    #[error("Snapshot source error: {0}")]
    Source(String),
}

impl HydroError {
    /// Create an InvalidValue error.
    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create an InvalidAxis error.
    pub fn invalid_axis(axis: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidAxis {
            axis: axis.into(),
            message: message.into(),
        }
    }

    /// Create a Source error.
    pub fn source_error(message: impl Into<String>) -> Self {
        Self::Source(message.into())
    }
}
