//! Error types for column transformations.

use mdlist_model::ModelError;
use thiserror::Error;

/// Errors raised by converters, augmentors, predicates and the sorter.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TransformError {
    /// A cell holds a type the step cannot interpret.
    #[error("column {column}, row {row}: expected {expected}, found {found}")]
    TypeMismatch {
        column: String,
        row: usize,
        expected: &'static str,
        found: &'static str,
    },

    /// A cell looks like a date but does not name a real calendar day.
    #[error("column {column}, row {row}: invalid date {value:?}")]
    InvalidDate {
        column: String,
        row: usize,
        value: String,
    },

    /// A sort key column does not exist.
    #[error("column not found: {0}")]
    MissingColumn(String),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result type for transformation operations.
pub type Result<T> = std::result::Result<T, TransformError>;
