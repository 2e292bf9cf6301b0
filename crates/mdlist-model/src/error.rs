use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("column {column} has {actual} rows but the table has {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
