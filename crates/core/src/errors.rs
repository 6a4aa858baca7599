use thiserror::Error;

#[derive(Error, Debug)]
pub enum RotaError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid form transition: {0}")]
    InvalidTransition(String),

    #[error("Index {index} out of range for {len} entries")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Storage error: {0}")]
    Storage(#[from] eyre::Report),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type RotaResult<T> = Result<T, RotaError>;
