use thiserror::Error;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid share code: {0}")]
    InvalidShareCode(String),
}

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage serialization failed: {0}")]
    Serialization(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

/// Errors surfaced by a [`Sharer`](crate::Sharer).
#[derive(Debug, Clone, Error)]
pub enum ShareError {
    #[error("markdown content is required")]
    EmptyDocument,
    #[error("invalid share code: {0}")]
    InvalidCode(String),
    #[error("share not found or expired")]
    NotFound,
    #[error("could not reserve a unique share code after {attempts} attempts")]
    CollisionExhausted { attempts: u32 },
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<CoreError> for ShareError {
    fn from(value: CoreError) -> Self {
        match value {
            CoreError::InvalidShareCode(message) => Self::InvalidCode(message),
        }
    }
}
