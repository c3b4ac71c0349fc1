use thiserror::Error;
use warren_core::StorageError;

pub type Result<T> = std::result::Result<T, RedirectorError>;

#[derive(Debug, Clone, Error)]
pub enum RedirectorError {
    /// The click was counted in memory but could not be persisted.
    #[error("click was not saved: {0}")]
    StorageWriteFailed(String),
}

impl From<StorageError> for RedirectorError {
    fn from(value: StorageError) -> Self {
        Self::StorageWriteFailed(value.to_string())
    }
}
