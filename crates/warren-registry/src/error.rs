use thiserror::Error;
use warren_core::{StorageError, ValidationError};
use warren_generator::AllocationError;

/// Everything a registry operation can fail with.
///
/// None of these are fatal: each one aborts a single operation and leaves
/// the table as it was.
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("short code already exists: {0}")]
    Collision(String),
    #[error("could not allocate a short code: {0}")]
    AllocationExhausted(String),
    #[error("could not allocate a short code: {0}")]
    CollisionUnresolved(String),
    #[error("change was not saved: {0}")]
    StorageWriteFailed(String),
}

impl RegistryError {
    /// Transient failures where simply trying again may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Collision(_) | Self::AllocationExhausted(_) | Self::CollisionUnresolved(_)
        )
    }
}

impl From<AllocationError> for RegistryError {
    fn from(value: AllocationError) -> Self {
        match value {
            AllocationError::InvalidCode(e) => Self::Validation(e),
            e @ AllocationError::Exhausted { .. } => Self::AllocationExhausted(e.to_string()),
            e @ AllocationError::CollisionUnresolved { .. } => {
                Self::CollisionUnresolved(e.to_string())
            }
        }
    }
}

impl From<StorageError> for RegistryError {
    fn from(value: StorageError) -> Self {
        Self::StorageWriteFailed(value.to_string())
    }
}
