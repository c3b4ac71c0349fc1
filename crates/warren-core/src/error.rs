use thiserror::Error;

/// Input rejected by the validation layer. Nothing is mutated when one of
/// these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid expiry: {0}")]
    InvalidExpiry(String),
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
}

/// Errors raised by a [`Store`](crate::store::Store) backend.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// The persisted document could not be read or parsed.
    #[error("stored table is corrupt: {0}")]
    Corrupt(String),
    /// The table could not be written back; the mutation is not durable.
    #[error("storage write failed: {0}")]
    WriteFailed(String),
}

/// A bounded retry loop ran out of attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("gave up after {attempts} attempts")]
pub struct Exhausted {
    pub attempts: usize,
}
