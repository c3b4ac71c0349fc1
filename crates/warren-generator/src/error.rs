use thiserror::Error;
use warren_core::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    /// The requested shape cannot produce a valid short code.
    #[error(transparent)]
    InvalidCode(#[from] ValidationError),
    /// Both the requested length and the one above it kept colliding.
    #[error("no free short code at length {length} or one longer after {attempts} attempts each")]
    Exhausted { length: usize, attempts: usize },
    /// Every jumbled variant of a custom token was already taken.
    #[error("no free short code found for token '{token}' after {attempts} attempts")]
    CollisionUnresolved { token: String, attempts: usize },
}
