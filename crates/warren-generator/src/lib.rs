//! Short code generation and collision-aware allocation.

pub mod allocator;
pub mod error;
pub mod random;
pub mod seq;

pub use allocator::{Allocator, MAX_SUFFIX_LENGTH};
pub use error::AllocationError;
pub use random::RandomGenerator;
pub use seq::SeqGenerator;

/// The 62 symbols candidate codes are drawn from.
pub const ALPHABET: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Trait for generating candidate short codes.
///
/// Implementations are pure generators that don't interact with storage;
/// [`Allocator`] turns candidates into validated codes and checks them
/// against the table.
pub trait Generator: Send + Sync + 'static {
    /// Produces a candidate of exactly `length` alphabet characters.
    fn generate(&self, length: usize) -> String;
}
