use typed_builder::TypedBuilder;
use warren_core::validation::{check_expiry_minutes, DEFAULT_EXPIRY_MINUTES};
use warren_core::{ShortCode, ValidationError};
use warren_generator::MAX_SUFFIX_LENGTH;

/// Tunables of an [`AliasRegistry`](crate::AliasRegistry).
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct RegistrySettings {
    /// Expiry applied when the caller gives none.
    #[builder(default = DEFAULT_EXPIRY_MINUTES)]
    pub default_expiry_minutes: u32,
    /// Length of auto-generated codes; one longer is tried on persistent collisions.
    #[builder(default = 6)]
    pub code_length: usize,
    /// Attempts per length when auto-generating.
    #[builder(default = 50)]
    pub max_attempts: usize,
    /// Random characters appended to a custom token.
    #[builder(default = 5)]
    pub jumble_suffix_length: usize,
    /// Fresh suffixes tried before giving up on a custom token.
    #[builder(default = 10)]
    pub jumble_attempts: usize,
}

impl RegistrySettings {
    /// Rejects settings that could produce codes outside the short code format.
    ///
    /// Both `code_length` and its fallback `code_length + 1` must be valid
    /// lengths, and a jumble suffix must leave room for a minimum-length token.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_expiry_minutes(self.default_expiry_minutes)?;
        ShortCode::check_length(self.code_length)?;
        ShortCode::check_length(self.code_length + 1)?;

        if !(1..=MAX_SUFFIX_LENGTH).contains(&self.jumble_suffix_length) {
            return Err(ValidationError::InvalidShortCode(format!(
                "jumble suffix length must be between 1 and {MAX_SUFFIX_LENGTH}, got {}",
                self.jumble_suffix_length
            )));
        }
        Ok(())
    }
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self::builder().build()
    }
}
