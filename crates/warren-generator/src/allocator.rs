use crate::error::AllocationError;
use crate::Generator;
use tracing::{debug, warn};
use warren_core::shortcode::{MAX_LENGTH, MIN_LENGTH};
use warren_core::{try_n_times, ShortCode, ValidationError};

/// Longest jumble suffix that still leaves room for `-` and a
/// minimum-length token.
pub const MAX_SUFFIX_LENGTH: usize = MAX_LENGTH - 1 - MIN_LENGTH;

/// Turns raw candidates from a [`Generator`] into codes that are free in the
/// caller's current view of the table.
///
/// The allocator never looks at storage itself: every method takes an
/// `is_taken` predicate so the check and the subsequent insert can run inside
/// the same table transaction. Every code it hands out has passed
/// [`ShortCode::new`].
#[derive(Debug, Clone)]
pub struct Allocator<G> {
    generator: G,
}

impl<G: Generator> Allocator<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Draws one candidate of `length` characters, without any uniqueness check.
    pub fn generate(&self, length: usize) -> Result<ShortCode, AllocationError> {
        Ok(ShortCode::new(self.generator.generate(length))?)
    }

    /// Finds a free code of `length` characters, falling back to `length + 1`.
    ///
    /// Each length gets `max_attempts` tries. Running out at both lengths is
    /// reported as [`AllocationError::Exhausted`], never papered over. Lengths
    /// outside the short code bounds are rejected before anything is drawn.
    pub fn generate_unique(
        &self,
        length: usize,
        max_attempts: usize,
        is_taken: impl Fn(&str) -> bool,
    ) -> Result<ShortCode, AllocationError> {
        ShortCode::check_length(length)?;
        ShortCode::check_length(length + 1)?;

        let free_at = |len: usize| {
            try_n_times(max_attempts, |_| match self.generate(len) {
                Ok(candidate) if is_taken(candidate.as_str()) => None,
                other => Some(other),
            })
        };

        if let Ok(found) = free_at(length) {
            return found;
        }

        warn!(
            length,
            attempts = max_attempts,
            "short code collisions persisted, trying a longer code"
        );

        free_at(length + 1).unwrap_or(Err(AllocationError::Exhausted {
            length,
            attempts: max_attempts,
        }))
    }

    /// Appends `-` and a random suffix to a user token, e.g. `promo-AB12c`.
    ///
    /// The token must itself be a valid short code; it is cut short enough
    /// that the result still fits the length limit.
    pub fn generate_jumbled(
        &self,
        token: &str,
        suffix_length: usize,
    ) -> Result<ShortCode, AllocationError> {
        let prefix = jumble_prefix(token, suffix_length)?;
        self.jumble(&prefix, suffix_length)
    }

    /// Retries [`generate_jumbled`](Self::generate_jumbled) with fresh
    /// suffixes until one is free, up to `attempts` times.
    ///
    /// Never falls back to a plain random code: the token must survive as the
    /// recognizable prefix.
    pub fn jumble_unique(
        &self,
        token: &str,
        suffix_length: usize,
        attempts: usize,
        is_taken: impl Fn(&str) -> bool,
    ) -> Result<ShortCode, AllocationError> {
        let prefix = jumble_prefix(token, suffix_length)?;

        try_n_times(attempts, |attempt| match self.jumble(&prefix, suffix_length) {
            Ok(candidate) if is_taken(candidate.as_str()) => {
                debug!(code = %candidate, attempt, "jumbled code already taken");
                None
            }
            other => Some(other),
        })
        .unwrap_or_else(|_| {
            warn!(token, attempts, "short code collision after jumbles");
            Err(AllocationError::CollisionUnresolved {
                token: token.to_string(),
                attempts,
            })
        })
    }

    fn jumble(&self, prefix: &str, suffix_length: usize) -> Result<ShortCode, AllocationError> {
        let suffix = self.generator.generate(suffix_length);
        Ok(ShortCode::new(format!("{prefix}-{suffix}"))?)
    }
}

fn jumble_prefix(token: &str, suffix_length: usize) -> Result<String, AllocationError> {
    let token = ShortCode::new(token)?;

    if !(1..=MAX_SUFFIX_LENGTH).contains(&suffix_length) {
        return Err(ValidationError::InvalidShortCode(format!(
            "suffix length must be between 1 and {MAX_SUFFIX_LENGTH}, got {suffix_length}"
        ))
        .into());
    }

    let keep = MAX_LENGTH - 1 - suffix_length;
    Ok(token.as_str().chars().take(keep).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RandomGenerator, SeqGenerator, ALPHABET};
    use std::cell::Cell;
    use std::collections::HashSet;

    fn is_invalid_code(err: &AllocationError) -> bool {
        matches!(
            err,
            AllocationError::InvalidCode(ValidationError::InvalidShortCode(_))
        )
    }

    #[test]
    fn generate_draws_from_alphabet() {
        let allocator = Allocator::new(RandomGenerator::seeded(1));

        for length in [MIN_LENGTH, 6, MAX_LENGTH] {
            let code = allocator.generate(length).unwrap();
            assert_eq!(code.len(), length);
            assert!(code.as_str().bytes().all(|b| ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn generate_rejects_out_of_range_lengths() {
        let allocator = Allocator::new(SeqGenerator::new());

        assert!(is_invalid_code(&allocator.generate(2).unwrap_err()));
        assert!(is_invalid_code(&allocator.generate(MAX_LENGTH + 1).unwrap_err()));
    }

    #[test]
    fn generate_unique_returns_first_free_code() {
        let allocator = Allocator::new(SeqGenerator::new());
        let taken: HashSet<&str> = ["AAAAAA", "AAAAAB"].into_iter().collect();

        let code = allocator
            .generate_unique(6, 50, |c| taken.contains(c))
            .unwrap();
        assert_eq!(code.as_str(), "AAAAAC");
    }

    #[test]
    fn generate_unique_falls_back_to_longer_code() {
        let allocator = Allocator::new(RandomGenerator::seeded(3));

        // every six-character code is taken
        let code = allocator
            .generate_unique(6, 50, |c| c.len() == 6)
            .unwrap();
        assert_eq!(code.len(), 7);
    }

    #[test]
    fn generate_unique_exhausts_loudly() {
        let allocator = Allocator::new(RandomGenerator::seeded(3));
        let calls = Cell::new(0);

        let err = allocator
            .generate_unique(6, 50, |c| {
                calls.set(calls.get() + 1);
                c.len() <= 7
            })
            .unwrap_err();

        assert_eq!(
            err,
            AllocationError::Exhausted {
                length: 6,
                attempts: 50
            }
        );
        assert_eq!(calls.get(), 100);
    }

    #[test]
    fn generate_unique_rejects_lengths_without_a_valid_fallback() {
        let allocator = Allocator::new(SeqGenerator::new());
        let calls = Cell::new(0);
        let is_taken = |_: &str| {
            calls.set(calls.get() + 1);
            false
        };

        for length in [0, 2, MAX_LENGTH] {
            let err = allocator.generate_unique(length, 50, is_taken).unwrap_err();
            assert!(is_invalid_code(&err), "length {length}");
        }
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn jumbled_code_keeps_token_prefix() {
        let allocator = Allocator::new(SeqGenerator::new());

        let code = allocator.generate_jumbled("promo", 5).unwrap();
        assert_eq!(code.as_str(), "promo-AAAAA");
    }

    #[test]
    fn jumbled_code_fits_length_limit() {
        let allocator = Allocator::new(RandomGenerator::seeded(9));
        let token = "t".repeat(MAX_LENGTH);

        let code = allocator.generate_jumbled(&token, 5).unwrap();
        assert_eq!(code.len(), MAX_LENGTH);
        assert!(code.as_str().starts_with(&"t".repeat(26)));

        let code = allocator.generate_jumbled("abc", MAX_SUFFIX_LENGTH).unwrap();
        assert_eq!(code.len(), MAX_LENGTH);
    }

    #[test]
    fn jumble_rejects_invalid_tokens() {
        let allocator = Allocator::new(SeqGenerator::new());

        for token in ["", "   ", " promo ", "bad token!", "ab"] {
            let err = allocator.generate_jumbled(token, 5).unwrap_err();
            assert!(is_invalid_code(&err), "token {token:?}");
        }
    }

    #[test]
    fn jumble_rejects_out_of_range_suffix() {
        let allocator = Allocator::new(SeqGenerator::new());

        for suffix_length in [0, MAX_SUFFIX_LENGTH + 1, MAX_LENGTH] {
            let err = allocator.generate_jumbled("promo", suffix_length).unwrap_err();
            assert!(is_invalid_code(&err), "suffix {suffix_length}");
        }
    }

    #[test]
    fn jumble_unique_retries_with_fresh_suffix() {
        let allocator = Allocator::new(SeqGenerator::new());
        let taken: HashSet<&str> = ["promo-AAAAA", "promo-AAAAB"].into_iter().collect();

        let code = allocator
            .jumble_unique("promo", 5, 10, |c| taken.contains(c))
            .unwrap();
        assert_eq!(code.as_str(), "promo-AAAAC");
    }

    #[test]
    fn jumble_unique_gives_up_after_bounded_attempts() {
        let allocator = Allocator::new(RandomGenerator::seeded(5));
        let calls = Cell::new(0);

        let err = allocator
            .jumble_unique("promo", 5, 10, |c| {
                calls.set(calls.get() + 1);
                assert!(c.starts_with("promo-"));
                true
            })
            .unwrap_err();

        assert_eq!(
            err,
            AllocationError::CollisionUnresolved {
                token: "promo".to_string(),
                attempts: 10
            }
        );
        assert_eq!(calls.get(), 10);
    }

    #[test]
    fn jumble_unique_never_falls_back_for_blank_token() {
        let allocator = Allocator::new(SeqGenerator::new());
        let calls = Cell::new(0);

        let err = allocator
            .jumble_unique("", 5, 10, |_| {
                calls.set(calls.get() + 1);
                false
            })
            .unwrap_err();

        assert!(is_invalid_code(&err));
        assert_eq!(calls.get(), 0);
    }
}
