use crate::{Generator, ALPHABET};
use std::sync::atomic::{AtomicU64, Ordering};

/// A deterministic generator that counts through the alphabet.
///
/// The counter is written in base 62 using [`ALPHABET`] and left-padded to
/// the requested length, so the first codes of length 6 are `"AAAAAA"`,
/// `"AAAAAB"`, ... Counters that do not fit in `length` digits wrap around.
///
/// Handy wherever reproducible codes matter more than unpredictability.
#[derive(Debug)]
pub struct SeqGenerator {
    counter: AtomicU64,
}

impl Clone for SeqGenerator {
    fn clone(&self) -> Self {
        Self {
            counter: AtomicU64::new(self.counter.load(Ordering::SeqCst)),
        }
    }
}

impl SeqGenerator {
    pub fn new() -> Self {
        Self::with_offset(0)
    }

    /// Creates a generator starting from a specific counter value.
    pub fn with_offset(offset: u64) -> Self {
        Self {
            counter: AtomicU64::new(offset),
        }
    }
}

impl Default for SeqGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for SeqGenerator {
    fn generate(&self, length: usize) -> String {
        let mut value = self.counter.fetch_add(1, Ordering::SeqCst);
        let base = ALPHABET.len() as u64;

        let mut digits = vec![ALPHABET[0]; length];
        for slot in digits.iter_mut().rev() {
            *slot = ALPHABET[(value % base) as usize];
            value /= base;
        }

        digits.into_iter().map(char::from).collect()
    }
}
