use crate::error::RegistryError;
use crate::registry::AliasRegistry;
use async_trait::async_trait;
use tracing::warn;
use warren_core::validation::{
    is_valid_shortcode, is_valid_url, normalize_url, parse_expiry_minutes,
};
use warren_core::{AliasRecord, Clock, Store, ValidationError};
use warren_generator::Generator;

type Result<T> = std::result::Result<T, RegistryError>;

/// Raw, unvalidated input for creating a short link, as typed by a user.
#[derive(Debug, Clone, Default)]
pub struct ShortenParams {
    /// The destination; `https://` is assumed when no scheme is given.
    pub long_url: String,
    /// Optional mnemonic token; a random suffix is always appended to it.
    /// Checked as typed, so surrounding whitespace is rejected.
    pub custom_token: Option<String>,
    /// Optional expiry in minutes; blank means the default.
    pub expiry_minutes: Option<String>,
}

impl ShortenParams {
    pub fn new(long_url: impl Into<String>) -> Self {
        Self {
            long_url: long_url.into(),
            ..Default::default()
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.custom_token = Some(token.into());
        self
    }

    pub fn with_expiry(mut self, minutes: impl Into<String>) -> Self {
        self.expiry_minutes = Some(minutes.into());
        self
    }
}

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Validates the form input and creates the alias it describes.
    ///
    /// Checks run in order (URL, expiry, token) and the first failure is
    /// returned before anything is written.
    async fn shorten(&self, params: ShortenParams) -> Result<AliasRecord>;
}

#[async_trait]
impl<S: Store, G: Generator, C: Clock> Shortener for AliasRegistry<S, G, C> {
    async fn shorten(&self, params: ShortenParams) -> Result<AliasRecord> {
        let long_url = normalize_url(params.long_url.trim()).into_owned();
        if !is_valid_url(&long_url) {
            warn!(url = %long_url, "validation failed: invalid url");
            return Err(ValidationError::InvalidUrl(format!(
                "please enter a valid url (e.g. https://example.com): '{long_url}'"
            ))
            .into());
        }

        let expiry_minutes = parse_expiry_minutes(params.expiry_minutes.as_deref())
            .inspect_err(|_| warn!("validation failed: invalid expiry"))?;

        let token = params
            .custom_token
            .as_deref()
            .filter(|token| !token.is_empty());
        if !is_valid_shortcode(token) {
            warn!(token = ?token, "validation failed: invalid short code");
            return Err(ValidationError::InvalidShortCode(
                "short code must be 3-32 letters, digits or hyphens".to_string(),
            )
            .into());
        }

        match token {
            None => self.create(None, &long_url, expiry_minutes).await,
            Some(token) => {
                self.create_from_token(token, &long_url, expiry_minutes)
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::Timestamp;
    use warren_core::ManualClock;
    use warren_generator::SeqGenerator;
    use warren_storage::{InMemoryStore, Table};

    fn test_registry() -> AliasRegistry<InMemoryStore, SeqGenerator, ManualClock> {
        AliasRegistry::new(
            Table::new(InMemoryStore::new()),
            SeqGenerator::new(),
            ManualClock::new(Timestamp::from_second(1_700_000_000).unwrap()),
        )
    }

    #[tokio::test]
    async fn shorten_with_auto_generated_code() {
        let registry = test_registry();

        let record = registry
            .shorten(ShortenParams::new("  example.com/page "))
            .await
            .unwrap();

        assert_eq!(record.shortcode().as_str(), "AAAAAA");
        assert_eq!(record.long_url(), "https://example.com/page");
        assert_eq!(record.expiry_minutes(), 30);
    }

    #[tokio::test]
    async fn shorten_with_custom_token_is_jumbled() {
        let registry = test_registry();

        let record = registry
            .shorten(
                ShortenParams::new("https://example.com")
                    .with_token("promo")
                    .with_expiry("45"),
            )
            .await
            .unwrap();

        assert_eq!(record.shortcode().as_str(), "promo-AAAAA");
        assert_eq!(record.expiry_minutes(), 45);
    }

    #[tokio::test]
    async fn blank_fields_fall_back_to_defaults() {
        let registry = test_registry();

        let record = registry
            .shorten(
                ShortenParams::new("https://example.com")
                    .with_token("")
                    .with_expiry(""),
            )
            .await
            .unwrap();

        assert_eq!(record.shortcode().as_str(), "AAAAAA");
        assert_eq!(record.expiry_minutes(), 30);
    }

    #[tokio::test]
    async fn validation_runs_in_order() {
        let registry = test_registry();

        // bad url wins over bad expiry and bad token
        let err = registry
            .shorten(
                ShortenParams::new("ftp://example.com")
                    .with_token("x")
                    .with_expiry("0"),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Validation(ValidationError::InvalidUrl(_))
        ));

        let err = registry
            .shorten(
                ShortenParams::new("https://example.com")
                    .with_token("x")
                    .with_expiry("0"),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Validation(ValidationError::InvalidExpiry(_))
        ));

        let err = registry
            .shorten(ShortenParams::new("https://example.com").with_token("ab"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Validation(ValidationError::InvalidShortCode(_))
        ));

        assert!(registry.list().await.is_empty());
    }

    #[tokio::test]
    async fn token_is_checked_as_typed() {
        let registry = test_registry();

        for token in [" promo ", "   ", "promo\n"] {
            let err = registry
                .shorten(ShortenParams::new("https://example.com").with_token(token))
                .await
                .unwrap_err();
            assert!(
                matches!(
                    err,
                    RegistryError::Validation(ValidationError::InvalidShortCode(_))
                ),
                "token {token:?}"
            );
        }

        assert!(registry.list().await.is_empty());
    }
}
