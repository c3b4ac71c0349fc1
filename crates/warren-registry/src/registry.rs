use crate::error::RegistryError;
use crate::settings::RegistrySettings;
use std::sync::Arc;
use tracing::{info, warn};
use warren_core::validation::{check_expiry_minutes, is_valid_url, normalize_url};
use warren_core::{AliasRecord, AliasTable, Clock, ShortCode, Store, ValidationError};
use warren_generator::{Allocator, Generator};
use warren_storage::{Commit, Table};

/// Owner of the create/read/list/delete operations over alias records.
///
/// The registry wraps a shared [`Table`] and an [`Allocator`] to handle:
/// - URL normalization and validation
/// - expiry defaults and bounds
/// - short code allocation (auto-generated or jumbled custom tokens)
/// - the final check-then-insert, run inside one table transaction
pub struct AliasRegistry<S, G, C> {
    table: Table<S>,
    allocator: Arc<Allocator<G>>,
    clock: Arc<C>,
    settings: RegistrySettings,
}

impl<S, G, C> Clone for AliasRegistry<S, G, C> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            allocator: Arc::clone(&self.allocator),
            clock: Arc::clone(&self.clock),
            settings: self.settings,
        }
    }
}

/// How the short code of a new record is chosen.
enum CodeChoice<'a> {
    Exact(ShortCode),
    Generated,
    Jumbled(&'a str),
}

impl<S: Store, G: Generator, C: Clock> AliasRegistry<S, G, C> {
    /// Creates a registry with default settings.
    pub fn new(table: Table<S>, generator: G, clock: C) -> Self {
        Self::assemble(table, generator, clock, RegistrySettings::default())
    }

    /// Creates a registry with custom settings, rejecting any that could
    /// produce malformed codes.
    pub fn with_settings(
        table: Table<S>,
        generator: G,
        clock: C,
        settings: RegistrySettings,
    ) -> Result<Self, RegistryError> {
        settings.validate()?;
        Ok(Self::assemble(table, generator, clock, settings))
    }

    fn assemble(table: Table<S>, generator: G, clock: C, settings: RegistrySettings) -> Self {
        Self {
            table,
            allocator: Arc::new(Allocator::new(generator)),
            clock: Arc::new(clock),
            settings,
        }
    }

    pub fn settings(&self) -> &RegistrySettings {
        &self.settings
    }

    /// Current time according to the registry's clock.
    pub fn now(&self) -> jiff::Timestamp {
        self.clock.now()
    }

    /// Creates a new alias record.
    ///
    /// With `code = None` a fresh code is allocated; otherwise `code` is used
    /// as-is and the call fails with [`RegistryError::Collision`] if it is
    /// already taken. `expiry_minutes = None` applies the default expiry.
    pub async fn create(
        &self,
        code: Option<ShortCode>,
        long_url: &str,
        expiry_minutes: Option<u32>,
    ) -> Result<AliasRecord, RegistryError> {
        let choice = match code {
            Some(code) => CodeChoice::Exact(code),
            None => CodeChoice::Generated,
        };
        self.insert(choice, long_url, expiry_minutes).await
    }

    /// Creates a record whose code is `token` plus a random suffix.
    ///
    /// `token` must itself be a valid short code; a blank or malformed token
    /// fails with [`ValidationError::InvalidShortCode`] before anything is
    /// written. The suffix is re-drawn until the code is free, up to the
    /// configured number of attempts; after that the call fails with
    /// [`RegistryError::CollisionUnresolved`].
    pub async fn create_from_token(
        &self,
        token: &str,
        long_url: &str,
        expiry_minutes: Option<u32>,
    ) -> Result<AliasRecord, RegistryError> {
        self.insert(CodeChoice::Jumbled(token), long_url, expiry_minutes)
            .await
    }

    /// Returns the record stored under `code`, expired or not.
    pub async fn get(&self, code: &str) -> Option<AliasRecord> {
        self.table.read(|table| table.get(code).cloned()).await
    }

    /// Returns every record. No ordering is promised.
    pub async fn list(&self) -> Vec<AliasRecord> {
        self.table
            .read(|table| table.records().cloned().collect())
            .await
    }

    /// Removes the record stored under `code`.
    ///
    /// Returns `true` if the record existed and was removed. Deleting an
    /// unknown code writes nothing.
    pub async fn delete(&self, code: &str) -> Result<bool, RegistryError> {
        let removed = self
            .table
            .update(|table| {
                Ok::<_, RegistryError>(match table.remove(code) {
                    Some(_) => Commit::Save(true),
                    None => Commit::Discard(false),
                })
            })
            .await?;

        if removed {
            info!(code, "deleted alias");
        }
        Ok(removed)
    }

    async fn insert(
        &self,
        choice: CodeChoice<'_>,
        long_url: &str,
        expiry_minutes: Option<u32>,
    ) -> Result<AliasRecord, RegistryError> {
        let long_url = normalize_url(long_url.trim()).into_owned();
        if !is_valid_url(&long_url) {
            warn!(url = %long_url, "validation failed: invalid url");
            return Err(ValidationError::InvalidUrl(format!(
                "expected an absolute http(s) url: '{long_url}'"
            ))
            .into());
        }

        let minutes = match expiry_minutes {
            Some(minutes) => check_expiry_minutes(minutes).inspect_err(|_| {
                warn!(minutes, "validation failed: invalid expiry");
            })?,
            None => self.settings.default_expiry_minutes,
        };

        let created_at = self.clock.now();
        let record = self
            .table
            .update(|table| -> Result<_, RegistryError> {
                let code = self.pick_code(table, choice)?;
                let record = AliasRecord::new(code, long_url, created_at, minutes)?;
                table
                    .insert_new(record.clone())
                    .map_err(|taken| RegistryError::Collision(taken.shortcode().to_string()))?;
                Ok(Commit::Save(record))
            })
            .await
            .inspect_err(|e| match e {
                RegistryError::Collision(code) => {
                    warn!(code = %code, "short code already taken")
                }
                RegistryError::Validation(e) => {
                    warn!(error = %e, "validation failed: invalid short code")
                }
                _ => {}
            })?;

        info!(
            code = %record.shortcode(),
            url = %record.long_url(),
            expiry_minutes = minutes,
            "added alias"
        );
        Ok(record)
    }

    fn pick_code(
        &self,
        table: &AliasTable,
        choice: CodeChoice<'_>,
    ) -> Result<ShortCode, RegistryError> {
        let settings = &self.settings;
        let is_taken = |code: &str| table.contains(code);

        match choice {
            CodeChoice::Exact(code) => Ok(code),
            CodeChoice::Generated => Ok(self.allocator.generate_unique(
                settings.code_length,
                settings.max_attempts,
                is_taken,
            )?),
            CodeChoice::Jumbled(token) => Ok(self.allocator.jumble_unique(
                token,
                settings.jumble_suffix_length,
                settings.jumble_attempts,
                is_taken,
            )?),
        }
    }
}
