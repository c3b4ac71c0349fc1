use crate::error::StorageError;
use crate::record::AliasRecord;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// The whole alias table, keyed by short code.
///
/// Each key always equals the `shortcode` of the record stored under it;
/// documents breaking that rule fail to deserialize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AliasTable {
    records: BTreeMap<ShortCode, AliasRecord>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, code: &str) -> Option<&AliasRecord> {
        self.records.get(code)
    }

    pub fn get_mut(&mut self, code: &str) -> Option<&mut AliasRecord> {
        self.records.get_mut(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.records.contains_key(code)
    }

    /// Inserts a record under its own short code.
    ///
    /// Returns the record back if the key is already taken; the table is left
    /// untouched in that case.
    pub fn insert_new(&mut self, record: AliasRecord) -> Result<(), AliasRecord> {
        if self.contains(record.shortcode().as_str()) {
            return Err(record);
        }
        self.records.insert(record.shortcode().clone(), record);
        Ok(())
    }

    pub fn remove(&mut self, code: &str) -> Option<AliasRecord> {
        self.records.remove(code)
    }

    pub fn records(&self) -> impl Iterator<Item = &AliasRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'de> Deserialize<'de> for AliasTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let records = BTreeMap::<ShortCode, AliasRecord>::deserialize(deserializer)?;

        let mismatched = records
            .iter()
            .find(|(key, record)| *key != record.shortcode());
        if let Some((key, record)) = mismatched {
            return Err(D::Error::custom(format!(
                "key '{key}' holds the record of '{}'",
                record.shortcode()
            )));
        }

        Ok(Self { records })
    }
}

/// Durable home of the alias table.
///
/// Backends read and write the table as a whole; there are no partial updates.
#[async_trait]
pub trait Store: Send + Sync + 'static {
    /// Reads the whole table. A missing document is an empty table, not an error.
    async fn load(&self) -> Result<AliasTable, StorageError>;

    /// Replaces the persisted table with `table`.
    async fn save(&self, table: &AliasTable) -> Result<(), StorageError>;
}
