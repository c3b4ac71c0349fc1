use async_trait::async_trait;
use parking_lot::RwLock;
use warren_core::{AliasTable, StorageError, Store};

/// In-memory implementation of the [`Store`] trait.
///
/// Holds one snapshot of the table; `load` hands out a copy and `save`
/// replaces it wholesale, mirroring a document store.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    table: RwLock<AliasTable>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `table`.
    pub fn with_table(table: AliasTable) -> Self {
        Self {
            table: RwLock::new(table),
        }
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn load(&self) -> Result<AliasTable, StorageError> {
        Ok(self.table.read().clone())
    }

    async fn save(&self, table: &AliasTable) -> Result<(), StorageError> {
        *self.table.write() = table.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::Timestamp;
    use warren_core::{AliasRecord, ShortCode};

    fn record(code: &str, url: &str) -> AliasRecord {
        AliasRecord::new(
            ShortCode::new(code).unwrap(),
            url,
            Timestamp::from_second(1_700_000_000).unwrap(),
            30,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn empty_store_loads_empty_table() {
        let store = InMemoryStore::new();
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_then_load() {
        let store = InMemoryStore::new();
        let mut table = AliasTable::new();
        table.insert_new(record("abc123", "https://example.com")).unwrap();

        store.save(&table).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, table);
        assert_eq!(
            loaded.get("abc123").unwrap().long_url(),
            "https://example.com"
        );
    }

    #[tokio::test]
    async fn loaded_copy_is_detached() {
        let store = InMemoryStore::new();
        let mut table = store.load().await.unwrap();
        table.insert_new(record("abc123", "https://example.com")).unwrap();

        // not saved, so the store is unchanged
        assert!(store.load().await.unwrap().is_empty());
    }
}
