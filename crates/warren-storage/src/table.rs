use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, trace};
use warren_core::{AliasTable, StorageError, Store};

/// Outcome of a mutation closure passed to [`Table::update`].
#[derive(Debug)]
pub enum Commit<T> {
    /// Persist the mutated table, then return the value.
    Save(T),
    /// Return the value without writing anything.
    Discard(T),
}

/// The single-writer serialization point in front of a [`Store`].
///
/// Every load-mutate-save cycle runs while holding one async mutex, so a
/// check-then-insert or a click increment can never interleave with another
/// writer sharing the same `Table`. Clones share the store and the lock.
pub struct Table<S> {
    inner: Arc<Inner<S>>,
}

struct Inner<S> {
    store: S,
    writer: Mutex<()>,
}

impl<S> Clone for Table<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> std::fmt::Debug for Table<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table").finish_non_exhaustive()
    }
}

impl<S: Store> Table<S> {
    pub fn new(store: S) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                writer: Mutex::new(()),
            }),
        }
    }

    /// Runs `f` against a consistent snapshot of the table.
    pub async fn read<T>(&self, f: impl FnOnce(&AliasTable) -> T) -> T {
        let _guard = self.inner.writer.lock().await;
        let table = self.load_or_empty().await;
        f(&table)
    }

    /// Loads the table, lets `f` mutate it, and saves it if `f` asks to.
    ///
    /// The save only happens on [`Commit::Save`]; errors returned by `f`
    /// abort the cycle with nothing written.
    pub async fn update<T, E>(
        &self,
        f: impl FnOnce(&mut AliasTable) -> Result<Commit<T>, E>,
    ) -> Result<T, E>
    where
        E: From<StorageError>,
    {
        let _guard = self.inner.writer.lock().await;
        let mut table = self.load_or_empty().await;

        match f(&mut table)? {
            Commit::Save(value) => {
                self.inner.store.save(&table).await.map_err(|e| {
                    error!(error = %e, "failed to save alias table");
                    E::from(e)
                })?;
                Ok(value)
            }
            Commit::Discard(value) => Ok(value),
        }
    }

    /// A corrupt document is logged and treated as an empty table.
    async fn load_or_empty(&self) -> AliasTable {
        match self.inner.store.load().await {
            Ok(table) => {
                trace!(records = table.len(), "loaded alias table");
                table
            }
            Err(e) => {
                error!(error = %e, "failed to load alias table, continuing with an empty one");
                AliasTable::new()
            }
        }
    }
}
