use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use warren_core::{AliasTable, StorageError, Store};

/// Namespace key the table is stored under unless configured otherwise.
pub const DEFAULT_NAMESPACE: &str = "url_shortener_db_v1";

/// A [`Store`] that keeps the whole table as one JSON document on disk.
///
/// The document lives at `<dir>/<namespace>.json`. Saves go to a sibling
/// temporary file first and are renamed into place, so a failed write never
/// leaves a half-written document behind.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store for `namespace` inside `dir`.
    pub fn new(dir: impl AsRef<Path>, namespace: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{namespace}.json")),
        }
    }

    /// Creates a store for the default namespace inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir, DEFAULT_NAMESPACE)
    }

    /// Returns the path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

#[async_trait]
impl Store for JsonFileStore {
    async fn load(&self) -> Result<AliasTable, StorageError> {
        trace!(path = %self.path.display(), "loading alias table");

        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(AliasTable::new()),
            Err(e) => {
                return Err(StorageError::Corrupt(format!(
                    "failed to read {}: {e}",
                    self.path.display()
                )))
            }
        };

        if raw.trim().is_empty() {
            return Ok(AliasTable::new());
        }

        serde_json::from_str(&raw).map_err(|e| {
            StorageError::Corrupt(format!("failed to parse {}: {e}", self.path.display()))
        })
    }

    async fn save(&self, table: &AliasTable) -> Result<(), StorageError> {
        let document = serde_json::to_vec(table)
            .map_err(|e| StorageError::WriteFailed(format!("failed to serialize table: {e}")))?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::WriteFailed(format!("failed to create {}: {e}", parent.display()))
            })?;
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, &document).await.map_err(|e| {
            StorageError::WriteFailed(format!("failed to write {}: {e}", temp.display()))
        })?;
        tokio::fs::rename(&temp, &self.path).await.map_err(|e| {
            StorageError::WriteFailed(format!("failed to replace {}: {e}", self.path.display()))
        })?;

        debug!(path = %self.path.display(), records = table.len(), "saved alias table");
        Ok(())
    }
}
