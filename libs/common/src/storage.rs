//! Persisted key/value storage for client session state
//!
//! This module plays the role browser storage plays for the web client: a
//! process-wide string store with last-write-wins semantics. Writers are
//! serialized through an async mutex; there are no transactions.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::error::StorageResult;

/// String key/value store
#[async_trait]
pub trait Storage: Send + Sync {
    /// Get a value by key
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Set a key, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete a key; deleting a missing key is not an error
    async fn remove(&self, key: &str) -> StorageResult<()>;

    /// Delete every key
    async fn clear(&self) -> StorageResult<()>;
}

/// In-process storage, lost when the process exits
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        self.entries.lock().await.remove(key);
        Ok(())
    }

    async fn clear(&self) -> StorageResult<()> {
        self.entries.lock().await.clear();
        Ok(())
    }
}

/// Storage backed by a single JSON object on disk
///
/// The file is re-read on every access so that separate invocations of the
/// client observe each other's writes.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl FileStorage {
    /// Open (lazily) the store at `path`; the file is created on first write
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        info!("File storage initialized at {}", path.display());
        Self {
            path,
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> StorageResult<BTreeMap<String, String>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&contents) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!(
                    "Ignoring unreadable storage file {}: {}",
                    self.path.display(),
                    e
                );
                Ok(BTreeMap::new())
            }
        }
    }

    async fn write_entries(&self, entries: &BTreeMap<String, String>) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let contents = serde_json::to_string_pretty(entries)?;
        tokio::fs::write(&self.path, contents).await?;
        Ok(())
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let _guard = self.lock.lock().await;
        Ok(self.read_entries().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_entries().await?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries).await
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_entries().await?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries).await?;
        }
        Ok(())
    }

    async fn clear(&self) -> StorageResult<()> {
        let _guard = self.lock.lock().await;
        self.write_entries(&BTreeMap::new()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_set_get_remove() -> StorageResult<()> {
        let storage = MemoryStorage::new();

        storage.set("hlopgToken", "abc").await?;
        assert_eq!(storage.get("hlopgToken").await?, Some("abc".to_string()));

        storage.set("hlopgToken", "def").await?;
        assert_eq!(storage.get("hlopgToken").await?, Some("def".to_string()));

        storage.remove("hlopgToken").await?;
        assert_eq!(storage.get("hlopgToken").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_file_storage_persists_across_instances() -> StorageResult<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested").join("storage.json");

        let first = FileStorage::new(&path);
        first.set("hlopgRole", "OWNER").await?;
        first.set("seenIntro", "true").await?;

        let second = FileStorage::new(&path);
        assert_eq!(second.get("hlopgRole").await?, Some("OWNER".to_string()));

        second.clear().await?;
        assert_eq!(first.get("seenIntro").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_file_storage_tolerates_corrupt_file() -> StorageResult<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "not json")?;

        let storage = FileStorage::new(&path);
        assert_eq!(storage.get("hlopgToken").await?, None);

        storage.set("hlopgToken", "t").await?;
        assert_eq!(storage.get("hlopgToken").await?, Some("t".to_string()));
        Ok(())
    }
}
