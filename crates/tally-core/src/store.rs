//! File-backed entry store
//!
//! The whole collection is one JSON array in one file; every mutation
//! reads the file, rewrites the collection in memory, and writes the
//! file back. There is no lock around that cycle, so concurrent writers
//! can lose updates (last writer wins). That is an accepted limitation
//! of the single-user scope, not something handlers work around.

use crate::error::StoreResult;
use crate::models::Entry;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;

/// Shared handle to an entry store
pub type StoreRef = Arc<dyn EntryStore>;

/// Persistence contract for the entry collection
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Create the backing file (and parent directory) when missing. Idempotent.
    async fn ensure_initialized(&self) -> StoreResult<()>;

    /// Read the full collection, newest first
    ///
    /// A file that fails to parse, or does not hold an array, reads as
    /// an empty collection; the next write replaces it.
    async fn read_all(&self) -> StoreResult<Vec<Entry>>;

    /// Overwrite the backing file with the full collection, pretty-printed
    async fn write_all(&self, entries: &[Entry]) -> StoreResult<()>;

    /// Prepend an entry and persist; returns the updated collection
    async fn append(&self, entry: Entry) -> StoreResult<Vec<Entry>>;

    /// Remove the entry with the given id and persist
    ///
    /// Returns the surviving collection, or `None` without writing when
    /// no entry matched.
    async fn remove_by_id(&self, id: &str) -> StoreResult<Option<Vec<Entry>>>;

    /// Persist an empty collection unconditionally
    async fn clear(&self) -> StoreResult<()>;
}

/// Entry store over a single JSON file
///
/// The backing path is injected at construction.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store over the given entry file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl EntryStore for JsonFileStore {
    async fn ensure_initialized(&self) -> StoreResult<()> {
        if matches!(fs::try_exists(&self.path).await, Ok(true)) {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&self.path, "[]").await?;
        log::debug!("Created empty entry file at {}", self.path.display());
        Ok(())
    }

    async fn read_all(&self) -> StoreResult<Vec<Entry>> {
        self.ensure_initialized().await?;
        let content = fs::read_to_string(&self.path).await?;
        match serde_json::from_str::<Vec<Entry>>(&content) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                log::warn!(
                    "Entry file {} did not parse ({}); treating as empty",
                    self.path.display(),
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    async fn write_all(&self, entries: &[Entry]) -> StoreResult<()> {
        let content = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, content).await?;
        log::debug!("Wrote {} entries to {}", entries.len(), self.path.display());
        Ok(())
    }

    async fn append(&self, entry: Entry) -> StoreResult<Vec<Entry>> {
        let mut entries = self.read_all().await?;
        entries.insert(0, entry);
        self.write_all(&entries).await?;
        Ok(entries)
    }

    async fn remove_by_id(&self, id: &str) -> StoreResult<Option<Vec<Entry>>> {
        let mut entries = self.read_all().await?;
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        if entries.len() == before {
            return Ok(None);
        }
        self.write_all(&entries).await?;
        Ok(Some(entries))
    }

    async fn clear(&self) -> StoreResult<()> {
        self.write_all(&[]).await
    }
}
