//! [`LocalStore`] implementations.
//!
//! - [`MemoryStore`] — process-local map, used by tests and previews.
//! - [`FileStore`] — one JSON file per key under a directory, written with an
//!   atomic temp-file-then-rename so a failed write leaves the previous value
//!   intact.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::ports::{LocalStore, StoreError};

// ── MemoryStore ───────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with one entry.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::default();
        if let Ok(mut entries) = store.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        store
    }

    /// Synchronous peek, for assertions.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }
}

#[async_trait]
impl LocalStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StoreError::Read(format!("store lock poisoned: {e}")))?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StoreError::Write(format!("store lock poisoned: {e}")))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StoreError::Write(format!("store lock poisoned: {e}")))?;
        entries.remove(key);
        Ok(())
    }
}

// ── FileStore ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `<data dir>/jerseylab/store`
    pub fn default_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_default()
            .join("jerseylab")
            .join("store")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`. Characters outside `[A-Za-z0-9_-]` become `_` so a
    /// key can never escape the store directory.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }
}

#[async_trait]
impl LocalStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Read(e.to_string())),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StoreError::Write(format!("cannot create store dir: {e}")))?;

        let path = self.path_for(key);
        let tmp_path = path.with_extension("json.tmp");

        if let Err(e) = tokio::fs::write(&tmp_path, value).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(StoreError::Write(format!("cannot write temp file: {e}")));
        }

        if let Err(e) = tokio::fs::rename(&tmp_path, &path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(StoreError::Write(format!(
                "rename to final path failed: {e}"
            )));
        }
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Write(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> FileStore {
        let dir = std::env::temp_dir().join(format!("jerseylab_store_{name}"));
        let _ = std::fs::remove_dir_all(&dir);
        FileStore::new(dir)
    }

    #[tokio::test]
    async fn memory_store_set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").await.unwrap(), None);
        store.set("k", "v").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
        store.remove("k").await.unwrap();
        assert_eq!(store.peek("k"), None);
    }

    #[tokio::test]
    async fn file_store_round_trip() {
        let store = temp_store("round_trip");
        store.set("personalization-1", "{\"a\":1}").await.expect("set");
        let got = store.get("personalization-1").await.expect("get");
        assert_eq!(got.as_deref(), Some("{\"a\":1}"));
        assert!(!store
            .path_for("personalization-1")
            .with_extension("json.tmp")
            .exists());
        let _ = std::fs::remove_dir_all(store.dir());
    }

    #[tokio::test]
    async fn file_store_missing_key_reads_none_and_removes_cleanly() {
        let store = temp_store("missing");
        assert_eq!(store.get("nope").await.expect("get"), None);
        store.remove("nope").await.expect("remove of a missing key is a no-op");
    }

    #[tokio::test]
    async fn file_store_overwrite_replaces_whole_value() {
        let store = temp_store("overwrite");
        store.set("k", "first value, longer").await.unwrap();
        store.set("k", "second").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("second"));
        let _ = std::fs::remove_dir_all(store.dir());
    }

    #[test]
    fn keys_cannot_escape_the_store_dir() {
        let store = FileStore::new("/tmp/jerseylab");
        let path = store.path_for("../../etc/passwd");
        assert_eq!(path.parent(), Some(Path::new("/tmp/jerseylab")));
    }

    #[tokio::test]
    async fn failed_write_keeps_previous_value() {
        let store = temp_store("failed_write");
        store.set("k", "old").await.unwrap();
        // A directory squatting on the temp path makes the temp write fail.
        let tmp = store.path_for("k").with_extension("json.tmp");
        std::fs::create_dir_all(&tmp).unwrap();
        let result = store.set("k", "new").await;
        assert!(matches!(result, Err(StoreError::Write(_))));
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("old"));
        let _ = std::fs::remove_dir_all(store.dir());
    }
}
