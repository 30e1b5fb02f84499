//! Key-value persistence backed by the filesystem.
//!
//! One file per key under the data directory. Values are opaque strings;
//! callers serialize their own structured data as JSON. Last write wins,
//! no transactions.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// String key-value store. `get` of a missing key is `Ok(None)`; I/O
/// failures surface as errors.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Filesystem store: each key becomes `<key>.json` in the store directory.
pub struct FsStore {
    dir: PathBuf,
}

impl FsStore {
    /// Open (and create if needed) a store rooted at the given directory.
    pub fn open(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create store dir: {}", dir.display()))?;
        tracing::debug!("FsStore opened at {}", dir.display());
        Ok(Self { dir })
    }

    /// Store directory path.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are short identifiers; anything filename-hostile is mapped away.
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

impl KvStore for FsStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => {
                Err(e).with_context(|| format!("failed to read store key: {}", path.display()))
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        fs::write(&path, value)
            .with_context(|| format!("failed to write store key: {}", path.display()))
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("failed to remove store key: {}", path.display()))
            }
        }
    }
}

/// In-memory store for tests and headless flows.
#[derive(Default)]
pub struct MemStore {
    map: Mutex<HashMap<String, String>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let map = self.map.lock().expect("store mutex poisoned");
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.map.lock().expect("store mutex poisoned");
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut map = self.map.lock().expect("store mutex poisoned");
        map.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fs_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::open(dir.path().to_path_buf()).unwrap();

        assert!(store.get("cachedQuotes").unwrap().is_none());
        store.set("cachedQuotes", "[1,2,3]").unwrap();
        assert_eq!(store.get("cachedQuotes").unwrap().unwrap(), "[1,2,3]");

        store.remove("cachedQuotes").unwrap();
        assert!(store.get("cachedQuotes").unwrap().is_none());
    }

    #[test]
    fn test_fs_store_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::open(dir.path().to_path_buf()).unwrap();

        store.set("quoteCounter", "1").unwrap();
        store.set("quoteCounter", "2").unwrap();
        assert_eq!(store.get("quoteCounter").unwrap().unwrap(), "2");
    }

    #[test]
    fn test_fs_store_remove_missing_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::open(dir.path().to_path_buf()).unwrap();
        store.remove("neverSet").unwrap();
    }

    #[test]
    fn test_fs_store_sanitizes_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::open(dir.path().to_path_buf()).unwrap();

        store.set("a/b:c", "x").unwrap();
        assert_eq!(store.get("a/b:c").unwrap().unwrap(), "x");
        // The file lands inside the store dir, not in a subdirectory.
        assert!(dir.path().join("a_b_c.json").exists());
    }

    #[test]
    fn test_mem_store_roundtrip() {
        let store = MemStore::new();
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().unwrap(), "v");
        store.remove("k").unwrap();
        assert!(store.get("k").unwrap().is_none());
    }
}
