//! Durable session store backed by a single JSON file.
//!
//! The whole store is one flat `{ key: value }` map. Saves go through a
//! temporary file plus atomic rename so a crash mid-write never leaves a
//! truncated store behind. Writers are serialized behind an in-process lock;
//! the client follows the single-writer model (one session-mutating call per
//! user action), so no cross-process locking is attempted.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use clanhall_core::error::{ApiError, Result};
use clanhall_core::session::store::SessionStore;
use tracing::debug;

use crate::paths::ClanhallPaths;

/// File-backed [`SessionStore`] holding the persisted session map.
pub struct JsonFileSessionStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl JsonFileSessionStore {
    /// Opens the store at the default location
    /// (`~/.config/clanhall/session.json`).
    pub fn open_default() -> Result<Self> {
        Self::open(ClanhallPaths::session_file()?)
    }

    /// Opens the store at a custom path (also used by tests).
    ///
    /// A missing or empty file yields an empty store; it is created on the
    /// first write.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = Self::load(&path)?;
        debug!(path = %path.display(), entries = entries.len(), "opened session store");

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Returns the path backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> Result<HashMap<String, String>> {
        if !path.exists() {
            return Ok(HashMap::new());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| ApiError::store(format!("failed to read {}: {}", path.display(), e)))?;

        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }

        let entries = serde_json::from_str(&content)?;
        Ok(entries)
    }

    /// Writes the full map to disk via tmp file + atomic rename.
    fn flush(&self, entries: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    ApiError::store(format!("failed to create {}: {}", parent.display(), e))
                })?;
            }
        }

        let json = serde_json::to_string_pretty(entries)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)
            .map_err(|e| ApiError::store(format!("failed to create temp file: {}", e)))?;
        tmp_file
            .write_all(json.as_bytes())
            .map_err(|e| ApiError::store(format!("failed to write temp file: {}", e)))?;

        // Data must be on disk before the rename makes it visible.
        tmp_file
            .sync_all()
            .map_err(|e| ApiError::store(format!("failed to sync temp file: {}", e)))?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)
            .map_err(|e| ApiError::store(format!("failed to replace session file: {}", e)))?;

        Ok(())
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| ApiError::store("session path has no parent directory"))?;
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| ApiError::store("session path has no file name"))?;

        Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
    }
}

impl SessionStore for JsonFileSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| ApiError::store("session store lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| ApiError::store("session store lock poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| ApiError::store("session store lock poisoned"))?;
        if entries.remove(key).is_some() {
            self.flush(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clanhall_core::session::store::keys;
    use tempfile::TempDir;

    #[test]
    fn test_set_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileSessionStore::open(temp_dir.path().join("session.json")).unwrap();

        store.set(keys::AUTH_TOKEN, "tok1").unwrap();
        store.set(keys::REFRESH_TOKEN, "ref1").unwrap();

        assert_eq!(
            store.get(keys::AUTH_TOKEN).unwrap(),
            Some("tok1".to_string())
        );
        assert_eq!(
            store.get(keys::REFRESH_TOKEN).unwrap(),
            Some("ref1".to_string())
        );
    }

    #[test]
    fn test_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");

        {
            let store = JsonFileSessionStore::open(&path).unwrap();
            store.set(keys::AUTH_TOKEN, "tok1").unwrap();
        }

        let store = JsonFileSessionStore::open(&path).unwrap();
        assert_eq!(
            store.get(keys::AUTH_TOKEN).unwrap(),
            Some("tok1".to_string())
        );
    }

    #[test]
    fn test_remove() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileSessionStore::open(temp_dir.path().join("session.json")).unwrap();

        store.set(keys::AUTH_TOKEN, "tok1").unwrap();
        store.remove(keys::AUTH_TOKEN).unwrap();
        assert_eq!(store.get(keys::AUTH_TOKEN).unwrap(), None);

        // Removing an absent key is not an error.
        store.remove(keys::AUTH_TOKEN).unwrap();
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileSessionStore::open(temp_dir.path().join("nonexistent.json")).unwrap();
        assert_eq!(store.get(keys::AUTH_TOKEN).unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(JsonFileSessionStore::open(&path).is_err());
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        let store = JsonFileSessionStore::open(&path).unwrap();

        store.set(keys::AUTH_TOKEN, "tok1").unwrap();

        assert!(path.exists());
        assert!(!temp_dir.path().join(".session.json.tmp").exists());
    }

    #[test]
    fn test_double_set_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        let store = JsonFileSessionStore::open(&path).unwrap();

        store.set(keys::AUTH_TOKEN, "tok1").unwrap();
        let first = fs::read_to_string(&path).unwrap();
        store.set(keys::AUTH_TOKEN, "tok1").unwrap();
        let second = fs::read_to_string(&path).unwrap();

        assert_eq!(first, second);
    }
}
