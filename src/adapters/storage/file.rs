//! File-backed key-value store
//!
//! Entries are kept in memory and written through to a single JSON object
//! on every change. Writes go to a sibling temporary file which is then
//! renamed over the target, so a crash never leaves a half-written store.

use super::traits::{KeyValueStore, StorageResult};
use crate::domain::errors::StorageError;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// JSON document store on local disk
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Opens the store at `path`, loading existing entries
    ///
    /// A missing file is an empty store. A file that is not a JSON object
    /// of strings is reported as [`StorageError::Corrupt`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = read_entries(&path)?;

        tracing::debug!(
            path = %path.display(),
            entries = entries.len(),
            "Opened file store"
        );

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Opens the store, discarding a corrupt file instead of failing
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or replaced.
    pub fn open_or_reset(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        match Self::open(path) {
            Err(StorageError::Corrupt(reason)) => {
                tracing::warn!(
                    path = %path.display(),
                    reason = %reason,
                    "Session store is corrupt, starting empty"
                );
                let store = Self {
                    path: path.to_path_buf(),
                    entries: Mutex::new(BTreeMap::new()),
                };
                store.persist(&BTreeMap::new())?;
                Ok(store)
            }
            other => other,
        }
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn update<T>(&self, f: impl FnOnce(&mut BTreeMap<String, String>) -> T) -> StorageResult<T> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = entries.clone();
        let out = f(&mut next);
        if next != *entries {
            self.persist(&next)?;
            *entries = next;
        }
        Ok(out)
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> StorageResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                StorageError::Write(format!("cannot create {}: {e}", parent.display()))
            })?;
        }

        let body = serde_json::to_vec_pretty(entries)
            .map_err(|e| StorageError::Write(e.to_string()))?;

        let tmp_path = self.path.with_extension("tmp");
        let mut file = open_private(&tmp_path)
            .map_err(|e| StorageError::Write(format!("{}: {e}", tmp_path.display())))?;
        file.write_all(&body)
            .and_then(|_| file.sync_all())
            .map_err(|e| StorageError::Write(format!("{}: {e}", tmp_path.display())))?;

        fs::rename(&tmp_path, &self.path)
            .map_err(|e| StorageError::Write(format!("{}: {e}", self.path.display())))
    }
}

fn read_entries(path: &Path) -> StorageResult<BTreeMap<String, String>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(e) => return Err(StorageError::Read(format!("{}: {e}", path.display()))),
    };

    if contents.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    serde_json::from_str(&contents)
        .map_err(|e| StorageError::Corrupt(format!("{}: {e}", path.display())))
}

#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;

    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.update(|entries| {
            entries.remove(key);
        })
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.keys().cloned().collect())
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
