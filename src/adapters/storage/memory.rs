//! In-memory key-value store

use super::traits::{KeyValueStore, StorageResult};
use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

/// Store that lives only as long as the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn with_entries<T>(&self, f: impl FnOnce(&mut BTreeMap<String, String>) -> T) -> T {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut entries)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.with_entries(|entries| entries.get(key).cloned()))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.with_entries(|entries| entries.insert(key.to_string(), value.to_string()));
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.with_entries(|entries| entries.remove(key));
        Ok(())
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        Ok(self.with_entries(|entries| entries.keys().cloned().collect()))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
