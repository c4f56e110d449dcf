//! Storage factory
//!
//! This module creates the key-value store selected by configuration.

use super::file::FileStore;
use super::memory::MemoryStore;
use super::traits::{KeyValueStore, StorageResult};
use crate::config::schema::{StorageBackend, StorageConfig};
use std::sync::Arc;

/// Create a key-value store based on the configuration
///
/// # Errors
///
/// Returns an error if the file backend cannot read or reset its file
pub fn create_store(config: &StorageConfig) -> StorageResult<Arc<dyn KeyValueStore>> {
    match config.backend {
        StorageBackend::File => {
            tracing::debug!(path = %config.path, "Creating file store");
            let store = FileStore::open_or_reset(&config.path)?;
            Ok(Arc::new(store) as Arc<dyn KeyValueStore>)
        }
        StorageBackend::Memory => {
            tracing::debug!("Creating in-memory store");
            Ok(Arc::new(MemoryStore::new()) as Arc<dyn KeyValueStore>)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_backend() {
        let config = StorageConfig {
            backend: StorageBackend::Memory,
            ..StorageConfig::default()
        };
        let store = create_store(&config).unwrap();
        assert_eq!(store.backend_name(), "memory");
    }

    #[test]
    fn test_file_backend() {
        let dir = TempDir::new().unwrap();
        let config = StorageConfig {
            backend: StorageBackend::File,
            path: dir.path().join("s.json").to_string_lossy().to_string(),
            ..StorageConfig::default()
        };
        let store = create_store(&config).unwrap();
        assert_eq!(store.backend_name(), "file");
        store.set("auth_token", "x").unwrap();
        assert!(dir.path().join("s.json").exists());
    }
}
