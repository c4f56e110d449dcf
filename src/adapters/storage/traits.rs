//! Key-value storage abstraction
//!
//! The session layer persists its entries through this trait so the backing
//! store (a JSON file on disk or process memory) can be chosen from
//! configuration and swapped for tests.

use crate::domain::errors::StorageError;

/// Result type for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// String-keyed, string-valued store
///
/// Implementations must be safe to share between tasks; every call is
/// short and synchronous.
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes `key`; removing an absent key is not an error
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn remove(&self, key: &str) -> StorageResult<()>;

    /// Every key currently stored, sorted
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn keys(&self) -> StorageResult<Vec<String>>;

    /// Short backend name for logs
    fn backend_name(&self) -> &'static str;
}
