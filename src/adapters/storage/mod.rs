//! Client-side key-value storage
//!
//! - [`traits`] - The [`KeyValueStore`] abstraction
//! - [`file`] - JSON file on disk (default)
//! - [`memory`] - Process memory
//! - [`factory`] - Backend selection from configuration

pub mod factory;
pub mod file;
pub mod memory;
pub mod traits;

pub use factory::create_store;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use traits::{KeyValueStore, StorageResult};
