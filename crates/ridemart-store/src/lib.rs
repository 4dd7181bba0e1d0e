//! Durable key-value storage
//!
//! Values are JSON-serialized strings under string keys, mirroring a
//! browser's local storage. Every write overwrites the whole value for its
//! key; there are no partial or merge writes.

pub mod file;
pub mod json;
pub mod keys;
pub mod memory;

pub use file::FileKeyValueStore;
pub use json::{load_or_default, read_json, save_json};
pub use memory::MemoryKeyValueStore;

use ridemart_types::StorageError;

/// String-keyed get/set/remove store
pub trait KeyValueStore: Send + Sync {
    /// Get the raw value for a key
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value for a key
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a key; removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
