//! Typed JSON access on top of a [`KeyValueStore`]

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use ridemart_types::StorageError;

use crate::KeyValueStore;

/// Read and decode a value. Missing key yields `Ok(None)`.
pub fn read_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| StorageError::Corrupt {
            key: key.to_string(),
            reason: e.to_string(),
        })
}

/// Read and decode a value, falling back to `T::default()` when the key is
/// missing, the value is corrupt, or the store is unavailable.
pub fn load_or_default<T: DeserializeOwned + Default>(store: &dyn KeyValueStore, key: &str) -> T {
    match read_json(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            warn!(key, error = %e, "falling back to empty value");
            T::default()
        }
    }
}

/// Encode and overwrite a value
pub fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|e| StorageError::Serialize {
        key: key.to_string(),
        reason: e.to_string(),
    })?;
    store.set(key, &raw)
}
