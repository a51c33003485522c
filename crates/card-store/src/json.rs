//! Typed access to a [`KeyValueStore`] that never fails.
//!
//! Persisted UI preferences are a convenience: when storage is full, disabled
//! or holds garbage, the feature falls back to its in-memory default. These
//! helpers implement that policy once, logging every swallowed error.

use crate::error::{Result, StoreError};
use crate::store::KeyValueStore;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

/// Read and decode a JSON value, strictly.
pub fn try_read_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    match store.get(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Json {
                key: key.to_string(),
                source,
            }),
        None => Ok(None),
    }
}

/// Read a JSON value; absent, unreadable and malformed values all yield `None`.
pub fn read_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    match try_read_json(store, key) {
        Ok(value) => value,
        Err(e) => {
            warn!("Ignoring persisted value for {}: {}", key, e);
            None
        }
    }
}

/// Encode and store a JSON value. Returns `false` if the write was dropped.
pub fn write_json<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) -> bool {
    let encoded = match serde_json::to_string(value) {
        Ok(encoded) => encoded,
        Err(e) => {
            warn!("Failed to encode value for {}: {}", key, e);
            return false;
        }
    };
    write_string(store, key, &encoded)
}

/// Read a plain string value; errors yield `None`.
pub fn read_string(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            warn!("Failed to read {}: {}", key, e);
            None
        }
    }
}

/// Store a plain string value. Returns `false` if the write was dropped.
pub fn write_string(store: &dyn KeyValueStore, key: &str, value: &str) -> bool {
    match store.set(key, value) {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to persist {}: {}", key, e);
            false
        }
    }
}

/// Remove a key. Returns `false` if the removal failed.
pub fn remove_key(store: &dyn KeyValueStore, key: &str) -> bool {
    match store.remove(key) {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to remove {}: {}", key, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_read_missing_is_none() {
        let store = MemoryStore::new();
        assert_eq!(read_json::<Vec<String>>(&store, "nothing"), None);
        assert_eq!(read_string(&store, "nothing"), None);
    }

    #[test]
    fn test_json_array() {
        let store = MemoryStore::new();
        assert!(write_json(&store, "k", &vec!["a", "b"]));
        assert_eq!(store.get("k").unwrap().as_deref(), Some(r#"["a","b"]"#));
        assert_eq!(
            read_json::<Vec<String>>(&store, "k"),
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_corrupt_json_is_none() {
        let store = MemoryStore::new();
        store.set("k", "{not json").unwrap();
        assert_eq!(read_json::<Vec<String>>(&store, "k"), None);
        assert!(matches!(
            try_read_json::<Vec<String>>(&store, "k"),
            Err(StoreError::Json { .. })
        ));

        // Valid JSON, wrong shape
        store.set("k", r#"{"a": 1}"#).unwrap();
        assert_eq!(read_json::<Vec<String>>(&store, "k"), None);
    }

    #[test]
    fn test_failures_are_swallowed() {
        let store = MemoryStore::disabled();
        assert_eq!(read_json::<Vec<String>>(&store, "k"), None);
        assert!(!write_json(&store, "k", &vec!["a"]));
        assert!(!write_string(&store, "k", "v"));
        assert!(!remove_key(&store, "k"));

        let full = MemoryStore::with_quota(4);
        assert!(!write_string(&full, "key", "value"));
        assert_eq!(read_string(&full, "key"), None);
    }
}
