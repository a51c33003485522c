//! The key/value store abstraction and its in-memory implementation.

use crate::error::{Result, StoreError};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Durable string key/value storage, modelled on browser `localStorage`.
///
/// Values are opaque strings; typed access goes through [`crate::json`].
/// Implementations must be safe to share between cards (`Send + Sync`), and
/// every method takes `&self` so one store can back many cards at once.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `None` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Shared handle to a store, as held by every card.
pub type SharedStore = Arc<dyn KeyValueStore>;

/// In-memory store implementation.
///
/// Useful for tests and for hosts without durable storage. An optional byte
/// quota reproduces the "quota exceeded" failure of browser storage.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
    quota: Option<usize>,
    disabled: bool,
}

impl MemoryStore {
    /// Create a new empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that rejects writes once keys plus values exceed `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota: Some(bytes),
            ..Self::default()
        }
    }

    /// Create a store that fails every operation, like storage disabled by policy.
    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Self::default()
        }
    }

    /// Wrap this store into a [`SharedStore`] handle.
    pub fn shared(self) -> SharedStore {
        Arc::new(self)
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_enabled(&self) -> Result<()> {
        if self.disabled {
            Err(StoreError::Unavailable)
        } else {
            Ok(())
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.check_enabled()?;
        let entries = self
            .entries
            .read()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;

        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.check_enabled()?;
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;

        if let Some(limit) = self.quota {
            let used: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = used + key.len() + value.len();
            if needed > limit {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    limit,
                });
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.check_enabled()?;
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;

        entries.remove(key);
        Ok(())
    }
}
