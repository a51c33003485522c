//! File-backed store: the whole key/value map lives in one JSON object file.

use crate::error::{Result, StoreError};
use crate::store::KeyValueStore;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{debug, warn};

/// Durable store persisting to a single JSON file.
///
/// ## Algorithm
/// 1. On open, read the file into memory (missing file = empty store)
/// 2. Reads are served from memory
/// 3. Every `set`/`remove` rewrites the whole file, and only a successful
///    write is applied in memory
///
/// A file that is not a JSON object of strings is treated like corrupt
/// browser storage: it is logged and the store starts empty.
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<BTreeMap<String, String>>(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Ignoring corrupt store file {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(StoreError::Io(e)),
        };

        debug!("Opened store {} ({} keys)", path.display(), entries.len());
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let content = serde_json::to_string_pretty(entries).map_err(|source| StoreError::Json {
            key: self.path.display().to_string(),
            source,
        })?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;

        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;

        let mut updated = entries.clone();
        updated.insert(key.to_string(), value.to_string());
        self.flush(&updated)?;
        *entries = updated;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;

        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut updated = entries.clone();
        updated.remove(key);
        self.flush(&updated)?;
        *entries = updated;
        Ok(())
    }
}
