//! Namespaced key-value persistence
//!
//! [`Storage`] is the adapter the rest of the crate uses. It prefixes every key with
//! `notex_`, stores strings verbatim and everything else as JSON, and never fails a
//! read: absent or undecodable values fall back to the caller's default.

use parking_lot::Mutex;
use serde::{Serialize, de::DeserializeOwned};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::StorageError;

/// Prefix applied to every key
pub const KEY_PREFIX: &str = "notex_";

/// Raw string key-value store
pub trait KeyValueStore: Send + Sync {
    fn get_raw(&self, key: &str) -> Option<String>;
    fn set_raw(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process store; contents are lost when dropped
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Durable store backed by a single JSON object file.
///
/// Every write rewrites the file through a temp file and a rename, so a crash
/// leaves either the old or the new contents on disk.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// File name used inside the data directory
    pub const FILE_NAME: &'static str = "store.json";

    /// Default data directory
    pub fn default_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("notex")
    }

    /// Open (or create) the store inside `dir`
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(Self::FILE_NAME);

        let entries = if path.exists() {
            let content = fs::read_to_string(&path)?;
            match serde_json::from_str::<BTreeMap<String, String>>(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(
                        "Ignoring unreadable store file {}: {}",
                        path.display(),
                        e
                    );
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        tracing::debug!("Wrote {} keys to {}", entries.len(), self.path.display());
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get_raw(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock();
        let previous = entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.flush(&entries) {
            // Keep memory and disk in agreement
            match previous {
                Some(old) => entries.insert(key.to_string(), old),
                None => entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }
}

/// Namespaced, JSON-encoding adapter over a [`KeyValueStore`]. Cheap to clone.
#[derive(Clone)]
pub struct Storage {
    backend: Arc<dyn KeyValueStore>,
}

impl Storage {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Storage that only lives as long as the process
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    fn namespaced(key: &str) -> String {
        format!("{}{}", KEY_PREFIX, key)
    }

    /// Persist a value. Strings are written verbatim, anything else as JSON.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = match serde_json::to_value(value)? {
            serde_json::Value::String(s) => s,
            other => serde_json::to_string(&other)?,
        };
        self.backend.set_raw(&Self::namespaced(key), &raw)
    }

    /// Read a value, or `default` when it is absent or cannot be decoded.
    ///
    /// A stored value that is not valid JSON is retried as a bare string, so
    /// verbatim strings round-trip.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let Some(raw) = self.backend.get_raw(&Self::namespaced(key)) else {
            return default;
        };
        if raw.is_empty() {
            return default;
        }

        if let Ok(value) = serde_json::from_str::<T>(&raw) {
            return value;
        }

        match serde_json::from_value::<T>(serde_json::Value::String(raw)) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!("Falling back to default for {}: {}", key, e);
                default
            }
        }
    }

    /// Raw stored string, bypassing decoding
    pub fn raw(&self, key: &str) -> Option<String> {
        self.backend.get_raw(&Self::namespaced(key))
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage").finish_non_exhaustive()
    }
}
