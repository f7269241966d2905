//! FILENAME: core/persistence/src/store.rs
//! PURPOSE: String key/value storage standing in for browser local storage.
//! CONTEXT: Every setting lives under its own key as a plain string; there is
//! no schema version. Structured values (tour progress, goals) are stored as
//! JSON text through `load_json` / `save_json`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::PersistenceError;

pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
    fn remove(&mut self, key: &str) -> Result<(), PersistenceError>;
    fn keys(&self) -> Vec<String>;
}

// ============================================================================
// MEMORY STORE
// ============================================================================

/// Volatile store, used in tests and as a fallback when no data dir is usable.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

// ============================================================================
// FILE STORE
// ============================================================================

/// A JSON object on disk, `{ "key": "value", ... }`, rewritten on every change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let text = fs::read_to_string(&path)?;
            parse_entries(&text)?
        } else {
            BTreeMap::new()
        };
        Ok(FileStore { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(&self.entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn parse_entries(text: &str) -> Result<BTreeMap<String, String>, PersistenceError> {
    if text.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    let value: serde_json::Value = serde_json::from_str(text)?;
    let object = value
        .as_object()
        .ok_or_else(|| PersistenceError::InvalidFormat("storage file is not a JSON object".to_string()))?;

    // Hand-edited files may hold non-string values; keep their JSON text.
    Ok(object
        .iter()
        .map(|(k, v)| {
            let text = match v {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (k.clone(), text)
        })
        .collect())
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let previous = self.entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.flush() {
            // Memory must keep matching the file
            match previous {
                Some(old) => {
                    self.entries.insert(key.to_string(), old);
                }
                None => {
                    self.entries.remove(key);
                }
            }
            return Err(e);
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        if let Some(old) = self.entries.remove(key) {
            if let Err(e) = self.flush() {
                self.entries.insert(key.to_string(), old);
                return Err(e);
            }
        }
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

// ============================================================================
// JSON HELPERS
// ============================================================================

/// Read and decode a JSON-encoded key. Missing keys yield `Ok(None)`.
pub fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, PersistenceError> {
    match store.get(key)? {
        Some(text) => Ok(Some(serde_json::from_str(&text)?)),
        None => Ok(None),
    }
}

pub fn save_json<T: Serialize + ?Sized>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), PersistenceError> {
    let text = serde_json::to_string(value)?;
    store.set(key, &text)
}
