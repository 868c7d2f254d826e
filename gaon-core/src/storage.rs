//! Key/value persistence for widget state.
//!
//! Every widget keeps its state under a single key as a JSON string (or a bare
//! string for simple preferences) and overwrites it wholesale on each change.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{GaonError, GaonResult};

pub const EVENTS_KEY: &str = "gaonEvents";
pub const CHAT_SESSIONS_KEY: &str = "gaonChatSessions";
pub const THEME_KEY: &str = "gaonTheme";
pub const STUDENT_ID_KEY: &str = "student_id";
pub const LOGGED_IN_KEY: &str = "isLoggedIn";

/// Storage handle shared between widgets.
pub type SharedStorage = std::sync::Arc<dyn Storage>;

pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> GaonResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> GaonResult<()>;
    fn remove(&self, key: &str) -> GaonResult<()>;
}

/// Read a JSON value, treating a missing or unparsable entry as absent.
pub fn load_json<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Option<T> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(key, error = %e, "could not read stored value");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "ignoring malformed stored value");
            None
        }
    }
}

pub fn save_json<T: Serialize + ?Sized>(storage: &dyn Storage, key: &str, value: &T) -> GaonResult<()> {
    let raw = serde_json::to_string(value)?;
    storage.set(key, &raw)
}

/// One file per key inside a data directory.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> GaonResult<PathBuf> {
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(GaonError::Storage(format!("Invalid storage key '{key}'")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> GaonResult<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> GaonResult<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(&path, value)
            .map_err(|e| GaonError::Storage(format!("Failed to write {}: {e}", path.display())))
    }

    fn remove(&self, key: &str) -> GaonResult<()> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process storage. Counts writes so callers can check that a rejected
/// operation left storage untouched.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
    writes: Mutex<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_count(&self) -> usize {
        *self.writes.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> GaonResult<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> GaonResult<()> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
        *self.writes.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        Ok(())
    }

    fn remove(&self, key: &str) -> GaonResult<()> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(key);
        *self.writes.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        Ok(())
    }
}
