//! JSON file backend for credential storage.
//!
//! All keys live in a single JSON object on disk. The file is re-read on
//! every `get` and rewritten on every `set`/`remove`, so two processes
//! sharing the file see each other's writes (last writer wins).

use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::{KeyValueStore, StoreError};

const APP_DIR: &str = "edulearn";
const FILE_NAME: &str = "credentials.json";

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/edulearn/credentials.json` for the current user.
    pub fn default_location() -> Result<Self, StoreError> {
        let dir = dirs::config_dir().ok_or(StoreError::NoConfigDir)?;
        Ok(Self::new(dir.join(APP_DIR).join(FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    /// Atomic replace through a uniquely named 0600 temp file in the same
    /// directory.
    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
        temp_file.write_all(&serde_json::to_vec_pretty(entries)?)?;
        temp_file.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        // A corrupt file is replaced rather than blocking new logins.
        let mut entries = self.load().unwrap_or_else(|e| {
            log::warn!("Discarding unreadable credential file {}: {}", self.path.display(), e);
            BTreeMap::new()
        });
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = match self.load() {
            Ok(entries) => entries,
            // Corrupt contents: credential reads already treat it as absent.
            Err(StoreError::Json(_)) => return Ok(()),
            Err(e) => return Err(e),
        };
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.save(&entries)
    }
}
