//! String key-value storage.
//!
//! [`MemoryStore`] keeps values for the life of the process; [`FileStore`]
//! writes one file per key so values survive between sessions.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// Extension given to every file written by [`FileStore`].
const FILE_EXTENSION: &str = "json";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Key {0:?} has no usable characters")]
    InvalidKey(String),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Persists plain strings under string keys.
pub trait KeyValueStore {
    /// Fetch the value stored under `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Stores each key as `{dir}/{key}.json`.
///
/// Keys are reduced to ASCII alphanumerics, `-` and `_` before use, so two
/// keys differing only in other characters share a file.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// The directory is created lazily on the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let sanitised = sanitise_key(key);
        if sanitised.is_empty() {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{sanitised}.{FILE_EXTENSION}")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;

        // Replace atomically: write a sibling file then rename over the key.
        let tmp = path.with_extension("tmp");
        std::fs::write(&tmp, value).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(path = %path.display(), bytes = value.len(), "Stored value");
        Ok(())
    }
}

fn sanitise_key(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "one").unwrap();
        store.set("k", "two").unwrap();

        assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn file_store_missing_key_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("not-created-yet"));
        assert_eq!(store.get("assignedDogs").unwrap(), None);
    }

    #[test]
    fn file_store_creates_directory_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");

        let mut store = FileStore::new(&data_dir);
        store.set("assignedDogs", "{\"a\":1}").unwrap();

        let reopened = FileStore::new(&data_dir);
        assert_eq!(
            reopened.get("assignedDogs").unwrap().as_deref(),
            Some("{\"a\":1}")
        );
        assert!(data_dir.join("assignedDogs.json").is_file());
    }

    #[test]
    fn file_store_sanitises_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());

        store.set("../escape;=me", "v").unwrap();

        assert!(dir.path().join("escapeme.json").is_file());
        assert_eq!(store.get("escapeme").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn file_store_rejects_key_without_usable_characters() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        assert_matches!(store.set("../", "v"), Err(StoreError::InvalidKey(_)));
    }
}
