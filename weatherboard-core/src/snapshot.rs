//! Key/value snapshot persistence.
//!
//! A snapshot is one string value per key. Writers replace the whole value
//! in a single call; readers see either the previous or the new value.

use anyhow::{Context, Result};
use parking_lot::Mutex;
use std::{
    collections::HashMap,
    fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;

pub trait SnapshotStore: Send + Sync {
    /// Current value for `key`, or `None` if nothing was ever written.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value for `key`.
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    dir: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to read snapshot: {}", path.display()))
            }
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create snapshot directory: {}", self.dir.display())
        })?;

        let path = self.path_for(key);

        // Unique temp file per write, renamed over the target.
        let mut tmp = NamedTempFile::new_in(&self.dir).with_context(|| {
            format!("Failed to create temp snapshot in: {}", self.dir.display())
        })?;
        tmp.write_all(value.as_bytes())
            .with_context(|| format!("Failed to write snapshot: {}", tmp.path().display()))?;
        tmp.persist(&path)
            .with_context(|| format!("Failed to replace snapshot: {}", path.display()))?;

        Ok(())
    }
}

/// In-memory snapshot store for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value, e.g. to simulate a snapshot left by an earlier run.
    pub fn with_value(key: &str, value: impl Into<String>) -> Self {
        let store = Self::new();
        store.values.lock().insert(key.to_string(), value.into());
        store
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<T: SnapshotStore + ?Sized> SnapshotStore for std::sync::Arc<T> {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }
}
