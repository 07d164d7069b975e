//! Local cache implementations: a directory of JSON files and an in-memory map.

use crate::storage::{CacheKey, LocalCache, StoreError};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// One `<key>.json` file per cache key inside `dir`.
#[derive(Clone, Debug)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    /// Open (and create if needed) the cache directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: CacheKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_str()))
    }
}

impl LocalCache for FileCache {
    fn get(&self, key: CacheKey) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&mut self, key: CacheKey, value: &str) -> Result<(), StoreError> {
        // Entries are replaced whole: temp file, then rename.
        let path = self.path(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: CacheKey) -> Result<(), StoreError> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryCache {
    entries: HashMap<CacheKey, String>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalCache for MemoryCache {
    fn get(&self, key: CacheKey) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(&key).cloned())
    }

    fn put(&mut self, key: CacheKey, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key, value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: CacheKey) -> Result<(), StoreError> {
        self.entries.remove(&key);
        Ok(())
    }
}
