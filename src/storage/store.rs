//! Authoritative match stores: a JSON file and an in-memory list.

use crate::models::FinishedMatch;
use crate::storage::{MatchStore, StoreError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

/// All finished matches as one JSON array in a file. A missing file is an empty store.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    /// Serializes read-modify-write of the file.
    write_lock: tokio::sync::Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Vec<FinishedMatch>, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(Vec::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl MatchStore for JsonFileStore {
    async fn save(&self, record: &FinishedMatch) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut all = self.read_all().await?;
        all.push(record.clone());
        let bytes = serde_json::to_vec_pretty(&all)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        log::debug!("Stored match {} in {}", record.id, self.path.display());
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<FinishedMatch>, StoreError> {
        let _guard = self.write_lock.lock().await;
        self.read_all().await
    }
}

/// In-memory store. Can be switched offline to exercise the fallback paths.
#[derive(Debug)]
pub struct MemoryStore {
    matches: Mutex<Vec<FinishedMatch>>,
    available: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_matches(Vec::new())
    }

    pub fn with_matches(matches: Vec<FinishedMatch>) -> Self {
        Self {
            matches: Mutex::new(matches),
            available: AtomicBool::new(true),
        }
    }

    /// While unavailable, every call fails with `StoreError::Unavailable`.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.matches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("store is offline".to_string()))
        }
    }
}

impl MatchStore for MemoryStore {
    async fn save(&self, record: &FinishedMatch) -> Result<(), StoreError> {
        self.check_available()?;
        self.matches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<FinishedMatch>, StoreError> {
        self.check_available()?;
        Ok(self
            .matches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }
}
