//! Persistence: the authoritative match store and the local fallback cache.
//!
//! The store holds every finished match and may be unreachable. The cache keeps
//! the draft live match, a bounded copy of recent history and the last derived
//! stats, and is written synchronously so a finished match is never only in flight.

mod cache;
mod store;

pub use cache::{FileCache, MemoryCache};
pub use store::{JsonFileStore, MemoryStore};

use crate::models::FinishedMatch;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

/// Number of finished matches kept in the local history cache.
pub const HISTORY_LIMIT: usize = 50;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Logical keys of the local cache.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CacheKey {
    CurrentMatch,
    MatchHistory,
    PlayerStats,
}

impl CacheKey {
    pub fn as_str(self) -> &'static str {
        match self {
            CacheKey::CurrentMatch => "currentMatch",
            CacheKey::MatchHistory => "matchHistory",
            CacheKey::PlayerStats => "playerStats",
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key/value cache of JSON documents.
pub trait LocalCache {
    fn get(&self, key: CacheKey) -> Result<Option<String>, StoreError>;
    fn put(&mut self, key: CacheKey, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: CacheKey) -> Result<(), StoreError>;

    fn load<T: DeserializeOwned>(&self, key: CacheKey) -> Result<Option<T>, StoreError> {
        match self.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn store<T: Serialize>(&mut self, key: CacheKey, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value)?;
        self.put(key, &raw)
    }
}

/// The authoritative store of finished matches.
#[allow(async_fn_in_trait)]
pub trait MatchStore {
    /// Durably store one finished match. Not retried on failure.
    async fn save(&self, record: &FinishedMatch) -> Result<(), StoreError>;

    /// Every finished match in the store, in no particular order.
    async fn fetch_all(&self) -> Result<Vec<FinishedMatch>, StoreError>;
}
