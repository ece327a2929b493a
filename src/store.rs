//! Key-value persistence for cached content
//!
//! A minimal `get`/`set` capability over string blobs. `SqliteStore` is
//! the durable provider; `MemoryStore` backs tests.

#[cfg(test)]
mod memory;
mod sqlite;

#[cfg(test)]
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Store lock poisoned")]
    Poisoned,
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Minimal key-value capability for persisted blobs
pub trait KeyValueStore: Send + Sync {
    /// Blob stored under `key`, if any
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Store `blob` under `key`, replacing any previous value
    fn set(&self, key: &str, blob: &str) -> StoreResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, blob: &str) -> StoreResult<()> {
        (**self).set(key, blob)
    }
}
