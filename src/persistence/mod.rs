//! Key-value persistence
//!
//! The game stores a handful of integers (today just the best score).
//! Backends:
//! - `MemoryStore`: in-process, for tests and headless runs
//! - `JsonFileStore`: flat JSON object on disk (native)
//! - `LocalStorageStore`: browser LocalStorage (wasm32)

use std::collections::BTreeMap;

use thiserror::Error;

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use web::LocalStorageStore;

/// Errors from a store write
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    /// The stored data could not be encoded
    #[error("storage encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
    /// No backing storage on this platform/session
    #[error("storage unavailable")]
    Unavailable,
}

/// Minimal integer key-value store
pub trait KeyValueStore {
    /// Stored value, or `None` when absent or unreadable
    fn get(&self, key: &str) -> Option<i64>;
    fn set(&mut self, key: &str, value: i64) -> Result<(), StoreError>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, i64>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<i64> {
        self.values.get(key).copied()
    }

    fn set(&mut self, key: &str, value: i64) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Option<i64> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: i64) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::default();
        assert_eq!(store.get("a"), None);
        store.set("a", 3).unwrap();
        store.set("a", 9).unwrap();
        assert_eq!(store.get("a"), Some(9));
    }

    #[test]
    fn test_boxed_store_delegates() {
        let mut store: Box<dyn KeyValueStore> = Box::new(MemoryStore::default());
        store.set("k", 1).unwrap();
        assert_eq!(store.get("k"), Some(1));
    }
}
