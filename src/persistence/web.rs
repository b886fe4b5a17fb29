//! Browser LocalStorage store (wasm32)

use super::{KeyValueStore, StoreError};

/// Values stored as decimal strings under their own keys
#[derive(Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<i64> {
        let storage = Self::storage()?;
        let raw = storage.get_item(key).ok().flatten()?;
        match raw.trim().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("Ignoring unreadable LocalStorage value for {}", key);
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: i64) -> Result<(), StoreError> {
        let storage = Self::storage().ok_or(StoreError::Unavailable)?;
        storage
            .set_item(key, &value.to_string())
            .map_err(|_| StoreError::Unavailable)
    }
}
