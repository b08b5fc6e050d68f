//! Durable key/value storage seam.
//!
//! SYSTEM CONTEXT
//! ==============
//! In the browser this is the extension's `storage.local` area, shared by the
//! background and every content script. Values are JSON so both the token
//! string and the recents array go through one interface.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::cell::RefCell;
use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StorageError;

#[async_trait::async_trait(?Send)]
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the storage area cannot be read.
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the storage area cannot be written.
    async fn set(&self, key: &str, value: serde_json::Value) -> Result<(), StorageError>;
}

#[async_trait::async_trait(?Send)]
impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<(), StorageError> {
        (**self).set(key, value).await
    }
}

/// Read and decode a typed value.
///
/// # Errors
///
/// Returns [`StorageError::Decode`] when the stored value has the wrong shape.
pub async fn load<S, T>(store: &S, key: &str) -> Result<Option<T>, StorageError>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    match store.get(key).await? {
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| StorageError::Decode(format!("{key}: {e}"))),
        None => Ok(None),
    }
}

/// Encode and write a typed value.
///
/// # Errors
///
/// Returns [`StorageError::Encode`] if `value` cannot be serialized.
pub async fn save<S, T>(store: &S, key: &str, value: &T) -> Result<(), StorageError>
where
    S: KeyValueStore + ?Sized,
    T: Serialize,
{
    let value = serde_json::to_value(value).map_err(|e| StorageError::Encode(format!("{key}: {e}")))?;
    store.set(key, value).await
}

/// Process-local store for tests and native tooling.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, serde_json::Value>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the raw value under `key`.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<serde_json::Value> {
        self.entries.borrow().get(key).cloned()
    }
}

#[async_trait::async_trait(?Send)]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<(), StorageError> {
        self.entries.borrow_mut().insert(key.to_owned(), value);
        Ok(())
    }
}
