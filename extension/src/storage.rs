//! [`KeyValueStore`] over `chrome.storage.local`.
//!
//! Values cross the boundary as JSON so the stored shape matches what the
//! `serde` types in `boards` read back.

use async_trait::async_trait;
use boards::error::StorageError;
use boards::store::KeyValueStore;
use js_sys::{Object, Reflect};
use wasm_bindgen::JsValue;

use crate::chrome;

#[derive(Debug, Clone, Copy, Default)]
pub struct ExtensionStorage;

impl ExtensionStorage {
    fn area() -> Result<Object, StorageError> {
        chrome::namespace("storage.local").map_err(|e| StorageError::Unavailable(chrome::describe(&e)))
    }
}

#[async_trait(?Send)]
impl KeyValueStore for ExtensionStorage {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError> {
        let area = Self::area()?;
        let items = chrome::call_async(&area, "get", &[JsValue::from_str(key)])
            .await
            .map_err(|e| StorageError::Unavailable(chrome::describe(&e)))?;
        let raw = Reflect::get(&items, &JsValue::from_str(key))
            .map_err(|e| StorageError::Decode(chrome::describe(&e)))?;
        if raw.is_undefined() || raw.is_null() {
            return Ok(None);
        }
        chrome::to_json(&raw).map(Some).map_err(StorageError::Decode)
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<(), StorageError> {
        let area = Self::area()?;
        let mut entry = serde_json::Map::new();
        entry.insert(key.to_owned(), value);
        let items = chrome::from_json(&serde_json::Value::Object(entry)).map_err(StorageError::Encode)?;
        chrome::call_async(&area, "set", &[items])
            .await
            .map_err(|e| StorageError::Unavailable(chrome::describe(&e)))?;
        Ok(())
    }
}
