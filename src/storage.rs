//! Extension Storage
//!
//! `StorageAdapter` over the promise-based `chrome.storage` API.

use std::future::Future;

use async_trait::async_trait;
use log::warn;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use todo_core::{StorageAdapter, StorageError, TodoItem};

use crate::config::{RetryPolicy, StorageArea};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["chrome", "storage", "local"], js_name = get, catch)]
    async fn local_get(keys: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["chrome", "storage", "local"], js_name = set, catch)]
    async fn local_set(items: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["chrome", "storage", "sync"], js_name = get, catch)]
    async fn sync_get(keys: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["chrome", "storage", "sync"], js_name = set, catch)]
    async fn sync_set(items: JsValue) -> Result<JsValue, JsValue>;
}

/// One storage area of the extension
#[derive(Debug, Clone, Copy)]
pub struct ChromeStorage {
    area: StorageArea,
    retry: RetryPolicy,
}

impl ChromeStorage {
    pub fn new(area: StorageArea, retry: RetryPolicy) -> Self {
        Self { area, retry }
    }

    /// False when the popup page is opened outside the extension
    fn is_available(&self) -> bool {
        let storage = js_sys::Reflect::get(&js_sys::global(), &"chrome".into())
            .and_then(|chrome| js_sys::Reflect::get(&chrome, &"storage".into()))
            .and_then(|storage| js_sys::Reflect::get(&storage, &self.area.as_str().into()));
        matches!(storage, Ok(area) if area.is_object())
    }

    fn ensure_available(&self) -> Result<(), StorageError> {
        if self.is_available() {
            Ok(())
        } else {
            Err(StorageError::Unavailable(format!(
                "chrome.storage.{} is not available",
                self.area.as_str()
            )))
        }
    }

    async fn raw_get(&self, keys: JsValue) -> Result<JsValue, JsValue> {
        match self.area {
            StorageArea::Local => local_get(keys).await,
            StorageArea::Sync => sync_get(keys).await,
        }
    }

    async fn raw_set(&self, items: JsValue) -> Result<JsValue, JsValue> {
        match self.area {
            StorageArea::Local => local_set(items).await,
            StorageArea::Sync => sync_set(items).await,
        }
    }

    /// Run `call`, retrying with a growing delay per the retry policy
    async fn with_retry<F, Fut>(&self, what: &str, mut call: F) -> Result<JsValue, JsValue>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<JsValue, JsValue>>,
    {
        let mut attempt = 0;
        loop {
            match call().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < self.retry.retries => {
                    attempt += 1;
                    warn!("{} failed ({}), retry {}/{}", what, describe(&e), attempt, self.retry.retries);
                    gloo_timers::future::TimeoutFuture::new(self.retry.backoff_ms * attempt).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[async_trait(?Send)]
impl StorageAdapter for ChromeStorage {
    async fn get(&self, key: &str) -> Result<Option<Vec<TodoItem>>, StorageError> {
        self.ensure_available()?;
        let read_error = |e: JsValue| StorageError::Read {
            key: key.to_string(),
            message: describe(&e),
        };

        let keys: JsValue = js_sys::Array::of1(&JsValue::from_str(key)).into();
        let result = self
            .with_retry("storage get", || self.raw_get(keys.clone()))
            .await
            .map_err(read_error)?;

        let value = js_sys::Reflect::get(&result, &JsValue::from_str(key)).map_err(read_error)?;
        if value.is_undefined() || value.is_null() {
            return Ok(None);
        }
        serde_wasm_bindgen::from_value(value)
            .map(Some)
            .map_err(|e| StorageError::Serialization(e.to_string()))
    }

    async fn set(&self, key: &str, items: &[TodoItem]) -> Result<(), StorageError> {
        self.ensure_available()?;
        let write_error = |e: JsValue| StorageError::Write {
            key: key.to_string(),
            message: describe(&e),
        };

        // Plain objects and numbers only; storage rejects Maps and BigInts
        let value = items
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        let payload = js_sys::Object::new();
        js_sys::Reflect::set(&payload, &JsValue::from_str(key), &value).map_err(write_error)?;
        let payload: JsValue = payload.into();

        self.with_retry("storage set", || self.raw_set(payload.clone()))
            .await
            .map(|_| ())
            .map_err(write_error)
    }
}

/// Human-readable text for a thrown JS value
fn describe(error: &JsValue) -> String {
    if let Some(e) = error.dyn_ref::<js_sys::Error>() {
        return String::from(e.message());
    }
    error.as_string().unwrap_or_else(|| format!("{:?}", error))
}
