//! In-Memory Storage
//!
//! Keeps values as `serde_json::Value` so reads go through a real
//! deserialization, like structured values coming back from the browser.
//! Failures can be injected for tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use super::traits::StorageAdapter;
use crate::domain::{StorageError, TodoItem};

#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RefCell<HashMap<String, Value>>,
    failing_reads: Cell<u32>,
    failing_writes: Cell<u32>,
    writes: Cell<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that already holds `items` under `key`
    pub fn with_items(key: &str, items: &[TodoItem]) -> Result<Self, StorageError> {
        let storage = Self::new();
        storage.insert_raw(key, serde_json::to_value(items)?);
        Ok(storage)
    }

    /// Store an arbitrary value, bypassing the typed API
    pub fn insert_raw(&self, key: &str, value: Value) {
        self.values.borrow_mut().insert(key.to_string(), value);
    }

    pub fn raw(&self, key: &str) -> Option<Value> {
        self.values.borrow().get(key).cloned()
    }

    /// Make the next `count` reads fail
    pub fn fail_next_reads(&self, count: u32) {
        self.failing_reads.set(count);
    }

    /// Make the next `count` writes fail
    pub fn fail_next_writes(&self, count: u32) {
        self.failing_writes.set(count);
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    fn take_failure(counter: &Cell<u32>) -> bool {
        let remaining = counter.get();
        if remaining > 0 {
            counter.set(remaining - 1);
            true
        } else {
            false
        }
    }
}

#[async_trait(?Send)]
impl StorageAdapter for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<Vec<TodoItem>>, StorageError> {
        if Self::take_failure(&self.failing_reads) {
            return Err(StorageError::Read {
                key: key.to_string(),
                message: "injected read failure".to_string(),
            });
        }
        match self.raw(key) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, items: &[TodoItem]) -> Result<(), StorageError> {
        if Self::take_failure(&self.failing_writes) {
            return Err(StorageError::Write {
                key: key.to_string(),
                message: "injected write failure".to_string(),
            });
        }
        let value = serde_json::to_value(items)?;
        self.insert_raw(key, value);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
