//! Storage Layer - Core Trait
//!
//! Durable key-value persistence for the list. Implementations can use
//! browser extension storage, in-memory maps, etc.

use std::rc::Rc;

use async_trait::async_trait;

use crate::domain::{StorageError, TodoItem};

/// Asynchronous get/set of a whole to-do sequence under a key.
///
/// Browser futures are not `Send`, so neither is this trait.
#[async_trait(?Send)]
pub trait StorageAdapter {
    /// Read the sequence stored under `key`; `None` if nothing was ever written
    async fn get(&self, key: &str) -> Result<Option<Vec<TodoItem>>, StorageError>;

    /// Overwrite the sequence stored under `key`
    async fn set(&self, key: &str, items: &[TodoItem]) -> Result<(), StorageError>;
}

#[async_trait(?Send)]
impl<S: StorageAdapter + ?Sized> StorageAdapter for Rc<S> {
    async fn get(&self, key: &str) -> Result<Option<Vec<TodoItem>>, StorageError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, items: &[TodoItem]) -> Result<(), StorageError> {
        (**self).set(key, items).await
    }
}
