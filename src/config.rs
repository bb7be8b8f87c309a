//! Popup Configuration
//!
//! Compile-time defaults for where the list lives and how chatty the
//! console is.

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use todo_core::StoreConfig;

/// Which `chrome.storage` area holds the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageArea {
    /// `chrome.storage.local`, this device only
    #[default]
    Local,
    /// `chrome.storage.sync`, follows the signed-in browser profile
    Sync,
}

impl StorageArea {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageArea::Local => "local",
            StorageArea::Sync => "sync",
        }
    }
}

/// Retries for a single storage call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Extra attempts after the first failure
    pub retries: u32,
    /// Delay before each retry, multiplied by the attempt number
    pub backoff_ms: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 1,
            backoff_ms: 150,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PopupConfig {
    pub storage_area: StorageArea,
    pub retry: RetryPolicy,
    pub store: StoreConfig,
    pub log_level: LevelFilter,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            storage_area: StorageArea::default(),
            retry: RetryPolicy::default(),
            store: StoreConfig::default(),
            log_level: if cfg!(debug_assertions) {
                LevelFilter::Debug
            } else {
                LevelFilter::Info
            },
        }
    }
}
