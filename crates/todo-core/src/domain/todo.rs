//! Todo Entity
//!
//! A single entry of the to-do list.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a to-do item.
///
/// Serialized as a bare number so lists written by older popup versions
/// (which used millisecond timestamps) load unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(pub u64);

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TodoId {
    fn from(value: u64) -> Self {
        TodoId(value)
    }
}

/// A to-do item as displayed and persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Unique within its list
    pub id: TodoId,
    /// Trimmed, never empty
    pub text: String,
    /// Completion status
    #[serde(default)]
    pub completed: bool,
}

impl TodoItem {
    /// Create a new, not yet completed item
    pub fn new(id: TodoId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
        }
    }
}

/// Footer label for the number of items: "1 item", "3 items".
pub fn count_label(count: usize) -> String {
    format!("{} {}", count, if count == 1 { "item" } else { "items" })
}
