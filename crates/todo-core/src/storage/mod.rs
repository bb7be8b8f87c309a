//! Storage Layer
//!
//! The persistence boundary and an in-memory implementation.

mod traits;
mod memory;

pub use traits::StorageAdapter;
pub use memory::MemoryStorage;
