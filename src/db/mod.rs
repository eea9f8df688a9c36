use std::fmt::Display;

use serde_json::Value;

use crate::error::AppResult;

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// The four slots the core persists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    ReadingLists,
    LastQuery,
    LastResults,
    Recommendations,
}

impl Display for StoreKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreKey::ReadingLists => write!(f, "bookstack:lists"),
            StoreKey::LastQuery => write!(f, "bookstack:last-query"),
            StoreKey::LastResults => write!(f, "bookstack:last-results"),
            StoreKey::Recommendations => write!(f, "bookstack:recommendations"),
        }
    }
}

/// Durable key-value slot abstraction
///
/// Each write is a full-document replace for its key; there is no partial
/// update and no transaction spanning keys. Missing keys read back as `None`
/// and callers default to empty structures.
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: StoreKey) -> AppResult<Option<Value>>;
    async fn set(&self, key: StoreKey, value: Value) -> AppResult<()>;
}
