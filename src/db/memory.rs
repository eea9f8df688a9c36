use std::collections::HashMap;

use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::AppResult;

use super::{KeyValueStore, StoreKey};

/// In-memory store
///
/// Backs tests and ephemeral sessions where nothing should outlive the
/// process.
#[derive(Default)]
pub struct MemoryStore {
    slots: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: StoreKey) -> AppResult<Option<Value>> {
        let slots = self.slots.read().await;
        Ok(slots.get(&key.to_string()).cloned())
    }

    async fn set(&self, key: StoreKey, value: Value) -> AppResult<()> {
        let mut slots = self.slots.write().await;
        slots.insert(key.to_string(), value);
        Ok(())
    }
}
