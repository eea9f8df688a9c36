use std::collections::HashMap;
use std::path::PathBuf;

use serde_json::Value;
use tokio::sync::Mutex;

use crate::error::{AppError, AppResult};

use super::{KeyValueStore, StoreKey};

/// File-backed store
///
/// All four slots live in one JSON object on disk, rewritten in full on every
/// write. A missing file reads as an empty document.
pub struct JsonFileStore {
    path: PathBuf,
    io_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            io_lock: Mutex::new(()),
        }
    }

    fn read_document(&self) -> AppResult<HashMap<String, Value>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|e| AppError::Persistence(format!("Corrupt store document: {}", e))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(AppError::Persistence(format!(
                "Failed to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn write_document(&self, document: &HashMap<String, Value>) -> AppResult<()> {
        let json = serde_json::to_string(document)
            .map_err(|e| AppError::Persistence(format!("Serialization error: {}", e)))?;
        std::fs::write(&self.path, json).map_err(|e| {
            AppError::Persistence(format!("Failed to write {}: {}", self.path.display(), e))
        })
    }
}

#[async_trait::async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: StoreKey) -> AppResult<Option<Value>> {
        let _guard = self.io_lock.lock().await;
        let document = self.read_document()?;
        Ok(document.get(&key.to_string()).cloned())
    }

    async fn set(&self, key: StoreKey, value: Value) -> AppResult<()> {
        let _guard = self.io_lock.lock().await;
        let mut document = self.read_document()?;
        document.insert(key.to_string(), value);
        self.write_document(&document)?;

        tracing::debug!(key = %key, path = %self.path.display(), "Store slot written");
        Ok(())
    }
}
