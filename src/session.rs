use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::db::{KeyValueStore, StoreKey};
use crate::models::{Book, ReadingLists, RecommendationCache};

/// Whole-session in-memory state
///
/// Loaded once from the store at startup and re-synced slot by slot after
/// every mutation. Durable writes are best-effort: a failed write is logged
/// and the session keeps going on the in-memory copy.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub lists: ReadingLists,
    pub last_query: String,
    pub last_results: Vec<Book>,
    pub recommendations: RecommendationCache,
}

impl SessionState {
    /// Hydrate the session from the store, defaulting missing or undecodable
    /// slots to empty structures.
    pub async fn load(store: &dyn KeyValueStore) -> Self {
        Self {
            lists: load_slot(store, StoreKey::ReadingLists).await,
            last_query: load_slot(store, StoreKey::LastQuery).await,
            last_results: load_slot(store, StoreKey::LastResults).await,
            recommendations: load_slot(store, StoreKey::Recommendations).await,
        }
    }

    pub async fn persist_lists(&self, store: &dyn KeyValueStore) {
        persist_slot(store, StoreKey::ReadingLists, &self.lists).await;
    }

    pub async fn persist_search_cache(&self, store: &dyn KeyValueStore) {
        persist_slot(store, StoreKey::LastQuery, &self.last_query).await;
        persist_slot(store, StoreKey::LastResults, &self.last_results).await;
    }

    pub async fn persist_recommendations(&self, store: &dyn KeyValueStore) {
        persist_slot(store, StoreKey::Recommendations, &self.recommendations).await;
    }
}

async fn load_slot<T>(store: &dyn KeyValueStore, key: StoreKey) -> T
where
    T: DeserializeOwned + Default,
{
    match store.get(key).await {
        Ok(Some(value)) => match serde_json::from_value(value) {
            Ok(decoded) => decoded,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Discarding undecodable store slot");
                T::default()
            }
        },
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "Store read failed, starting empty");
            T::default()
        }
    }
}

async fn persist_slot<T: Serialize>(store: &dyn KeyValueStore, key: StoreKey, value: &T) {
    let json = match serde_json::to_value(value) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!(key = %key, error = %e, "Slot serialization error");
            return;
        }
    };

    if let Err(e) = store.set(key, json).await {
        tracing::warn!(key = %key, error = %e, "Durable write failed, continuing in memory");
    }
}
