use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Book;

/// Persisted recommendation cache
///
/// Overwritten wholesale on every (re)generation, empty results included, so
/// the startup render can show the last outcome without a network call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationCache {
    pub books: Vec<Book>,
    pub generated_at: DateTime<Utc>,
}

impl RecommendationCache {
    pub fn new(books: Vec<Book>) -> Self {
        Self {
            books,
            generated_at: Utc::now(),
        }
    }
}

impl Default for RecommendationCache {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
