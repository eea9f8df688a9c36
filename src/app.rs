use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::db::KeyValueStore;
use crate::error::AppResult;
use crate::models::{Book, ListName, MutationOutcome, RecommendationCache, ReadingLists};
use crate::services::providers::CatalogClient;
use crate::services::{lists, recommendations};
use crate::session::SessionState;

/// Core facade wired up by the presentation layer
///
/// Owns the session state and the external collaborators behind their trait
/// seams. Every mutating operation persists the affected slots before
/// returning and reports what changed through a [`MutationOutcome`], leaving
/// redraw and recommendation-refresh decisions to the caller.
pub struct App {
    catalog: Arc<dyn CatalogClient>,
    store: Arc<dyn KeyValueStore>,
    session: RwLock<SessionState>,
    // Serializes regeneration batches; a second request waits and then
    // overwrites, so the cache is last-writer-wins in request order.
    regen_lock: Mutex<()>,
}

impl App {
    /// Construct the core and hydrate the session from the store.
    pub async fn load(catalog: Arc<dyn CatalogClient>, store: Arc<dyn KeyValueStore>) -> Self {
        let session = SessionState::load(store.as_ref()).await;
        Self {
            catalog,
            store,
            session: RwLock::new(session),
            regen_lock: Mutex::new(()),
        }
    }

    /// File a book into a list, rejecting ids already owned anywhere.
    pub async fn add(&self, book: Book, list: ListName) -> AppResult<MutationOutcome> {
        let mut session = self.session.write().await;
        let outcome = lists::add_to_list(&mut session, book, list)?;
        session.persist_lists(self.store.as_ref()).await;
        Ok(outcome)
    }

    /// Remove a book from the named list.
    pub async fn remove(&self, book_id: &str, list: ListName) -> AppResult<MutationOutcome> {
        let mut session = self.session.write().await;
        let outcome = lists::remove_from_list(&mut session, book_id, list)?;
        session.persist_lists(self.store.as_ref()).await;
        Ok(outcome)
    }

    /// Move a book into `to`, pulling it from `from` or, for first adds, from
    /// the cached search/recommendation results.
    pub async fn move_book(
        &self,
        book_id: &str,
        from: Option<ListName>,
        to: ListName,
    ) -> AppResult<MutationOutcome> {
        let mut session = self.session.write().await;
        let outcome = lists::move_to_list(&mut session, book_id, from, to)?;
        if outcome.lists_changed {
            session.persist_lists(self.store.as_ref()).await;
        }
        Ok(outcome)
    }

    /// Search the catalog and overwrite the search cache with the outcome.
    pub async fn search(&self, query: &str) -> AppResult<Vec<Book>> {
        let results = self.catalog.search(query).await?;

        let mut session = self.session.write().await;
        session.last_query = query.to_string();
        session.last_results = results.clone();
        session.persist_search_cache(self.store.as_ref()).await;

        Ok(results)
    }

    /// Regenerate recommendations from the current read history and overwrite
    /// the cache, empty results included.
    pub async fn regenerate(&self) -> AppResult<Vec<Book>> {
        let _guard = self.regen_lock.lock().await;

        let (read_books, owned) = {
            let session = self.session.read().await;
            (session.lists.read_books.clone(), session.lists.owned_ids())
        };

        let books =
            recommendations::generate(Arc::clone(&self.catalog), &read_books, &owned).await?;

        let mut session = self.session.write().await;
        session.recommendations = RecommendationCache::new(books.clone());
        session.persist_recommendations(self.store.as_ref()).await;

        Ok(books)
    }

    /// Resolve a book for the detail view: lists and caches first, then the
    /// catalog.
    pub async fn view_details(&self, book_id: &str) -> AppResult<Option<Book>> {
        {
            let session = self.session.read().await;
            if let Some(book) = lists::get_by_id(&session, book_id) {
                return Ok(Some(book.clone()));
            }
        }

        self.catalog.fetch_details(book_id).await
    }

    pub async fn lists(&self) -> ReadingLists {
        self.session.read().await.lists.clone()
    }

    pub async fn list_of(&self, book_id: &str) -> Option<ListName> {
        lists::get_list_of(&*self.session.read().await, book_id)
    }

    pub async fn owned_ids(&self) -> HashSet<String> {
        lists::all_owned_ids(&*self.session.read().await)
    }

    /// Cached recommendations; no network call.
    pub async fn recommendations(&self) -> Vec<Book> {
        self.session.read().await.recommendations.books.clone()
    }

    /// Cached last query and results; no network call.
    pub async fn last_search(&self) -> (String, Vec<Book>) {
        let session = self.session.read().await;
        (session.last_query.clone(), session.last_results.clone())
    }

    pub(crate) async fn session(&self) -> tokio::sync::RwLockReadGuard<'_, SessionState> {
        self.session.read().await
    }
}
