/// Presentation seam
///
/// The UI implements [`Presenter`]; the core never renders anything itself.
/// Wiring is plain dependency injection: the embedding hands a presenter to
/// [`App::present`] (or [`App::present_startup`]) and decides when to refresh
/// recommendations from the `recommendations_stale` flag it gets back from
/// mutations.
use crate::app::App;
use crate::models::{Book, MutationOutcome, ReadingLists};

/// Region a non-blocking failure message belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorRegion {
    Search,
    Detail,
    Recommendations,
}

/// Rendering surface implemented by the embedding UI
pub trait Presenter {
    fn render_lists(&mut self, lists: &ReadingLists);
    fn render_search_results(&mut self, query: &str, results: &[Book]);
    fn render_recommendations(&mut self, books: &[Book]);
    fn render_detail(&mut self, book: &Book);

    /// Inline failure message for one region, shown in place of its content.
    fn render_inline_error(&mut self, region: ErrorRegion, message: &str);

    /// Blocking notification, used for list-mutation failures.
    fn notify(&mut self, message: &str);
}

impl App {
    /// Redraw exactly the regions a mutation touched.
    ///
    /// List changes also redraw the cached search results, since ownership
    /// affects how result rows are displayed, without re-querying the catalog.
    pub async fn present(&self, outcome: MutationOutcome, presenter: &mut dyn Presenter) {
        let session = self.session().await;

        if outcome.lists_changed {
            presenter.render_lists(&session.lists);
        }
        if outcome.lists_changed || outcome.search_cache_changed {
            presenter.render_search_results(&session.last_query, &session.last_results);
        }
    }

    /// Initial render from the hydrated caches; never touches the network.
    pub async fn present_startup(&self, presenter: &mut dyn Presenter) {
        let session = self.session().await;

        presenter.render_lists(&session.lists);
        presenter.render_search_results(&session.last_query, &session.last_results);
        presenter.render_recommendations(&session.recommendations.books);
    }
}
