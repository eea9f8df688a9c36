/// Book catalog provider abstraction
///
/// The core consumes the remote catalog through this trait so the search and
/// recommendation services stay independent of the concrete API. The shipped
/// provider talks to the Google Books volumes API; tests substitute a mock.
use crate::{
    error::AppResult,
    models::{Book, VolumeInfo},
};

pub mod google_books;

pub use google_books::GoogleBooksProvider;

/// Trait for book catalog providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogClient: Send + Sync {
    /// Search for volumes matching a free-form query
    ///
    /// An empty or missing result array maps to an empty vec, never an error.
    /// Transport failures and non-success statuses fail with a human-readable
    /// message.
    async fn search(&self, query: &str) -> AppResult<Vec<Book>>;

    /// Fetch a single volume by catalog id
    ///
    /// Returns `None` when the payload carries no descriptive block.
    async fn fetch_details(&self, volume_id: &str) -> AppResult<Option<Book>>;
}

/// Requested cover size for the fallback cover service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoverSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl CoverSize {
    fn letter(self) -> char {
        match self {
            CoverSize::Small => 'S',
            CoverSize::Medium => 'M',
            CoverSize::Large => 'L',
        }
    }
}

const COVERS_API_URL: &str = "https://covers.openlibrary.org/b";

/// Derive a cover image URL for a descriptive block
///
/// A direct catalog thumbnail wins (full-size before small). Otherwise a
/// fallback URL is built from identifiers, preferring ISBN-13, then ISBN-10,
/// then an "OTHER" identifier carrying an `OCLC:` prefix (prefix stripped).
pub fn cover_image_url(info: &VolumeInfo, size: CoverSize) -> Option<String> {
    if let Some(links) = &info.image_links {
        if let Some(url) = links.thumbnail.clone().or_else(|| links.small_thumbnail.clone()) {
            return Some(url);
        }
    }

    let by_type = |wanted: &str| {
        info.industry_identifiers
            .iter()
            .find(|ident| ident.identifier_type == wanted)
            .map(|ident| ident.value.clone())
    };

    if let Some(isbn) = by_type("ISBN_13").or_else(|| by_type("ISBN_10")) {
        return Some(format!(
            "{}/isbn/{}-{}.jpg",
            COVERS_API_URL,
            isbn,
            size.letter()
        ));
    }

    info.industry_identifiers
        .iter()
        .filter(|ident| ident.identifier_type == "OTHER")
        .find_map(|ident| ident.value.strip_prefix("OCLC:"))
        .map(|oclc| format!("{}/oclc/{}-{}.jpg", COVERS_API_URL, oclc, size.letter()))
}
