/// Recommendation generation
///
/// Derives search queries from the read history, fans them out against the
/// catalog, then merges, filters, ranks, and truncates the results. Individual
/// query failures are absorbed; an empty outcome is valid and cacheable.
use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::Book;
use crate::services::providers::CatalogClient;

pub const MAX_RECOMMENDATIONS: usize = 10;

/// Query issued when the read history yields no usable signals
pub const FALLBACK_QUERY: &str = "bestsellers fiction";

/// Fixed keyword stop list. Tokens of length <= 3 ("the", "and", "for", ...)
/// are already dropped by the length rule and are not repeated here.
pub const STOP_WORDS: &[&str] = &[
    "this", "that", "with", "from", "have", "been", "were", "they", "their", "them", "then",
    "than", "what", "when", "where", "which", "will", "would", "could", "should", "there",
    "about", "into", "over", "after", "also", "your", "more", "most", "some", "such", "only",
    "very", "just", "like", "between", "through", "because", "while", "does", "doing", "being",
    "upon", "these", "those", "each", "other", "both", "under", "again", "once",
];

/// Signals mined from the read history, in discovery order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PreferenceSignals {
    pub genres: Vec<String>,
    pub authors: Vec<String>,
    pub keywords: Vec<String>,
}

impl PreferenceSignals {
    pub fn is_empty(&self) -> bool {
        self.genres.is_empty() && self.authors.is_empty() && self.keywords.is_empty()
    }
}

/// Scan the read history and collect genres, authors, and keywords.
///
/// Discovery order is the iteration order of the history; within one book,
/// categories, then authors, then title keywords, then description keywords.
pub fn extract_signals(read_books: &[Book]) -> PreferenceSignals {
    let mut signals = PreferenceSignals::default();

    for book in read_books {
        let Some(info) = book.info() else { continue };

        for category in &info.categories {
            push_unique(&mut signals.genres, category);
        }
        for author in &info.authors {
            push_unique(&mut signals.authors, author);
        }
        for text in [info.title.as_deref(), info.description.as_deref()]
            .into_iter()
            .flatten()
        {
            collect_keywords(text, &mut signals.keywords);
        }
    }

    signals
}

fn push_unique(items: &mut Vec<String>, candidate: &str) {
    if !items.iter().any(|existing| existing == candidate) {
        items.push(candidate.to_string());
    }
}

fn collect_keywords(text: &str, keywords: &mut Vec<String>) {
    let lowered = text.to_lowercase();
    for token in lowered.split(|c: char| !(c.is_alphanumeric() || c == '_')) {
        if token.len() > 3 && !STOP_WORDS.contains(&token) {
            push_unique(keywords, token);
        }
    }
}

/// Build the fan-out queries: up to 3 genre queries, 2 author queries, and
/// one combined keyword query, falling back to [`FALLBACK_QUERY`].
pub fn build_queries(signals: &PreferenceSignals) -> Vec<String> {
    let mut queries = Vec::new();

    for genre in signals.genres.iter().take(3) {
        queries.push(format!("subject:{}", genre));
    }
    for author in signals.authors.iter().take(2) {
        queries.push(format!("inauthor:{}", author));
    }
    if !signals.keywords.is_empty() {
        let combined: Vec<&str> = signals.keywords.iter().take(3).map(String::as_str).collect();
        queries.push(combined.join(" "));
    }

    if queries.is_empty() {
        queries.push(FALLBACK_QUERY.to_string());
    }

    queries
}

/// Keep candidates with an id, a descriptive block, a cover, an unseen id
/// (first-seen wins), and no current list membership.
pub fn filter_candidates(merged: Vec<Book>, owned: &HashSet<String>) -> Vec<Book> {
    let mut seen = HashSet::new();

    merged
        .into_iter()
        .filter(|book| {
            !book.id.is_empty()
                && book.info().map(|i| i.has_thumbnail()).unwrap_or(false)
                && !owned.contains(&book.id)
                && seen.insert(book.id.clone())
        })
        .collect()
}

/// Stable sort: average rating descending, ties by ratings count descending.
pub fn rank(books: &mut [Book]) {
    books.sort_by(|a, b| {
        b.average_rating()
            .total_cmp(&a.average_rating())
            .then_with(|| b.ratings_count().cmp(&a.ratings_count()))
    });
}

/// Run the full pipeline against the catalog.
///
/// Queries run concurrently; a failed query is logged and contributes an empty
/// result set. Only a task join failure surfaces as an error.
pub async fn generate(
    catalog: Arc<dyn CatalogClient>,
    read_books: &[Book],
    owned: &HashSet<String>,
) -> AppResult<Vec<Book>> {
    let signals = extract_signals(read_books);
    let queries = build_queries(&signals);

    tracing::info!(
        queries = queries.len(),
        history = read_books.len(),
        "Generating recommendations"
    );

    let mut tasks = Vec::new();
    for query in queries {
        let catalog = Arc::clone(&catalog);
        let task = tokio::spawn(async move {
            match catalog.search(&query).await {
                Ok(books) => books,
                Err(e) => {
                    tracing::warn!(
                        query = %query,
                        error = %e,
                        "Recommendation query failed, treating as empty"
                    );
                    Vec::new()
                }
            }
        });
        tasks.push(task);
    }

    // Join in spawn order so the merge preserves query order
    let mut merged = Vec::new();
    for task in tasks {
        let books = task.await.map_err(|e| AppError::Internal(e.to_string()))?;
        merged.extend(books);
    }

    let mut candidates = filter_candidates(merged, owned);
    rank(&mut candidates);
    candidates.truncate(MAX_RECOMMENDATIONS);

    tracing::info!(recommended = candidates.len(), "Recommendations generated");

    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ImageLinks, VolumeInfo};
    use crate::services::providers::MockCatalogClient;

    fn read_book(id: &str, categories: &[&str], authors: &[&str], title: &str) -> Book {
        Book {
            id: id.to_string(),
            volume_info: Some(VolumeInfo {
                title: Some(title.to_string()),
                authors: authors.iter().map(|s| s.to_string()).collect(),
                categories: categories.iter().map(|s| s.to_string()).collect(),
                ..Default::default()
            }),
        }
    }

    fn candidate(id: &str, rating: Option<f64>, count: Option<u32>) -> Book {
        Book {
            id: id.to_string(),
            volume_info: Some(VolumeInfo {
                average_rating: rating,
                ratings_count: count,
                image_links: Some(ImageLinks {
                    thumbnail: Some(format!("http://covers.example/{}.jpg", id)),
                    small_thumbnail: None,
                }),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn test_stop_words_are_a_fixed_table() {
        // Contract table: every entry is long enough to survive the length
        // rule and appears exactly once.
        let mut unique = HashSet::new();
        for word in STOP_WORDS {
            assert!(word.len() > 3, "{} would be dropped by the length rule", word);
            assert!(unique.insert(word), "duplicate stop word {}", word);
        }
        assert!(STOP_WORDS.contains(&"this"));
        assert!(STOP_WORDS.contains(&"would"));
        assert!(STOP_WORDS.contains(&"once"));
    }

    #[test]
    fn test_extract_signals_discovery_order() {
        let books = vec![
            read_book(
                "r1",
                &["Fantasy", "Adventure"],
                &["Ursula K. Le Guin"],
                "A Wizard of Earthsea",
            ),
            read_book("r2", &["Fantasy", "Classics"], &["J.R.R. Tolkien"], ""),
        ];

        let signals = extract_signals(&books);
        assert_eq!(signals.genres, vec!["Fantasy", "Adventure", "Classics"]);
        assert_eq!(
            signals.authors,
            vec!["Ursula K. Le Guin", "J.R.R. Tolkien"]
        );
        // "wizard" and "earthsea" survive; short and stop tokens do not
        assert_eq!(signals.keywords, vec!["wizard", "earthsea"]);
    }

    #[test]
    fn test_extract_signals_keyword_rules() {
        let books = vec![Book {
            id: "r1".to_string(),
            volume_info: Some(VolumeInfo {
                title: Some("This Bright Dust".to_string()),
                description: Some("A story about dust, and those who breathe it.".to_string()),
                ..Default::default()
            }),
        }];

        let signals = extract_signals(&books);
        // "this"/"about"/"those" are stop words, "and"/"who"/"it" too short,
        // "dust" deduplicated across title and description
        assert_eq!(signals.keywords, vec!["bright", "dust", "story", "breathe"]);
    }

    #[test]
    fn test_extract_signals_skips_books_without_info() {
        let books = vec![Book {
            id: "bare".to_string(),
            volume_info: None,
        }];
        assert!(extract_signals(&books).is_empty());
    }

    #[test]
    fn test_build_queries_caps_and_shapes() {
        let signals = PreferenceSignals {
            genres: vec!["Fantasy".into(), "Scifi".into(), "Horror".into(), "Extra".into()],
            authors: vec!["Le Guin".into(), "Tolkien".into(), "Herbert".into()],
            keywords: vec!["dragon".into(), "desert".into(), "spice".into(), "worm".into()],
        };

        let queries = build_queries(&signals);
        assert_eq!(
            queries,
            vec![
                "subject:Fantasy",
                "subject:Scifi",
                "subject:Horror",
                "inauthor:Le Guin",
                "inauthor:Tolkien",
                "dragon desert spice",
            ]
        );
    }

    #[test]
    fn test_build_queries_fallback() {
        let queries = build_queries(&PreferenceSignals::default());
        assert_eq!(queries, vec![FALLBACK_QUERY]);
    }

    #[test]
    fn test_filter_first_seen_wins_and_exclusions() {
        let owned: HashSet<String> = ["owned1".to_string()].into_iter().collect();

        let mut duplicate = candidate("dup", Some(1.0), None);
        duplicate.volume_info.as_mut().unwrap().title = Some("first".to_string());
        let mut later_duplicate = candidate("dup", Some(5.0), None);
        later_duplicate.volume_info.as_mut().unwrap().title = Some("second".to_string());

        let no_cover = Book {
            id: "plain".to_string(),
            volume_info: Some(VolumeInfo::default()),
        };
        let no_info = Book {
            id: "bare".to_string(),
            volume_info: None,
        };
        let empty_id = candidate("", Some(5.0), Some(10));

        let merged = vec![
            duplicate,
            candidate("owned1", Some(5.0), Some(10)),
            no_cover,
            no_info,
            empty_id,
            later_duplicate,
            candidate("keep", Some(2.0), None),
        ];

        let filtered = filter_candidates(merged, &owned);
        let ids: Vec<&str> = filtered.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["dup", "keep"]);
        assert_eq!(
            filtered[0].info().unwrap().title.as_deref(),
            Some("first")
        );
    }

    #[test]
    fn test_rank_rating_then_count() {
        let mut books = vec![
            candidate("a", Some(4.5), Some(100)),
            candidate("b", Some(4.5), Some(50)),
            candidate("c", Some(5.0), Some(10)),
        ];

        rank(&mut books);
        let ids: Vec<&str> = books.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_rank_missing_values_and_stability() {
        let mut books = vec![
            candidate("no_rating", None, Some(500)),
            candidate("tie1", Some(3.0), None),
            candidate("tie2", Some(3.0), None),
        ];

        rank(&mut books);
        let ids: Vec<&str> = books.iter().map(|b| b.id.as_str()).collect();
        // missing rating sorts as 0; exact ties keep original order
        assert_eq!(ids, vec!["tie1", "tie2", "no_rating"]);
    }

    #[tokio::test]
    async fn test_generate_empty_history_issues_single_fallback_query() {
        let mut catalog = MockCatalogClient::new();
        catalog
            .expect_search()
            .withf(|query| query == FALLBACK_QUERY)
            .times(1)
            .returning(|_| Ok(vec![]));

        let books = generate(Arc::new(catalog), &[], &HashSet::new())
            .await
            .unwrap();
        assert!(books.is_empty());
    }

    #[tokio::test]
    async fn test_generate_absorbs_query_failures() {
        let mut catalog = MockCatalogClient::new();
        catalog.expect_search().returning(|_| {
            Err(crate::error::AppError::ExternalApi(
                "catalog down".to_string(),
            ))
        });

        let history = vec![read_book("r1", &["Fantasy"], &[], "")];
        let books = generate(Arc::new(catalog), &history, &HashSet::new())
            .await
            .unwrap();
        assert!(books.is_empty());
    }

    #[tokio::test]
    async fn test_generate_merges_filters_ranks_and_truncates() {
        let mut catalog = MockCatalogClient::new();
        catalog
            .expect_search()
            .withf(|query| query == "subject:Fantasy")
            .times(1)
            .returning(|_| {
                Ok(vec![
                    candidate("dup", Some(3.5), Some(5)),
                    candidate("owned", Some(5.0), Some(999)),
                ])
            });
        catalog
            .expect_search()
            .withf(|query| query == "inauthor:Le Guin")
            .times(1)
            .returning(|_| {
                let mut books = vec![candidate("dup", Some(5.0), Some(5))];
                for i in 0..12 {
                    books.push(candidate(&format!("fill{}", i), Some(3.0), Some(i)));
                }
                Ok(books)
            });

        let history = vec![read_book("r1", &["Fantasy"], &["Le Guin"], "")];
        let owned: HashSet<String> = ["owned".to_string()].into_iter().collect();

        let books = generate(Arc::new(catalog), &history, &owned).await.unwrap();

        assert_eq!(books.len(), MAX_RECOMMENDATIONS);
        assert!(!books.iter().any(|b| b.id == "owned"));
        // first-seen copy of "dup" (rating 3.5) survives and outranks the fills
        assert_eq!(books.iter().filter(|b| b.id == "dup").count(), 1);
        assert_eq!(books[0].id, "dup");
        assert_eq!(books[0].average_rating(), 3.5);
        // fills ranked by descending ratings count, lowest ones truncated
        assert_eq!(books[1].id, "fill11");
        assert_eq!(books.last().unwrap().id, "fill3");
    }
}
