use std::collections::HashSet;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::Book;

/// The three reading lists a book can be filed under
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ListName {
    CurrentlyReading,
    WantToRead,
    ReadBooks,
}

impl ListName {
    pub const ALL: [ListName; 3] = [
        ListName::CurrentlyReading,
        ListName::WantToRead,
        ListName::ReadBooks,
    ];
}

impl Display for ListName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListName::CurrentlyReading => write!(f, "currentlyReading"),
            ListName::WantToRead => write!(f, "wantToRead"),
            ListName::ReadBooks => write!(f, "readBooks"),
        }
    }
}

/// The user's reading lists, persisted as a single JSON document
///
/// Lists are insertion-ordered. Invariant: a book id appears in at most one
/// list at any time; all mutation goes through the list service, which
/// enforces it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ReadingLists {
    pub currently_reading: Vec<Book>,
    pub want_to_read: Vec<Book>,
    pub read_books: Vec<Book>,
}

impl ReadingLists {
    pub fn get(&self, name: ListName) -> &Vec<Book> {
        match name {
            ListName::CurrentlyReading => &self.currently_reading,
            ListName::WantToRead => &self.want_to_read,
            ListName::ReadBooks => &self.read_books,
        }
    }

    pub fn get_mut(&mut self, name: ListName) -> &mut Vec<Book> {
        match name {
            ListName::CurrentlyReading => &mut self.currently_reading,
            ListName::WantToRead => &mut self.want_to_read,
            ListName::ReadBooks => &mut self.read_books,
        }
    }

    /// The list currently holding the given id, if any
    pub fn containing(&self, book_id: &str) -> Option<ListName> {
        ListName::ALL
            .into_iter()
            .find(|&name| self.get(name).iter().any(|b| b.id == book_id))
    }

    /// Union of ids across all three lists
    pub fn owned_ids(&self) -> HashSet<String> {
        ListName::ALL
            .into_iter()
            .flat_map(|name| self.get(name).iter().map(|b| b.id.clone()))
            .collect()
    }

    pub fn find(&self, book_id: &str) -> Option<&Book> {
        ListName::ALL
            .into_iter()
            .find_map(|name| self.get(name).iter().find(|b| b.id == book_id))
    }
}

/// What a successful mutation changed
///
/// Returned by every mutating operation so the presentation layer can decide
/// what to redraw and whether to refresh recommendations, instead of
/// re-rendering everything unconditionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MutationOutcome {
    pub lists_changed: bool,
    pub search_cache_changed: bool,
    pub recommendations_stale: bool,
}
