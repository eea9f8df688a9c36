/// Reading-list operations
///
/// All mutation of the three lists goes through these functions, which keep
/// the at-most-one-list invariant. They only touch in-memory state; the
/// [`App`](crate::app::App) facade persists the lists document right after
/// each successful call.
use std::collections::HashSet;

use crate::error::{AppError, AppResult};
use crate::models::{Book, ListName, MutationOutcome};
use crate::session::SessionState;

/// Append a book to a list, rejecting ids that are already owned anywhere.
pub fn add_to_list(
    session: &mut SessionState,
    book: Book,
    list: ListName,
) -> AppResult<MutationOutcome> {
    if let Some(existing) = session.lists.containing(&book.id) {
        return Err(AppError::AlreadyListed(format!(
            "{} is already in {}",
            book.id, existing
        )));
    }

    tracing::debug!(book_id = %book.id, list = %list, "Adding book to list");
    session.lists.get_mut(list).push(book);

    Ok(MutationOutcome {
        lists_changed: true,
        search_cache_changed: false,
        recommendations_stale: list == ListName::ReadBooks,
    })
}

/// Remove a book from the named list.
pub fn remove_from_list(
    session: &mut SessionState,
    book_id: &str,
    list: ListName,
) -> AppResult<MutationOutcome> {
    let books = session.lists.get_mut(list);
    let position = books
        .iter()
        .position(|b| b.id == book_id)
        .ok_or_else(|| AppError::NotFound(format!("{} is not in {}", book_id, list)))?;
    books.remove(position);

    tracing::debug!(book_id = %book_id, list = %list, "Removed book from list");

    Ok(MutationOutcome {
        lists_changed: true,
        search_cache_changed: false,
        recommendations_stale: list == ListName::ReadBooks,
    })
}

/// Move a book into `to`.
///
/// With `from` given the book is relocated from that list. Without `from` the
/// record is looked up in the search cache, then the recommendation cache;
/// this is the first-add path for books coming straight from a results view.
/// Moving a book that is already in `to` reports success without duplicating.
pub fn move_to_list(
    session: &mut SessionState,
    book_id: &str,
    from: Option<ListName>,
    to: ListName,
) -> AppResult<MutationOutcome> {
    // Already where it belongs: idempotent success, no duplicate
    if session.lists.get(to).iter().any(|b| b.id == book_id) {
        return Ok(MutationOutcome::default());
    }

    // A stale view can ask for a first-add of a book that is in fact owned.
    // Relocating from its actual list keeps the invariant intact.
    let from = from.or_else(|| session.lists.containing(book_id));

    let book = match from {
        Some(from_list) => {
            let books = session.lists.get_mut(from_list);
            let position = books.iter().position(|b| b.id == book_id).ok_or_else(|| {
                AppError::NotFound(format!("{} is not in {}", book_id, from_list))
            })?;
            books.remove(position)
        }
        None => session
            .last_results
            .iter()
            .find(|b| b.id == book_id)
            .or_else(|| {
                session
                    .recommendations
                    .books
                    .iter()
                    .find(|b| b.id == book_id)
            })
            .cloned()
            .ok_or_else(|| {
                AppError::NotFound(format!("{} is in no list and no cached results", book_id))
            })?,
    };

    tracing::debug!(book_id = %book_id, from = ?from, to = %to, "Moving book");
    session.lists.get_mut(to).push(book);

    Ok(MutationOutcome {
        lists_changed: true,
        search_cache_changed: false,
        recommendations_stale: from == Some(ListName::ReadBooks) || to == ListName::ReadBooks,
    })
}

/// The list currently holding the id, if any.
pub fn get_list_of(session: &SessionState, book_id: &str) -> Option<ListName> {
    session.lists.containing(book_id)
}

/// Union of ids across all three lists.
pub fn all_owned_ids(session: &SessionState) -> HashSet<String> {
    session.lists.owned_ids()
}

/// Look up a record by id: lists first, then search cache, then
/// recommendation cache.
pub fn get_by_id<'a>(session: &'a SessionState, book_id: &str) -> Option<&'a Book> {
    session
        .lists
        .find(book_id)
        .or_else(|| session.last_results.iter().find(|b| b.id == book_id))
        .or_else(|| {
            session
                .recommendations
                .books
                .iter()
                .find(|b| b.id == book_id)
        })
}
