//! Derived read views over the record store.
//!
//! Everything here is recomputed from a store snapshot at call time.
//! There is no caching or incremental maintenance, so results always
//! reflect the latest committed write.

use crate::entity::{Book, RecordId, User};
use crate::error::{ServiceError, ServiceResult};
use crate::lifecycle::SwapStatus;
use crate::store::RecordStore;
use crate::types::Timestamp;
use chrono::Datelike;

/// Maximum number of books returned by [`recent_books`].
pub const RECENT_BOOKS_LIMIT: usize = 10;

/// Maximum number of users returned by [`monthly_rankings`].
pub const RANKING_LIMIT: usize = 5;

/// A user ranked by completed swaps in the current calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedSwapper {
    /// The ranked user.
    pub user: User,
    /// Completed swaps credited to the user inside the window.
    pub completed_swaps: u32,
    /// The user's most recently listed book, if any.
    pub latest_book: Option<Book>,
}

/// Case-insensitive substring search over title, author, and genre.
///
/// # Errors
///
/// Returns [`ServiceError::NotFound`] when nothing matches; an empty
/// result is a failure per the operation's contract, not an empty list.
pub fn search_books(store: &RecordStore, term: &str) -> ServiceResult<Vec<Book>> {
    let needle = term.to_lowercase();
    let matches: Vec<Book> = store
        .books()
        .values()?
        .into_iter()
        .filter(|book| {
            book.title.to_lowercase().contains(&needle)
                || book.author.to_lowercase().contains(&needle)
                || book.genre.to_lowercase().contains(&needle)
        })
        .collect();

    if matches.is_empty() {
        return Err(ServiceError::not_found(format!(
            "no books match {term:?}"
        )));
    }
    Ok(matches)
}

/// The ten most recently listed books, newest first.
///
/// # Errors
///
/// Returns [`ServiceError::NotFound`] when the store holds no books.
pub fn recent_books(store: &RecordStore) -> ServiceResult<Vec<Book>> {
    let mut books = store.books().values()?;
    if books.is_empty() {
        return Err(ServiceError::not_found("no books listed yet"));
    }
    books.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    books.truncate(RECENT_BOOKS_LIMIT);
    Ok(books)
}

/// Number of books listed by `user_id`.
pub fn count_books_by_user(store: &RecordStore, user_id: RecordId) -> ServiceResult<usize> {
    Ok(store
        .books()
        .values()?
        .iter()
        .filter(|book| book.user_id == user_id)
        .count())
}

/// Number of swap requests with `status` involving `user_id` as either
/// party.
pub fn count_swap_requests_with_status(
    store: &RecordStore,
    user_id: RecordId,
    status: SwapStatus,
) -> ServiceResult<usize> {
    Ok(store
        .swap_requests()
        .values()?
        .iter()
        .filter(|request| request.status == status && request.involves(user_id))
        .count())
}

/// Total number of completed swap requests across the registry.
pub fn count_completed_swap_requests(store: &RecordStore) -> ServiceResult<usize> {
    Ok(store
        .swap_requests()
        .values()?
        .iter()
        .filter(|request| request.status == SwapStatus::Completed)
        .count())
}

fn in_current_month(created_at: Timestamp, now: Timestamp) -> bool {
    created_at.year() == now.year() && created_at.month() == now.month()
}

/// Ranks users by completed swaps in the calendar month of `now`.
///
/// Both parties of each completed request are credited. Users are
/// ordered by count descending; the sort is stable, so ties keep the
/// order in which users first appeared in the window. The top
/// [`RANKING_LIMIT`] resolvable users are returned, each paired with
/// their most recently listed book.
///
/// # Errors
///
/// Returns [`ServiceError::NotFound`] when the window holds no
/// completed swaps.
pub fn monthly_rankings(store: &RecordStore, now: Timestamp) -> ServiceResult<Vec<RankedSwapper>> {
    let mut counts: Vec<(RecordId, u32)> = Vec::new();
    for request in store.swap_requests().values()? {
        if request.status != SwapStatus::Completed || !in_current_month(request.created_at, now) {
            continue;
        }
        for party in [request.owner_id, request.requester_id] {
            match counts.iter_mut().find(|(id, _)| *id == party) {
                Some((_, count)) => *count += 1,
                None => counts.push((party, 1)),
            }
        }
    }

    if counts.is_empty() {
        return Err(ServiceError::not_found("no completed swaps this month"));
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let mut ranked = Vec::new();
    for (user_id, completed_swaps) in counts {
        if ranked.len() == RANKING_LIMIT {
            break;
        }
        // A party that no longer resolves (no cascade on deletes) is
        // skipped rather than surfaced as an error.
        let Some(user) = store.users().get(user_id)? else {
            continue;
        };
        let latest_book = latest_book_for(store, user_id)?;
        ranked.push(RankedSwapper {
            user,
            completed_swaps,
            latest_book,
        });
    }

    if ranked.is_empty() {
        return Err(ServiceError::not_found("no completed swaps this month"));
    }
    Ok(ranked)
}

fn latest_book_for(store: &RecordStore, user_id: RecordId) -> ServiceResult<Option<Book>> {
    Ok(store
        .books()
        .values()?
        .into_iter()
        .filter(|book| book.user_id == user_id)
        .max_by_key(|book| book.created_at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::SwapRequest;
    use crate::types::Principal;
    use chrono::{Duration, TimeZone, Utc};

    fn ts(year: i32, month: u32, day: u32) -> Timestamp {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    fn add_user(store: &mut RecordStore, name: &str) -> RecordId {
        let user = User {
            id: RecordId::new(),
            owner: Principal::new(format!("owner-{name}")),
            name: name.to_string(),
            email: format!("{name}@example.com"),
            phone_number: "0123456789".to_string(),
            created_at: ts(2026, 1, 1),
        };
        store.users_mut().insert(&user).unwrap();
        user.id
    }

    fn add_book(store: &mut RecordStore, user_id: RecordId, title: &str, genre: &str) -> RecordId {
        add_book_at(store, user_id, title, genre, ts(2026, 1, 2))
    }

    fn add_book_at(
        store: &mut RecordStore,
        user_id: RecordId,
        title: &str,
        genre: &str,
        created_at: Timestamp,
    ) -> RecordId {
        let book = Book {
            id: RecordId::new(),
            user_id,
            title: title.to_string(),
            author: "Test Author".to_string(),
            genre: genre.to_string(),
            description: "A test book".to_string(),
            image_url: "https://covers.example/test.png".to_string(),
            created_at,
        };
        store.books_mut().insert(&book).unwrap();
        book.id
    }

    fn add_request(
        store: &mut RecordStore,
        owner_id: RecordId,
        requester_id: RecordId,
        book_id: RecordId,
        status: SwapStatus,
        created_at: Timestamp,
    ) {
        let request = SwapRequest {
            id: RecordId::new(),
            owner_id,
            requester_id,
            book_id,
            status,
            created_at,
        };
        store.swap_requests_mut().insert(&request).unwrap();
    }

    #[test]
    fn search_matches_any_field_case_insensitively() {
        let mut store = RecordStore::in_memory();
        let user = add_user(&mut store, "ada");
        add_book(&mut store, user, "The Hobbit", "Fantasy");
        add_book(&mut store, user, "Dune", "Science Fiction");

        let by_genre = search_books(&store, "fantasy").unwrap();
        assert_eq!(by_genre.len(), 1);
        assert_eq!(by_genre[0].title, "The Hobbit");

        let by_title = search_books(&store, "dun").unwrap();
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].title, "Dune");

        let by_author = search_books(&store, "test author").unwrap();
        assert_eq!(by_author.len(), 2);
    }

    #[test]
    fn search_without_matches_is_not_found() {
        let mut store = RecordStore::in_memory();
        let user = add_user(&mut store, "ada");
        add_book(&mut store, user, "Dune", "Science Fiction");

        let err = search_books(&store, "cookbook").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn recent_books_sorted_and_truncated() {
        let mut store = RecordStore::in_memory();
        let user = add_user(&mut store, "ada");
        let base = ts(2026, 3, 1);
        for day in 0..12 {
            add_book_at(
                &mut store,
                user,
                &format!("Book {day}"),
                "Fiction",
                base + Duration::days(day),
            );
        }

        let recents = recent_books(&store).unwrap();
        assert_eq!(recents.len(), RECENT_BOOKS_LIMIT);
        assert_eq!(recents[0].title, "Book 11");
        assert!(recents
            .windows(2)
            .all(|pair| pair[0].created_at >= pair[1].created_at));
    }

    #[test]
    fn recent_books_on_empty_store_is_not_found() {
        let store = RecordStore::in_memory();
        assert!(recent_books(&store).unwrap_err().is_not_found());
    }

    #[test]
    fn counters_return_zero_without_failing() {
        let store = RecordStore::in_memory();
        let ghost = RecordId::new();

        assert_eq!(count_books_by_user(&store, ghost).unwrap(), 0);
        assert_eq!(
            count_swap_requests_with_status(&store, ghost, SwapStatus::Pending).unwrap(),
            0
        );
        assert_eq!(count_completed_swap_requests(&store).unwrap(), 0);
    }

    #[test]
    fn status_counter_sees_both_parties() {
        let mut store = RecordStore::in_memory();
        let owner = add_user(&mut store, "owner");
        let requester = add_user(&mut store, "requester");
        let book = add_book(&mut store, owner, "Dune", "SF");
        add_request(
            &mut store,
            owner,
            requester,
            book,
            SwapStatus::Pending,
            ts(2026, 6, 1),
        );

        for party in [owner, requester] {
            assert_eq!(
                count_swap_requests_with_status(&store, party, SwapStatus::Pending).unwrap(),
                1
            );
        }
    }

    #[test]
    fn rankings_credit_both_parties_and_order_by_count() {
        let mut store = RecordStore::in_memory();
        let now = ts(2026, 8, 7);
        let busy = add_user(&mut store, "busy");
        let quiet = add_user(&mut store, "quiet");
        let third = add_user(&mut store, "third");

        // busy completes 3 swaps this month, quiet 1 (as requester).
        for i in 0..3 {
            let partner = if i == 0 { quiet } else { third };
            let book = add_book(&mut store, busy, &format!("B{i}"), "Fiction");
            add_request(
                &mut store,
                busy,
                partner,
                book,
                SwapStatus::Completed,
                now - Duration::days(i),
            );
        }

        let ranked = monthly_rankings(&store, now).unwrap();
        assert_eq!(ranked[0].user.name, "busy");
        assert_eq!(ranked[0].completed_swaps, 3);
        // third was a requester twice, quiet once.
        assert_eq!(ranked[1].user.name, "third");
        assert_eq!(ranked[2].user.name, "quiet");
        assert_eq!(ranked[2].completed_swaps, 1);
    }

    #[test]
    fn rankings_ignore_other_months_and_statuses() {
        let mut store = RecordStore::in_memory();
        let now = ts(2026, 8, 7);
        let owner = add_user(&mut store, "owner");
        let requester = add_user(&mut store, "requester");
        let book = add_book(&mut store, owner, "Dune", "SF");

        // Completed, but in July / in August of last year / still pending.
        add_request(
            &mut store,
            owner,
            requester,
            book,
            SwapStatus::Completed,
            ts(2026, 7, 31),
        );
        add_request(
            &mut store,
            owner,
            requester,
            book,
            SwapStatus::Completed,
            ts(2025, 8, 7),
        );
        add_request(
            &mut store,
            owner,
            requester,
            book,
            SwapStatus::Pending,
            now,
        );

        assert!(monthly_rankings(&store, now).unwrap_err().is_not_found());
    }

    #[test]
    fn rankings_truncate_to_limit() {
        let mut store = RecordStore::in_memory();
        let now = ts(2026, 8, 7);

        // Seven disjoint pairs, each with one completed swap.
        for i in 0..7 {
            let owner = add_user(&mut store, &format!("owner{i}"));
            let requester = add_user(&mut store, &format!("requester{i}"));
            let book = add_book(&mut store, owner, &format!("B{i}"), "Fiction");
            add_request(&mut store, owner, requester, book, SwapStatus::Completed, now);
        }

        let ranked = monthly_rankings(&store, now).unwrap();
        assert_eq!(ranked.len(), RANKING_LIMIT);
        assert!(ranked.iter().all(|r| r.completed_swaps == 1));
    }

    #[test]
    fn rankings_attach_latest_book_or_none() {
        let mut store = RecordStore::in_memory();
        let now = ts(2026, 8, 7);
        let owner = add_user(&mut store, "owner");
        let requester = add_user(&mut store, "requester");
        let old = add_book_at(&mut store, owner, "Older", "Fiction", ts(2026, 8, 1));
        let newest = add_book_at(&mut store, owner, "Newest", "Fiction", ts(2026, 8, 5));
        let _ = old;
        add_request(&mut store, owner, requester, newest, SwapStatus::Completed, now);

        let ranked = monthly_rankings(&store, now).unwrap();
        let owner_rank = ranked.iter().find(|r| r.user.name == "owner").unwrap();
        assert_eq!(
            owner_rank.latest_book.as_ref().map(|b| b.title.as_str()),
            Some("Newest")
        );

        let requester_rank = ranked.iter().find(|r| r.user.name == "requester").unwrap();
        assert!(requester_rank.latest_book.is_none());
    }

    #[test]
    fn rankings_skip_unresolvable_parties() {
        let mut store = RecordStore::in_memory();
        let now = ts(2026, 8, 7);
        let owner = add_user(&mut store, "owner");
        let ghost = RecordId::new();
        let book = add_book(&mut store, owner, "Dune", "SF");
        add_request(&mut store, owner, ghost, book, SwapStatus::Completed, now);

        let ranked = monthly_rankings(&store, now).unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].user.name, "owner");
    }
}
