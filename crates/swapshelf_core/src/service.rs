//! Registry facade: the callable operation surface.

use crate::aggregate::{self, RankedSwapper};
use crate::clock::{Clock, SystemClock};
use crate::entity::{
    Book, BookPayload, Feedback, FeedbackPayload, FeedbackUpdate, RecordId, SwapRequest,
    SwapRequestPayload, User, UserPayload,
};
use crate::error::{ServiceError, ServiceResult};
use crate::lifecycle::{self, SwapStatus};
use crate::store::RecordStore;
use crate::types::Principal;
use crate::validation;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info};

/// The registry facade.
///
/// `SwapRegistry` is the single entry point for collaborators. Every
/// operation validates its input, performs existence checks before any
/// mutation, touches at most one map, and returns a tagged result -
/// expected failures are values, never panics.
///
/// # Concurrency
///
/// External calls are logically serialized: the store sits behind a
/// single reader-writer lock, and each mutating operation holds the
/// write guard across its whole validate-read-write span. Queries share
/// the read guard and always observe the latest committed write.
///
/// # Example
///
/// ```rust
/// use swapshelf_core::{SwapRegistry, UserPayload};
///
/// let registry = SwapRegistry::in_memory();
/// let user = registry
///     .create_user_profile(
///         &"caller-1".into(),
///         UserPayload::new("Ada", "ada@example.com", "0123456789"),
///     )
///     .unwrap();
/// assert_eq!(registry.get_user_profile(user.id).unwrap(), user);
/// ```
pub struct SwapRegistry {
    /// The record store, behind the serializing lock.
    store: RwLock<RecordStore>,
    /// Source of creation stamps and the ranking window.
    clock: Arc<dyn Clock>,
}

impl SwapRegistry {
    /// Creates a registry over `store`, stamping time from `clock`.
    pub fn new(store: RecordStore, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: RwLock::new(store),
            clock,
        }
    }

    /// Creates a registry over in-memory maps and the system clock.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(RecordStore::in_memory(), Arc::new(SystemClock))
    }

    // === Users ===

    /// Creates a user profile owned by `caller`.
    ///
    /// # Errors
    ///
    /// `InvalidPayload` when a field is missing or malformed, or when the
    /// email is already registered.
    pub fn create_user_profile(
        &self,
        caller: &Principal,
        payload: UserPayload,
    ) -> ServiceResult<User> {
        validation::validate_user_payload(&payload)?;

        let mut store = self.store.write();
        Self::ensure_email_free(&store, &payload.email, None)?;

        let user = User {
            id: RecordId::new(),
            owner: caller.clone(),
            name: payload.name,
            email: payload.email,
            phone_number: payload.phone_number,
            created_at: self.clock.now(),
        };
        store.users_mut().insert(&user)?;
        info!("created user profile {}", user.id);
        Ok(user)
    }

    /// Replaces the mutable fields of an existing user profile.
    ///
    /// `id`, `owner`, and `created_at` are immutable.
    ///
    /// # Errors
    ///
    /// `NotFound` when `id` doesn't resolve; `InvalidPayload` on a
    /// malformed payload or an email collision with another user.
    pub fn update_user_profile(&self, id: RecordId, payload: UserPayload) -> ServiceResult<User> {
        validation::validate_user_payload(&payload)?;

        let mut store = self.store.write();
        let existing = store
            .users()
            .get(id)?
            .ok_or_else(|| ServiceError::not_found(format!("user {id} does not exist")))?;
        Self::ensure_email_free(&store, &payload.email, Some(id))?;

        let user = User {
            name: payload.name,
            email: payload.email,
            phone_number: payload.phone_number,
            ..existing
        };
        store.users_mut().insert(&user)?;
        debug!("updated user profile {id}");
        Ok(user)
    }

    /// Gets a user profile by ID.
    ///
    /// # Errors
    ///
    /// `NotFound` when `id` doesn't resolve.
    pub fn get_user_profile(&self, id: RecordId) -> ServiceResult<User> {
        self.store
            .read()
            .users()
            .get(id)?
            .ok_or_else(|| ServiceError::not_found(format!("user {id} does not exist")))
    }

    /// Gets the profile created by `caller`.
    ///
    /// # Errors
    ///
    /// `NotFound` when the caller has no profile.
    pub fn get_user_profile_by_owner(&self, caller: &Principal) -> ServiceResult<User> {
        let store = self.store.read();
        store
            .users()
            .values()?
            .into_iter()
            .find(|user| user.owner == *caller)
            .ok_or_else(|| ServiceError::not_found("caller has no user profile"))
    }

    /// Returns the number of registered users.
    pub fn get_total_users(&self) -> ServiceResult<usize> {
        self.store.read().users().len()
    }

    // === Books ===

    /// Lists a book for swapping.
    ///
    /// # Errors
    ///
    /// `InvalidPayload` on a malformed payload; `NotFound` when the
    /// owning user doesn't resolve.
    pub fn list_book(&self, payload: BookPayload) -> ServiceResult<Book> {
        validation::validate_book_payload(&payload)?;

        let mut store = self.store.write();
        Self::ensure_user_exists(&store, payload.user_id)?;

        let book = Book {
            id: RecordId::new(),
            user_id: payload.user_id,
            title: payload.title,
            author: payload.author,
            genre: payload.genre,
            description: payload.description,
            image_url: payload.image_url,
            created_at: self.clock.now(),
        };
        store.books_mut().insert(&book)?;
        info!("listed book {}", book.id);
        Ok(book)
    }

    /// Replaces the mutable fields of an existing book listing.
    ///
    /// # Errors
    ///
    /// `NotFound` when `id` or the payload's owning user doesn't
    /// resolve; `InvalidPayload` on a malformed payload.
    pub fn update_book(&self, id: RecordId, payload: BookPayload) -> ServiceResult<Book> {
        validation::validate_book_payload(&payload)?;

        let mut store = self.store.write();
        let existing = store
            .books()
            .get(id)?
            .ok_or_else(|| ServiceError::not_found(format!("book {id} does not exist")))?;
        Self::ensure_user_exists(&store, payload.user_id)?;

        let book = Book {
            user_id: payload.user_id,
            title: payload.title,
            author: payload.author,
            genre: payload.genre,
            description: payload.description,
            image_url: payload.image_url,
            ..existing
        };
        store.books_mut().insert(&book)?;
        debug!("updated book {id}");
        Ok(book)
    }

    /// Gets a book by ID.
    ///
    /// # Errors
    ///
    /// `NotFound` when `id` doesn't resolve.
    pub fn get_book(&self, id: RecordId) -> ServiceResult<Book> {
        self.store
            .read()
            .books()
            .get(id)?
            .ok_or_else(|| ServiceError::not_found(format!("book {id} does not exist")))
    }

    /// Returns all listed books.
    ///
    /// # Errors
    ///
    /// `NotFound` when no books are listed.
    pub fn get_all_books(&self) -> ServiceResult<Vec<Book>> {
        let books = self.store.read().books().values()?;
        Self::non_empty(books, "no books listed yet")
    }

    /// Returns the books listed by `user_id`.
    ///
    /// # Errors
    ///
    /// `NotFound` when the user has no listings.
    pub fn get_books_by_user(&self, user_id: RecordId) -> ServiceResult<Vec<Book>> {
        let books: Vec<Book> = self
            .store
            .read()
            .books()
            .values()?
            .into_iter()
            .filter(|book| book.user_id == user_id)
            .collect();
        Self::non_empty(books, &format!("user {user_id} has no books"))
    }

    /// Returns the books whose genre equals `genre`, case-insensitively.
    ///
    /// # Errors
    ///
    /// `NotFound` when no listing matches.
    pub fn get_books_by_genre(&self, genre: &str) -> ServiceResult<Vec<Book>> {
        let books: Vec<Book> = self
            .store
            .read()
            .books()
            .values()?
            .into_iter()
            .filter(|book| book.genre.eq_ignore_ascii_case(genre))
            .collect();
        Self::non_empty(books, &format!("no books in genre {genre:?}"))
    }

    /// Case-insensitive substring search over title, author, and genre.
    ///
    /// # Errors
    ///
    /// `NotFound` when nothing matches.
    pub fn search_books(&self, term: &str) -> ServiceResult<Vec<Book>> {
        aggregate::search_books(&self.store.read(), term)
    }

    /// Returns the number of listed books.
    pub fn get_total_books(&self) -> ServiceResult<usize> {
        self.store.read().books().len()
    }

    /// Returns the number of books listed by `user_id`.
    ///
    /// Unknown users count zero; counters never fail on a missing user.
    pub fn get_number_of_books(&self, user_id: RecordId) -> ServiceResult<usize> {
        aggregate::count_books_by_user(&self.store.read(), user_id)
    }

    /// Returns the ten most recently listed books, newest first.
    ///
    /// # Errors
    ///
    /// `NotFound` when no books are listed.
    pub fn get_recent_books(&self) -> ServiceResult<Vec<Book>> {
        aggregate::recent_books(&self.store.read())
    }

    /// Deletes a book listing and returns the removed record.
    ///
    /// Dependent swap requests and feedback are left untouched - the
    /// maps are independent and there are no cascades.
    ///
    /// # Errors
    ///
    /// `NotFound` when `id` doesn't resolve.
    pub fn delete_book(&self, id: RecordId) -> ServiceResult<Book> {
        let mut store = self.store.write();
        let existing = store
            .books()
            .get(id)?
            .ok_or_else(|| ServiceError::not_found(format!("book {id} does not exist")))?;
        store.books_mut().remove(id)?;
        info!("deleted book {id}");
        Ok(existing)
    }

    // === Swap requests ===

    /// Creates a swap request for a listed book.
    ///
    /// # Errors
    ///
    /// `NotFound` when either party or the book doesn't resolve;
    /// `InvalidPayload` when a request for the same
    /// `(owner, requester, book)` triple already exists in any status,
    /// completed ones included.
    pub fn create_swap_request(&self, payload: SwapRequestPayload) -> ServiceResult<SwapRequest> {
        let mut store = self.store.write();
        Self::ensure_user_exists(&store, payload.owner_id)?;
        Self::ensure_user_exists(&store, payload.requester_id)?;
        if !store.books().contains(payload.book_id)? {
            return Err(ServiceError::not_found(format!(
                "book {} does not exist",
                payload.book_id
            )));
        }
        Self::ensure_triple_free(&store, payload.triple(), None)?;

        let request = SwapRequest {
            id: RecordId::new(),
            owner_id: payload.owner_id,
            requester_id: payload.requester_id,
            book_id: payload.book_id,
            status: SwapStatus::Pending,
            created_at: self.clock.now(),
        };
        store.swap_requests_mut().insert(&request)?;
        info!("created swap request {}", request.id);
        Ok(request)
    }

    /// Replaces the parties and book of an existing swap request.
    ///
    /// `status` and `created_at` are preserved; the new triple must not
    /// collide with another request.
    ///
    /// # Errors
    ///
    /// `NotFound` when `id` or a referenced record doesn't resolve;
    /// `InvalidPayload` on a triple collision.
    pub fn update_swap_request(
        &self,
        id: RecordId,
        payload: SwapRequestPayload,
    ) -> ServiceResult<SwapRequest> {
        let mut store = self.store.write();
        let existing = store
            .swap_requests()
            .get(id)?
            .ok_or_else(|| ServiceError::not_found(format!("swap request {id} does not exist")))?;
        Self::ensure_user_exists(&store, payload.owner_id)?;
        Self::ensure_user_exists(&store, payload.requester_id)?;
        if !store.books().contains(payload.book_id)? {
            return Err(ServiceError::not_found(format!(
                "book {} does not exist",
                payload.book_id
            )));
        }
        Self::ensure_triple_free(&store, payload.triple(), Some(id))?;

        let request = SwapRequest {
            owner_id: payload.owner_id,
            requester_id: payload.requester_id,
            book_id: payload.book_id,
            ..existing
        };
        store.swap_requests_mut().insert(&request)?;
        debug!("updated swap request {id}");
        Ok(request)
    }

    /// Accepts a pending swap request, completing it.
    ///
    /// No cascade: competing requests for the same book stay pending.
    ///
    /// # Errors
    ///
    /// `NotFound` when `id` doesn't resolve; `InvalidPayload` when the
    /// request was already decided.
    pub fn accept_swap_request(&self, id: RecordId) -> ServiceResult<SwapRequest> {
        self.decide_swap_request(id, SwapStatus::Completed)
    }

    /// Rejects a pending swap request.
    ///
    /// # Errors
    ///
    /// `NotFound` when `id` doesn't resolve; `InvalidPayload` when the
    /// request was already decided.
    pub fn reject_swap_request(&self, id: RecordId) -> ServiceResult<SwapRequest> {
        self.decide_swap_request(id, SwapStatus::Rejected)
    }

    fn decide_swap_request(&self, id: RecordId, target: SwapStatus) -> ServiceResult<SwapRequest> {
        let mut store = self.store.write();
        let mut request = store
            .swap_requests()
            .get(id)?
            .ok_or_else(|| ServiceError::not_found(format!("swap request {id} does not exist")))?;

        request.status = lifecycle::transition(request.status, target)?;
        store.swap_requests_mut().insert(&request)?;
        info!("swap request {id} is now {}", request.status);
        Ok(request)
    }

    /// Gets a swap request by ID.
    ///
    /// # Errors
    ///
    /// `NotFound` when `id` doesn't resolve.
    pub fn get_swap_request(&self, id: RecordId) -> ServiceResult<SwapRequest> {
        self.store
            .read()
            .swap_requests()
            .get(id)?
            .ok_or_else(|| ServiceError::not_found(format!("swap request {id} does not exist")))
    }

    /// Returns all swap requests.
    ///
    /// # Errors
    ///
    /// `NotFound` when none exist.
    pub fn get_all_swap_requests(&self) -> ServiceResult<Vec<SwapRequest>> {
        let requests = self.store.read().swap_requests().values()?;
        Self::non_empty(requests, "no swap requests yet")
    }

    /// Returns the requests `user_id` initiated (as requester).
    ///
    /// # Errors
    ///
    /// `NotFound` when the user initiated none.
    pub fn get_swap_requests_by_user(&self, user_id: RecordId) -> ServiceResult<Vec<SwapRequest>> {
        let requests: Vec<SwapRequest> = self
            .store
            .read()
            .swap_requests()
            .values()?
            .into_iter()
            .filter(|request| request.requester_id == user_id)
            .collect();
        Self::non_empty(requests, &format!("user {user_id} has made no swap requests"))
    }

    /// Returns the requests addressed to `user_id`'s listings (as owner).
    ///
    /// # Errors
    ///
    /// `NotFound` when none are addressed to the user.
    pub fn get_swap_requests_for_user(&self, user_id: RecordId) -> ServiceResult<Vec<SwapRequest>> {
        let requests: Vec<SwapRequest> = self
            .store
            .read()
            .swap_requests()
            .values()?
            .into_iter()
            .filter(|request| request.owner_id == user_id)
            .collect();
        Self::non_empty(
            requests,
            &format!("user {user_id} has received no swap requests"),
        )
    }

    /// Returns the number of pending requests involving `user_id`.
    pub fn get_number_of_pending_swap_requests(&self, user_id: RecordId) -> ServiceResult<usize> {
        aggregate::count_swap_requests_with_status(
            &self.store.read(),
            user_id,
            SwapStatus::Pending,
        )
    }

    /// Returns the number of completed requests involving `user_id`.
    pub fn get_number_of_completed_swap_requests(&self, user_id: RecordId) -> ServiceResult<usize> {
        aggregate::count_swap_requests_with_status(
            &self.store.read(),
            user_id,
            SwapStatus::Completed,
        )
    }

    /// Returns the total number of completed requests.
    pub fn get_total_completed_swap_requests(&self) -> ServiceResult<usize> {
        aggregate::count_completed_swap_requests(&self.store.read())
    }

    /// Returns the number of completed swaps involving `user_id` as
    /// either party.
    pub fn get_swaps_by_user(&self, user_id: RecordId) -> ServiceResult<usize> {
        aggregate::count_swap_requests_with_status(
            &self.store.read(),
            user_id,
            SwapStatus::Completed,
        )
    }

    /// Deletes a swap request and returns the removed record.
    ///
    /// # Errors
    ///
    /// `NotFound` when `id` doesn't resolve.
    pub fn delete_swap_request(&self, id: RecordId) -> ServiceResult<SwapRequest> {
        let mut store = self.store.write();
        let existing = store
            .swap_requests()
            .get(id)?
            .ok_or_else(|| ServiceError::not_found(format!("swap request {id} does not exist")))?;
        store.swap_requests_mut().remove(id)?;
        info!("deleted swap request {id}");
        Ok(existing)
    }

    // === Feedback ===

    /// Records feedback on a swap request.
    ///
    /// # Errors
    ///
    /// `NotFound` when the user or request doesn't resolve;
    /// `InvalidPayload` when the rating is zero or the comment empty.
    pub fn create_feedback(&self, payload: FeedbackPayload) -> ServiceResult<Feedback> {
        validation::validate_rating(payload.rating)?;
        validation::require(&payload.comment, "comment")?;

        let mut store = self.store.write();
        Self::ensure_user_exists(&store, payload.user_id)?;
        if !store.swap_requests().contains(payload.swap_request_id)? {
            return Err(ServiceError::not_found(format!(
                "swap request {} does not exist",
                payload.swap_request_id
            )));
        }

        let feedback = Feedback {
            id: RecordId::new(),
            user_id: payload.user_id,
            swap_request_id: payload.swap_request_id,
            rating: payload.rating,
            comment: payload.comment,
            created_at: self.clock.now(),
        };
        store.feedback_mut().insert(&feedback)?;
        info!("created feedback {}", feedback.id);
        Ok(feedback)
    }

    /// Replaces the mutable fields of existing feedback.
    ///
    /// The update payload carries the target id.
    ///
    /// # Errors
    ///
    /// `NotFound` when the feedback or a referenced record doesn't
    /// resolve; `InvalidPayload` on a zero rating or empty comment.
    pub fn update_feedback(&self, update: FeedbackUpdate) -> ServiceResult<Feedback> {
        validation::validate_rating(update.rating)?;
        validation::require(&update.comment, "comment")?;

        let mut store = self.store.write();
        let existing = store.feedback().get(update.feedback_id)?.ok_or_else(|| {
            ServiceError::not_found(format!("feedback {} does not exist", update.feedback_id))
        })?;
        Self::ensure_user_exists(&store, update.user_id)?;
        if !store.swap_requests().contains(update.swap_request_id)? {
            return Err(ServiceError::not_found(format!(
                "swap request {} does not exist",
                update.swap_request_id
            )));
        }

        let feedback = Feedback {
            user_id: update.user_id,
            swap_request_id: update.swap_request_id,
            rating: update.rating,
            comment: update.comment,
            ..existing
        };
        store.feedback_mut().insert(&feedback)?;
        debug!("updated feedback {}", feedback.id);
        Ok(feedback)
    }

    /// Gets feedback by ID.
    ///
    /// # Errors
    ///
    /// `NotFound` when `id` doesn't resolve.
    pub fn get_feedback(&self, id: RecordId) -> ServiceResult<Feedback> {
        self.store
            .read()
            .feedback()
            .get(id)?
            .ok_or_else(|| ServiceError::not_found(format!("feedback {id} does not exist")))
    }

    /// Returns all feedback records.
    ///
    /// # Errors
    ///
    /// `NotFound` when none exist.
    pub fn get_all_feedbacks(&self) -> ServiceResult<Vec<Feedback>> {
        let feedback = self.store.read().feedback().values()?;
        Self::non_empty(feedback, "no feedback yet")
    }

    /// Returns the feedback authored by `user_id`.
    ///
    /// # Errors
    ///
    /// `NotFound` when the user authored none.
    pub fn get_feedbacks_by_user(&self, user_id: RecordId) -> ServiceResult<Vec<Feedback>> {
        let feedback: Vec<Feedback> = self
            .store
            .read()
            .feedback()
            .values()?
            .into_iter()
            .filter(|record| record.user_id == user_id)
            .collect();
        Self::non_empty(feedback, &format!("user {user_id} has left no feedback"))
    }

    /// Returns the feedback attached to a swap request.
    ///
    /// # Errors
    ///
    /// `NotFound` when the request has none.
    pub fn get_feedbacks_by_swap_request(
        &self,
        swap_request_id: RecordId,
    ) -> ServiceResult<Vec<Feedback>> {
        let feedback: Vec<Feedback> = self
            .store
            .read()
            .feedback()
            .values()?
            .into_iter()
            .filter(|record| record.swap_request_id == swap_request_id)
            .collect();
        Self::non_empty(
            feedback,
            &format!("swap request {swap_request_id} has no feedback"),
        )
    }

    /// Deletes feedback and returns the removed record.
    ///
    /// # Errors
    ///
    /// `NotFound` when `id` doesn't resolve.
    pub fn delete_feedback(&self, id: RecordId) -> ServiceResult<Feedback> {
        let mut store = self.store.write();
        let existing = store
            .feedback()
            .get(id)?
            .ok_or_else(|| ServiceError::not_found(format!("feedback {id} does not exist")))?;
        store.feedback_mut().remove(id)?;
        info!("deleted feedback {id}");
        Ok(existing)
    }

    // === Derived views ===

    /// Top swappers of the current calendar month.
    ///
    /// # Errors
    ///
    /// `NotFound` when no swaps completed this month.
    pub fn get_top_swappers(&self) -> ServiceResult<Vec<RankedSwapper>> {
        aggregate::monthly_rankings(&self.store.read(), self.clock.now())
    }

    /// Featured swappers of the current calendar month.
    ///
    /// Shares the ranking routine with [`Self::get_top_swappers`]; the
    /// two operations back different presentation surfaces.
    ///
    /// # Errors
    ///
    /// `NotFound` when no swaps completed this month.
    pub fn get_featured_swappers(&self) -> ServiceResult<Vec<RankedSwapper>> {
        aggregate::monthly_rankings(&self.store.read(), self.clock.now())
    }

    // === Shared checks ===

    fn ensure_user_exists(store: &RecordStore, user_id: RecordId) -> ServiceResult<()> {
        if !store.users().contains(user_id)? {
            return Err(ServiceError::not_found(format!(
                "user {user_id} does not exist"
            )));
        }
        Ok(())
    }

    fn ensure_email_free(
        store: &RecordStore,
        email: &str,
        exclude: Option<RecordId>,
    ) -> ServiceResult<()> {
        let taken = store
            .users()
            .values()?
            .iter()
            .any(|user| user.email == email && Some(user.id) != exclude);
        if taken {
            return Err(ServiceError::invalid_payload(format!(
                "email {email:?} is already registered"
            )));
        }
        Ok(())
    }

    fn ensure_triple_free(
        store: &RecordStore,
        triple: (RecordId, RecordId, RecordId),
        exclude: Option<RecordId>,
    ) -> ServiceResult<()> {
        let taken = store
            .swap_requests()
            .values()?
            .iter()
            .any(|request| request.triple() == triple && Some(request.id) != exclude);
        if taken {
            return Err(ServiceError::invalid_payload(
                "a swap request for this owner, requester, and book already exists",
            ));
        }
        Ok(())
    }

    fn non_empty<T>(records: Vec<T>, message: &str) -> ServiceResult<Vec<T>> {
        if records.is_empty() {
            return Err(ServiceError::not_found(message));
        }
        Ok(records)
    }
}

impl std::fmt::Debug for SwapRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwapRegistry").finish_non_exhaustive()
    }
}
