//! The record store: one collection per entity type.

use crate::collection::Collection;
use crate::entity::{Book, Feedback, SwapRequest, User};
use swapshelf_storage::{MapBackend, MemoryBackend};

/// Owns the four entity collections.
///
/// The store is the only component that touches persistent state. The
/// four maps are independent: there are no foreign-key cascades between
/// them, so deleting a record in one map never mutates another.
///
/// A store is constructed from injected backends (or in-memory for
/// tests) and handed to the registry facade; nothing reads it through
/// ambient global state, so isolated instances can coexist.
#[derive(Debug)]
pub struct RecordStore {
    users: Collection<User>,
    books: Collection<Book>,
    swap_requests: Collection<SwapRequest>,
    feedback: Collection<Feedback>,
}

impl RecordStore {
    /// Creates a store over the four provided backends.
    pub fn with_backends(
        users: Box<dyn MapBackend>,
        books: Box<dyn MapBackend>,
        swap_requests: Box<dyn MapBackend>,
        feedback: Box<dyn MapBackend>,
    ) -> Self {
        Self {
            users: Collection::new("users", users),
            books: Collection::new("books", books),
            swap_requests: Collection::new("swap_requests", swap_requests),
            feedback: Collection::new("feedback", feedback),
        }
    }

    /// Creates a store backed entirely by in-memory maps.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::with_backends(
            Box::new(MemoryBackend::new()),
            Box::new(MemoryBackend::new()),
            Box::new(MemoryBackend::new()),
            Box::new(MemoryBackend::new()),
        )
    }

    /// The user collection.
    #[must_use]
    pub fn users(&self) -> &Collection<User> {
        &self.users
    }

    /// Mutable access to the user collection.
    pub fn users_mut(&mut self) -> &mut Collection<User> {
        &mut self.users
    }

    /// The book collection.
    #[must_use]
    pub fn books(&self) -> &Collection<Book> {
        &self.books
    }

    /// Mutable access to the book collection.
    pub fn books_mut(&mut self) -> &mut Collection<Book> {
        &mut self.books
    }

    /// The swap request collection.
    #[must_use]
    pub fn swap_requests(&self) -> &Collection<SwapRequest> {
        &self.swap_requests
    }

    /// Mutable access to the swap request collection.
    pub fn swap_requests_mut(&mut self) -> &mut Collection<SwapRequest> {
        &mut self.swap_requests
    }

    /// The feedback collection.
    #[must_use]
    pub fn feedback(&self) -> &Collection<Feedback> {
        &self.feedback
    }

    /// Mutable access to the feedback collection.
    pub fn feedback_mut(&mut self) -> &mut Collection<Feedback> {
        &mut self.feedback
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{RecordId, User, UserPayload};
    use crate::types::Principal;
    use chrono::Utc;

    fn user(payload: &UserPayload) -> User {
        User {
            id: RecordId::new(),
            owner: Principal::new("test-owner"),
            name: payload.name.clone(),
            email: payload.email.clone(),
            phone_number: payload.phone_number.clone(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn collections_are_independent() {
        let mut store = RecordStore::in_memory();
        let rec = user(&UserPayload::new("Ada", "ada@example.com", "0123456789"));
        store.users_mut().insert(&rec).unwrap();

        assert_eq!(store.users().len().unwrap(), 1);
        assert!(store.books().is_empty().unwrap());
        assert!(store.swap_requests().is_empty().unwrap());
        assert!(store.feedback().is_empty().unwrap());
    }

    #[test]
    fn isolated_instances() {
        let mut first = RecordStore::in_memory();
        let second = RecordStore::in_memory();

        let rec = user(&UserPayload::new("Ada", "ada@example.com", "0123456789"));
        first.users_mut().insert(&rec).unwrap();

        assert_eq!(first.users().len().unwrap(), 1);
        assert!(second.users().is_empty().unwrap());
    }
}
