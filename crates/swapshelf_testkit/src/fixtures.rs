//! Test fixtures and registry helpers.
//!
//! Provides convenience functions for setting up test registries and
//! common populated scenarios.

use crate::clock::FixedClock;
use chrono::{TimeZone, Utc};
use std::sync::Arc;
use swapshelf_core::{
    BookPayload, RecordId, RecordStore, SwapRegistry, Timestamp, UserPayload,
};

/// A test registry with a pinned, settable clock.
pub struct TestRegistry {
    /// The registry instance.
    pub registry: SwapRegistry,
    /// Handle to the registry's clock.
    pub clock: Arc<FixedClock>,
}

impl TestRegistry {
    /// Creates an in-memory registry pinned to a fixed default instant.
    #[must_use]
    pub fn new() -> Self {
        Self::at(Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0).unwrap())
    }

    /// Creates an in-memory registry pinned to `now`.
    #[must_use]
    pub fn at(now: Timestamp) -> Self {
        let clock = Arc::new(FixedClock::at(now));
        Self {
            registry: SwapRegistry::new(RecordStore::in_memory(), clock.clone()),
            clock,
        }
    }
}

impl Default for TestRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for TestRegistry {
    type Target = SwapRegistry;

    fn deref(&self) -> &Self::Target {
        &self.registry
    }
}

/// Builds a valid user payload from a short tag.
///
/// The tag feeds the name and email, so distinct tags give distinct,
/// collision-free users.
#[must_use]
pub fn user_payload(tag: &str) -> UserPayload {
    UserPayload::new(
        format!("User {tag}"),
        format!("{tag}@example.com"),
        "0123456789",
    )
}

/// Builds a valid book payload owned by `user_id`.
#[must_use]
pub fn book_payload(user_id: RecordId, title: &str) -> BookPayload {
    BookPayload::new(
        user_id,
        title,
        "Some Author",
        "Fiction",
        "A fine book",
        "https://covers.example/book.png",
    )
}

/// Populated scenario helpers.
pub mod scenarios {
    use super::*;
    use swapshelf_core::{Book, SwapRequest, SwapRequestPayload, User};

    /// Creates a registry with `count` registered users.
    #[must_use]
    pub fn registry_with_users(count: usize) -> (TestRegistry, Vec<User>) {
        let test = TestRegistry::new();
        let users = (0..count)
            .map(|i| {
                test.registry
                    .create_user_profile(
                        &format!("caller-{i}").into(),
                        user_payload(&format!("user{i}")),
                    )
                    .expect("fixture user is valid")
            })
            .collect();
        (test, users)
    }

    /// Creates two users, a listed book, and a completed swap between
    /// them, returning every record involved.
    pub fn completed_swap(test: &TestRegistry) -> (User, User, Book, SwapRequest) {
        let owner = test
            .registry
            .create_user_profile(&"caller-owner".into(), user_payload("owner"))
            .expect("fixture owner is valid");
        let requester = test
            .registry
            .create_user_profile(&"caller-requester".into(), user_payload("requester"))
            .expect("fixture requester is valid");
        let book = test
            .registry
            .list_book(book_payload(owner.id, "Dune"))
            .expect("fixture book is valid");
        let request = test
            .registry
            .create_swap_request(SwapRequestPayload::new(owner.id, requester.id, book.id))
            .expect("fixture request is valid");
        let request = test
            .registry
            .accept_swap_request(request.id)
            .expect("fixture request accepts");
        (owner, requester, book, request)
    }
}
