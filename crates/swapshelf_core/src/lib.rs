//! # SwapShelf Core
//!
//! Domain record service for the SwapShelf book-swapping registry.
//!
//! This crate provides:
//! - The four canonical record types (users, books, swap requests,
//!   feedback) and their payload validation
//! - Typed collections over opaque ordered map backends
//! - The swap-request status lifecycle
//! - Derived read views: search, counters, recent listings, and the
//!   monthly swapper rankings
//! - [`SwapRegistry`], the facade exposing every callable operation
//!
//! ## Example
//!
//! ```rust
//! use swapshelf_core::{BookPayload, SwapRegistry, UserPayload};
//!
//! let registry = SwapRegistry::in_memory();
//!
//! let ada = registry
//!     .create_user_profile(
//!         &"caller-ada".into(),
//!         UserPayload::new("Ada", "ada@example.com", "0123456789"),
//!     )
//!     .unwrap();
//!
//! let book = registry
//!     .list_book(BookPayload::new(
//!         ada.id,
//!         "The Hobbit",
//!         "J. R. R. Tolkien",
//!         "Fantasy",
//!         "There and back again",
//!         "https://covers.example/hobbit.png",
//!     ))
//!     .unwrap();
//!
//! assert_eq!(registry.search_books("fantasy").unwrap(), vec![book]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod aggregate;
mod clock;
mod collection;
mod entity;
mod error;
pub mod lifecycle;
mod service;
mod store;
mod types;
pub mod validation;

pub use aggregate::{RankedSwapper, RANKING_LIMIT, RECENT_BOOKS_LIMIT};
pub use clock::{Clock, SystemClock};
pub use collection::{Collection, Record};
pub use entity::{
    Book, BookPayload, Feedback, FeedbackPayload, FeedbackUpdate, RecordId, SwapRequest,
    SwapRequestPayload, User, UserPayload,
};
pub use error::{ServiceError, ServiceResult};
pub use lifecycle::SwapStatus;
pub use service::SwapRegistry;
pub use store::RecordStore;
pub use types::{Principal, Timestamp};
