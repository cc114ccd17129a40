//! # SwapShelf Storage
//!
//! Ordered map backend trait and implementations for SwapShelf.
//!
//! This crate provides the lowest-level storage abstraction for the
//! registry. Backends are **opaque ordered maps** keyed by identifier
//! strings - they do not interpret the values they store.
//!
//! ## Design Principles
//!
//! - Backends are simple byte maps (get, insert, remove, iterate)
//! - No knowledge of record types or encodings
//! - Must be `Send + Sync` so the registry can be shared across threads
//! - SwapShelf core owns all value interpretation
//!
//! ## Available Backends
//!
//! - [`MemoryBackend`] - For testing and ephemeral registries
//!
//! Durable backends (e.g. a stable B-tree map) are supplied by the
//! embedding host and are outside the scope of this crate.
//!
//! ## Example
//!
//! ```rust
//! use swapshelf_storage::{MapBackend, MemoryBackend};
//!
//! let mut backend = MemoryBackend::new();
//! backend.insert("user-1", vec![1, 2, 3]).unwrap();
//! let value = backend.get("user-1").unwrap();
//! assert_eq!(value, Some(vec![1, 2, 3]));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod memory;

pub use backend::MapBackend;
pub use error::{StorageError, StorageResult};
pub use memory::MemoryBackend;
