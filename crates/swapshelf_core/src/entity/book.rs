//! Book listing record.

use crate::collection::Record;
use crate::entity::RecordId;
use crate::types::Timestamp;
use serde::{Deserialize, Serialize};

/// A book listed for swapping.
///
/// `user_id` must reference an existing [`crate::entity::User`] at
/// creation time. Deleting the owning user later does not remove the
/// listing; read paths tolerate the dangling reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Stable record identifier.
    pub id: RecordId,
    /// Owning user.
    pub user_id: RecordId,
    /// Title.
    pub title: String,
    /// Author.
    pub author: String,
    /// Genre label; matched case-insensitively by genre queries.
    pub genre: String,
    /// Free-form description.
    pub description: String,
    /// Cover image location.
    pub image_url: String,
    /// Creation time assigned by the registry clock.
    pub created_at: Timestamp,
}

impl Record for Book {
    fn record_id(&self) -> RecordId {
        self.id
    }
}

/// Payload for listing or updating a book.
///
/// All fields are required; the registry rejects empty values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookPayload {
    /// Owning user.
    pub user_id: RecordId,
    /// Title.
    pub title: String,
    /// Author.
    pub author: String,
    /// Genre label.
    pub genre: String,
    /// Free-form description.
    pub description: String,
    /// Cover image location.
    pub image_url: String,
}

impl BookPayload {
    /// Creates a payload from its parts.
    pub fn new(
        user_id: RecordId,
        title: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
        description: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            title: title.into(),
            author: author.into(),
            genre: genre.into(),
            description: description.into(),
            image_url: image_url.into(),
        }
    }
}
