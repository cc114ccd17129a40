//! User profile record.

use crate::collection::Record;
use crate::entity::RecordId;
use crate::types::{Principal, Timestamp};
use serde::{Deserialize, Serialize};

/// A registered swapper.
///
/// `owner` is the caller identity that created the profile; it is stamped
/// once at creation and never mutated. `email` is unique across all users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Stable record identifier.
    pub id: RecordId,
    /// Caller identity of the creator.
    pub owner: Principal,
    /// Display name.
    pub name: String,
    /// Contact email; unique across the registry.
    pub email: String,
    /// Contact phone number (10 decimal digits).
    pub phone_number: String,
    /// Creation time assigned by the registry clock.
    pub created_at: Timestamp,
}

impl Record for User {
    fn record_id(&self) -> RecordId {
        self.id
    }
}

/// Payload for creating or updating a user profile.
///
/// All fields are required; the registry rejects empty values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPayload {
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone_number: String,
}

impl UserPayload {
    /// Creates a payload from its parts.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone_number: phone_number.into(),
        }
    }
}
