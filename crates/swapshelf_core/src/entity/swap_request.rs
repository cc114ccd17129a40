//! Swap request record.

use crate::collection::Record;
use crate::entity::RecordId;
use crate::lifecycle::SwapStatus;
use crate::types::Timestamp;
use serde::{Deserialize, Serialize};

/// A request to swap a listed book.
///
/// `owner_id` is the user who listed the book, `requester_id` the user
/// asking for it. At most one request may ever exist for a given
/// `(owner_id, requester_id, book_id)` triple, regardless of status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapRequest {
    /// Stable record identifier.
    pub id: RecordId,
    /// User who owns the requested book.
    pub owner_id: RecordId,
    /// User requesting the swap.
    pub requester_id: RecordId,
    /// The requested book.
    pub book_id: RecordId,
    /// Lifecycle status; `Pending` at creation.
    pub status: SwapStatus,
    /// Creation time assigned by the registry clock.
    pub created_at: Timestamp,
}

impl SwapRequest {
    /// Returns the duplicate-detection triple for this request.
    #[must_use]
    pub fn triple(&self) -> (RecordId, RecordId, RecordId) {
        (self.owner_id, self.requester_id, self.book_id)
    }

    /// Returns `true` if `user_id` is a party to this request.
    #[must_use]
    pub fn involves(&self, user_id: RecordId) -> bool {
        self.owner_id == user_id || self.requester_id == user_id
    }
}

impl Record for SwapRequest {
    fn record_id(&self) -> RecordId {
        self.id
    }
}

/// Payload for creating or updating a swap request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapRequestPayload {
    /// User who owns the requested book.
    pub owner_id: RecordId,
    /// User requesting the swap.
    pub requester_id: RecordId,
    /// The requested book.
    pub book_id: RecordId,
}

impl SwapRequestPayload {
    /// Creates a payload from its parts.
    #[must_use]
    pub fn new(owner_id: RecordId, requester_id: RecordId, book_id: RecordId) -> Self {
        Self {
            owner_id,
            requester_id,
            book_id,
        }
    }

    /// Returns the duplicate-detection triple for this payload.
    #[must_use]
    pub fn triple(&self) -> (RecordId, RecordId, RecordId) {
        (self.owner_id, self.requester_id, self.book_id)
    }
}
