//! Swap feedback record.

use crate::collection::Record;
use crate::entity::RecordId;
use crate::types::Timestamp;
use serde::{Deserialize, Serialize};

/// Feedback left by a user on a completed (or any) swap request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    /// Stable record identifier.
    pub id: RecordId,
    /// Authoring user.
    pub user_id: RecordId,
    /// The swap request the feedback concerns.
    pub swap_request_id: RecordId,
    /// Positive rating; zero is rejected as absent.
    pub rating: u32,
    /// Free-form comment.
    pub comment: String,
    /// Creation time assigned by the registry clock.
    pub created_at: Timestamp,
}

impl Record for Feedback {
    fn record_id(&self) -> RecordId {
        self.id
    }
}

/// Payload for creating feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackPayload {
    /// Authoring user.
    pub user_id: RecordId,
    /// The swap request the feedback concerns.
    pub swap_request_id: RecordId,
    /// Positive rating.
    pub rating: u32,
    /// Free-form comment.
    pub comment: String,
}

impl FeedbackPayload {
    /// Creates a payload from its parts.
    pub fn new(
        user_id: RecordId,
        swap_request_id: RecordId,
        rating: u32,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            swap_request_id,
            rating,
            comment: comment.into(),
        }
    }
}

/// Payload for updating feedback; carries the target id alongside the
/// replacement fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackUpdate {
    /// The feedback record to update.
    pub feedback_id: RecordId,
    /// Authoring user.
    pub user_id: RecordId,
    /// The swap request the feedback concerns.
    pub swap_request_id: RecordId,
    /// Positive rating.
    pub rating: u32,
    /// Free-form comment.
    pub comment: String,
}
