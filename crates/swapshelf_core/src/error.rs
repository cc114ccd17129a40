//! Error types for SwapShelf core.

use thiserror::Error;

/// Result type for registry operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors that can occur in SwapShelf registry operations.
///
/// All expected failures are returned as values; the registry never
/// raises control-flow panics for them. Adapters decide user-facing
/// messaging.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The payload is malformed, incomplete, or violates a uniqueness
    /// rule. Detected before any state mutation.
    #[error("invalid payload: {message}")]
    InvalidPayload {
        /// Description of the violated rule.
        message: String,
    },

    /// A referenced identifier does not resolve, or a query's result set
    /// is legitimately empty per the operation's contract.
    #[error("not found: {message}")]
    NotFound {
        /// Description of what was missing.
        message: String,
    },

    /// Map backend error.
    #[error("storage error: {0}")]
    Storage(#[from] swapshelf_storage::StorageError),

    /// A stored record could not be encoded or decoded.
    #[error("codec error: {message}")]
    Codec {
        /// Description of the codec failure.
        message: String,
    },
}

impl ServiceError {
    /// Creates an invalid payload error.
    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Self::InvalidPayload {
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Creates a codec error.
    pub fn codec(message: impl Into<String>) -> Self {
        Self::Codec {
            message: message.into(),
        }
    }

    /// Returns `true` for the invalid payload arm.
    #[must_use]
    pub fn is_invalid_payload(&self) -> bool {
        matches!(self, Self::InvalidPayload { .. })
    }

    /// Returns `true` for the not found arm.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
