//! Swap request status lifecycle.

use crate::error::{ServiceError, ServiceResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a swap request.
///
/// Requests start `Pending`; accepting moves them to `Completed` and
/// rejecting to `Rejected`. Both are terminal: no transition leaves
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwapStatus {
    /// Awaiting a decision from the book owner.
    Pending,
    /// Accepted; the swap went through.
    Completed,
    /// Declined by the book owner.
    Rejected,
}

impl SwapStatus {
    /// Returns `true` for `Completed` and `Rejected`.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Rejected)
    }
}

impl fmt::Display for SwapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
        };
        write!(f, "{label}")
    }
}

/// Checks a transition from `current` to `target`.
///
/// Returns the target status when the transition is legal.
///
/// # Errors
///
/// Returns [`ServiceError::InvalidPayload`] when `current` is terminal -
/// a decided request cannot be decided again - or when `target` is
/// `Pending`, which is only ever assigned at creation.
pub fn transition(current: SwapStatus, target: SwapStatus) -> ServiceResult<SwapStatus> {
    if current.is_terminal() {
        return Err(ServiceError::invalid_payload(format!(
            "swap request is already {current}"
        )));
    }
    if target == SwapStatus::Pending {
        return Err(ServiceError::invalid_payload(
            "swap request cannot return to pending",
        ));
    }
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_can_complete_or_reject() {
        assert_eq!(
            transition(SwapStatus::Pending, SwapStatus::Completed).unwrap(),
            SwapStatus::Completed
        );
        assert_eq!(
            transition(SwapStatus::Pending, SwapStatus::Rejected).unwrap(),
            SwapStatus::Rejected
        );
    }

    #[test]
    fn terminal_states_admit_no_transition() {
        for current in [SwapStatus::Completed, SwapStatus::Rejected] {
            for target in [SwapStatus::Completed, SwapStatus::Rejected] {
                let err = transition(current, target).unwrap_err();
                assert!(err.is_invalid_payload());
            }
        }
    }

    #[test]
    fn terminal_error_names_current_status() {
        let err = transition(SwapStatus::Completed, SwapStatus::Rejected).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid payload: swap request is already completed"
        );
    }

    #[test]
    fn nothing_returns_to_pending() {
        let err = transition(SwapStatus::Pending, SwapStatus::Pending).unwrap_err();
        assert!(err.is_invalid_payload());
    }

    #[test]
    fn display_labels() {
        assert_eq!(SwapStatus::Pending.to_string(), "pending");
        assert_eq!(SwapStatus::Completed.to_string(), "completed");
        assert_eq!(SwapStatus::Rejected.to_string(), "rejected");
    }
}
