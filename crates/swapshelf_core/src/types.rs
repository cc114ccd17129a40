//! Common types shared across the registry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Creation timestamp assigned by the registry clock.
pub type Timestamp = DateTime<Utc>;

/// Opaque caller identity attached to an invocation.
///
/// The registry never issues or verifies identities; it receives a
/// principal/subject string from the transport layer and uses it only to
/// stamp ownership on user creation and to look profiles up by owner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    /// Creates a principal from its string form.
    pub fn new(subject: impl Into<String>) -> Self {
        Self(subject.into())
    }

    /// Returns the principal's string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Principal {
    fn from(subject: &str) -> Self {
        Self::new(subject)
    }
}

impl From<String> for Principal {
    fn from(subject: String) -> Self {
        Self(subject)
    }
}
