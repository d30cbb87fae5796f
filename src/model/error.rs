//! Error taxonomy for collaborator calls.
//!
//! Every operation against the board backend can fail. The event loop never
//! propagates these upwards: it renders them as a one-line status message and
//! leaves the current view untouched.
//!
//! # Error Kinds
//!
//! - [`BoardError::NotFound`] - stale id, usually after a concurrent deletion
//! - [`BoardError::Unauthorized`] - author-only or admin-only action refused
//! - [`BoardError::Transient`] - the backend call failed or timed out
//! - [`BoardError::InputInvalid`] - malformed or empty required field

use super::identifiers::InvalidThreadId;
use thiserror::Error;

/// Failure of a board collaborator call.
///
/// The `Display` output is what ends up in the status line, so each message
/// is kept to a single short line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// The referenced thread or message no longer exists.
    #[error("{what} not found")]
    NotFound {
        /// Human-readable description of the missing item (e.g. "thread t-3").
        what: String,
    },

    /// The current user is not allowed to perform the action.
    #[error("not allowed: {0}")]
    Unauthorized(String),

    /// The backend could not complete the call.
    ///
    /// Retrying the same action later may succeed.
    #[error("backend error: {0}")]
    Transient(String),

    /// A required field was empty or malformed.
    #[error("invalid input: {0}")]
    InputInvalid(String),
}

impl BoardError {
    /// Shorthand for [`BoardError::NotFound`].
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }
}

impl From<std::io::Error> for BoardError {
    fn from(err: std::io::Error) -> Self {
        Self::Transient(err.to_string())
    }
}

impl From<serde_json::Error> for BoardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Transient(format!("corrupt board data: {err}"))
    }
}

impl From<InvalidThreadId> for BoardError {
    fn from(err: InvalidThreadId) -> Self {
        Self::InputInvalid(err.to_string())
    }
}
