//! Identifier newtypes with smart constructors.
//!
//! Thread ids are opaque strings handed out by the store; message ids are
//! numeric. Both are validated at construction time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a thread on the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ThreadId(String);

impl ThreadId {
    /// Smart constructor: rejects empty or whitespace-only ids.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidThreadId> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(InvalidThreadId::Empty);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ThreadId {
    type Error = InvalidThreadId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ThreadId> for String {
    fn from(id: ThreadId) -> Self {
        id.0
    }
}

/// Identifier of a single message. Unique across the whole board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(u64);

impl MessageId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ===== Error Types =====

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidThreadId {
    #[error("Thread ID cannot be empty")]
    Empty,
}

// ===== Tests =====
