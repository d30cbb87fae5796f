//! Data records exchanged with the board backend.
//!
//! These are plain serializable values. Messages refer to their thread by id
//! (`thread_id`) rather than holding a reference to it.

use super::identifiers::{MessageId, ThreadId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Date format used in thread rows and message headers (e.g. `05 Mar-24`).
pub const DATE_FORMAT: &str = "%d %b-%y";

/// Format a timestamp for display.
pub fn format_date(stamp: DateTime<Utc>) -> String {
    stamp.format(DATE_FORMAT).to_string()
}

/// A single message of a thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub id: MessageId,
    pub thread_id: ThreadId,
    pub author: String,
    pub stamp: DateTime<Utc>,
    pub text: String,
}

impl MessageRecord {
    /// Header line shown above the message body.
    pub fn header(&self) -> String {
        format!("From {} on {}", self.author, format_date(self.stamp))
    }
}

/// Board-level view of a thread: everything needed to draw one board row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadSummary {
    pub id: ThreadId,
    pub title: String,
    pub author: String,
    pub created: DateTime<Utc>,
    /// Stamp of the latest reply, or `created` if there are none.
    pub last_activity: DateTime<Utc>,
    pub replies: usize,
    pub pinned: bool,
    pub closed: bool,
}

/// A full thread with its ordered messages.
///
/// `messages[0]` is the opening message; everything after it is a reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadRecord {
    pub id: ThreadId,
    pub title: String,
    pub pinned: bool,
    pub closed: bool,
    pub messages: Vec<MessageRecord>,
}

impl ThreadRecord {
    /// Author of the opening message.
    pub fn author(&self) -> &str {
        self.messages.first().map_or("", |m| m.author.as_str())
    }

    /// Creation stamp (the opening message), or the epoch for an empty thread.
    pub fn created(&self) -> DateTime<Utc> {
        self.messages
            .first()
            .map_or(DateTime::<Utc>::UNIX_EPOCH, |m| m.stamp)
    }

    /// Stamp of the latest message, falling back to the creation stamp.
    pub fn last_activity(&self) -> DateTime<Utc> {
        self.messages
            .last()
            .map_or_else(|| self.created(), |m| m.stamp)
    }

    pub fn summary(&self) -> ThreadSummary {
        ThreadSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            author: self.author().to_string(),
            created: self.created(),
            last_activity: self.last_activity(),
            replies: self.messages.len().saturating_sub(1),
            pinned: self.pinned,
            closed: self.closed,
        }
    }

    pub fn message(&self, id: MessageId) -> Option<&MessageRecord> {
        self.messages.iter().find(|m| m.id == id)
    }
}

/// The whole board as returned by `fetch_board`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardRecord {
    pub threads: Vec<ThreadSummary>,
}
