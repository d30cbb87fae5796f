//! Collaborators the client talks to.
//!
//! This module provides the seams between the layout engine and the outside
//! world:
//! - [`BoardService`]: fetch and mutate board data
//! - [`Editor`]: blocking "edit this text" session
//! - [`LocalStore`]: JSON-file backed `BoardService`
//! - [`ExternalEditor`]: `$VISUAL`/`$EDITOR` process backed `Editor`
//! - [`demo`]: generated boards for trying the client without data

pub mod demo;
pub mod editor;
pub mod local_store;

pub use editor::{Editor, EditorError, ExternalEditor};
pub use local_store::LocalStore;

use crate::model::{
    BoardError, BoardRecord, MessageId, MessageRecord, ThreadId, ThreadRecord, ThreadSummary,
};

/// Flag changes for [`BoardService::set_thread_flags`]. `None` leaves a flag as is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThreadFlags {
    /// New pinned state.
    pub pinned: Option<bool>,
    /// New closed state.
    pub closed: Option<bool>,
}

/// Board data operations.
///
/// Every call may fail. Implementations must leave their data unchanged when
/// they return an error, so callers can keep showing what they had.
pub trait BoardService {
    /// Summaries of every thread.
    fn fetch_board(&self) -> Result<BoardRecord, BoardError>;

    /// One thread with its ordered messages.
    fn fetch_thread(&self, id: &ThreadId) -> Result<ThreadRecord, BoardError>;

    /// Start a thread whose opening message is `text`.
    fn submit_new_thread(&mut self, title: &str, text: &str) -> Result<ThreadRecord, BoardError>;

    /// Append a reply to an open thread.
    fn submit_reply(&mut self, thread: &ThreadId, text: &str) -> Result<MessageRecord, BoardError>;

    /// Replace the text of an existing message.
    fn submit_edit(&mut self, message: MessageId, text: &str) -> Result<MessageRecord, BoardError>;

    /// Remove a thread and all its messages.
    fn delete_thread(&mut self, id: &ThreadId) -> Result<(), BoardError>;

    /// Remove a single reply.
    fn delete_message(&mut self, id: MessageId) -> Result<(), BoardError>;

    /// Change pinned and/or closed state; returns the updated summary.
    fn set_thread_flags(
        &mut self,
        id: &ThreadId,
        flags: ThreadFlags,
    ) -> Result<ThreadSummary, BoardError>;

    /// Threads whose title or any message contains `pattern`.
    fn search(&self, pattern: &str) -> Result<Vec<ThreadRecord>, BoardError>;
}
