//! JSON-file backed board store.
//!
//! The whole board lives in memory and is written back after every mutation
//! (temp file + rename). Mutations run against a copy of the document that
//! only replaces the live one once it has been saved, so a failed call leaves
//! the store exactly as it was.

use super::{BoardService, ThreadFlags};
use crate::model::{
    BoardError, BoardRecord, Identity, MessageId, MessageRecord, ThreadId, ThreadRecord,
    ThreadSummary,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// On-disk document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct BoardDocument {
    next_thread: u64,
    next_message: u64,
    threads: Vec<ThreadRecord>,
}

impl BoardDocument {
    fn from_threads(threads: Vec<ThreadRecord>) -> Self {
        let next_message = threads
            .iter()
            .flat_map(|t| &t.messages)
            .map(|m| m.id.get() + 1)
            .max()
            .unwrap_or(1);
        Self {
            next_thread: threads.len() as u64 + 1,
            next_message,
            threads,
        }
    }

    fn thread_index(&self, id: &ThreadId) -> Result<usize, BoardError> {
        self.threads
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| BoardError::not_found(format!("thread {id}")))
    }

    /// `(thread index, message index)` of message `id`.
    fn locate(&self, id: MessageId) -> Result<(usize, usize), BoardError> {
        self.threads
            .iter()
            .enumerate()
            .find_map(|(t, thread)| {
                thread
                    .messages
                    .iter()
                    .position(|m| m.id == id)
                    .map(|m| (t, m))
            })
            .ok_or_else(|| BoardError::not_found(format!("message {id}")))
    }

    fn allocate_thread_id(&mut self) -> Result<ThreadId, BoardError> {
        loop {
            let id = ThreadId::new(format!("t{}", self.next_thread))?;
            self.next_thread += 1;
            if self.thread_index(&id).is_err() {
                return Ok(id);
            }
        }
    }

    fn allocate_message_id(&mut self) -> MessageId {
        let id = MessageId::new(self.next_message);
        self.next_message += 1;
        id
    }
}

/// [`BoardService`] over a local JSON file.
///
/// Built with [`LocalStore::in_memory`] the store never touches the disk.
#[derive(Debug)]
pub struct LocalStore {
    path: Option<PathBuf>,
    identity: Identity,
    doc: BoardDocument,
}

impl LocalStore {
    /// Open the store at `path`. A missing file is an empty board.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::Transient` if the file exists but cannot be read
    /// or parsed.
    pub fn open(path: impl Into<PathBuf>, identity: Identity) -> Result<Self, BoardError> {
        let path = path.into();
        let doc = if path.exists() {
            let data = fs::read_to_string(&path)?;
            let doc: BoardDocument = serde_json::from_str(&data)?;
            info!(path = %path.display(), threads = doc.threads.len(), "Loaded board");
            doc
        } else {
            debug!(path = %path.display(), "No board file yet, starting empty");
            BoardDocument::default()
        };
        Ok(Self {
            path: Some(path),
            identity,
            doc: BoardDocument {
                next_thread: doc.next_thread.max(1),
                next_message: doc.next_message.max(1),
                ..doc
            },
        })
    }

    /// Store that keeps `threads` in memory only.
    pub fn in_memory(identity: Identity, threads: Vec<ThreadRecord>) -> Self {
        Self {
            path: None,
            identity,
            doc: BoardDocument::from_threads(threads),
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Apply `change` to a copy of the document, persist it, then adopt it.
    fn commit<T>(
        &mut self,
        change: impl FnOnce(&mut BoardDocument, &Identity) -> Result<T, BoardError>,
    ) -> Result<T, BoardError> {
        let mut doc = self.doc.clone();
        let value = change(&mut doc, &self.identity)?;
        if let Some(path) = &self.path {
            save(path, &doc)?;
        }
        self.doc = doc;
        Ok(value)
    }
}

fn save(path: &Path, doc: &BoardDocument) -> Result<(), BoardError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(doc)?;
    let temp_file = path.with_extension("json.tmp");
    fs::write(&temp_file, json)?;
    fs::rename(&temp_file, path)?;
    debug!(path = %path.display(), threads = doc.threads.len(), "Saved board");
    Ok(())
}

fn non_empty<'a>(value: &'a str, field: &str) -> Result<&'a str, BoardError> {
    if value.trim().is_empty() {
        Err(BoardError::InputInvalid(format!("{field} is empty")))
    } else {
        Ok(value)
    }
}

fn require_open(thread: &ThreadRecord) -> Result<(), BoardError> {
    if thread.closed {
        Err(BoardError::InputInvalid("thread is closed".into()))
    } else {
        Ok(())
    }
}

fn require_modify(identity: &Identity, author: &str, action: &str) -> Result<(), BoardError> {
    if identity.can_modify(author) {
        Ok(())
    } else {
        Err(BoardError::Unauthorized(format!(
            "only {author} or an admin can {action}"
        )))
    }
}

impl BoardService for LocalStore {
    fn fetch_board(&self) -> Result<BoardRecord, BoardError> {
        Ok(BoardRecord {
            threads: self.doc.threads.iter().map(ThreadRecord::summary).collect(),
        })
    }

    fn fetch_thread(&self, id: &ThreadId) -> Result<ThreadRecord, BoardError> {
        let index = self.doc.thread_index(id)?;
        Ok(self.doc.threads[index].clone())
    }

    fn submit_new_thread(&mut self, title: &str, text: &str) -> Result<ThreadRecord, BoardError> {
        let title = non_empty(title, "title")?.trim().to_string();
        let text = non_empty(text, "message")?.to_string();
        self.commit(|doc, identity| {
            let id = doc.allocate_thread_id()?;
            let first = MessageRecord {
                id: doc.allocate_message_id(),
                thread_id: id.clone(),
                author: identity.user.clone(),
                stamp: Utc::now(),
                text,
            };
            let thread = ThreadRecord {
                id,
                title,
                pinned: false,
                closed: false,
                messages: vec![first],
            };
            info!(thread = %thread.id, "New thread");
            doc.threads.push(thread.clone());
            Ok(thread)
        })
    }

    fn submit_reply(&mut self, thread: &ThreadId, text: &str) -> Result<MessageRecord, BoardError> {
        let text = non_empty(text, "message")?.to_string();
        self.commit(|doc, identity| {
            let index = doc.thread_index(thread)?;
            require_open(&doc.threads[index])?;
            let message = MessageRecord {
                id: doc.allocate_message_id(),
                thread_id: thread.clone(),
                author: identity.user.clone(),
                stamp: Utc::now(),
                text,
            };
            doc.threads[index].messages.push(message.clone());
            Ok(message)
        })
    }

    fn submit_edit(&mut self, message: MessageId, text: &str) -> Result<MessageRecord, BoardError> {
        let text = non_empty(text, "message")?.to_string();
        self.commit(|doc, identity| {
            let (t, m) = doc.locate(message)?;
            require_open(&doc.threads[t])?;
            let record = &mut doc.threads[t].messages[m];
            require_modify(identity, &record.author, "edit this message")?;
            record.text = text;
            Ok(record.clone())
        })
    }

    fn delete_thread(&mut self, id: &ThreadId) -> Result<(), BoardError> {
        self.commit(|doc, identity| {
            let index = doc.thread_index(id)?;
            require_modify(identity, doc.threads[index].author(), "delete this thread")?;
            doc.threads.remove(index);
            info!(thread = %id, "Deleted thread");
            Ok(())
        })
    }

    fn delete_message(&mut self, id: MessageId) -> Result<(), BoardError> {
        self.commit(|doc, identity| {
            let (t, m) = doc.locate(id)?;
            if m == 0 {
                return Err(BoardError::InputInvalid(
                    "the opening message goes with its thread".into(),
                ));
            }
            require_modify(identity, &doc.threads[t].messages[m].author, "delete this message")?;
            doc.threads[t].messages.remove(m);
            Ok(())
        })
    }

    fn set_thread_flags(
        &mut self,
        id: &ThreadId,
        flags: ThreadFlags,
    ) -> Result<ThreadSummary, BoardError> {
        self.commit(|doc, identity| {
            if !identity.can_moderate() {
                return Err(BoardError::Unauthorized(
                    "only admins can pin or close threads".into(),
                ));
            }
            let index = doc.thread_index(id)?;
            let thread = &mut doc.threads[index];
            if let Some(pinned) = flags.pinned {
                thread.pinned = pinned;
            }
            if let Some(closed) = flags.closed {
                thread.closed = closed;
            }
            Ok(thread.summary())
        })
    }

    fn search(&self, pattern: &str) -> Result<Vec<ThreadRecord>, BoardError> {
        let needle = non_empty(pattern, "search pattern")?.to_lowercase();
        Ok(self
            .doc
            .threads
            .iter()
            .filter(|t| {
                t.title.to_lowercase().contains(&needle)
                    || t.messages.iter().any(|m| m.text.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
#[path = "local_store_tests.rs"]
mod tests;
