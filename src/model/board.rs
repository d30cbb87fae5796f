//! Client-side board: sorted thread summaries plus visibility state.

use super::identifiers::ThreadId;
use super::records::{BoardRecord, ThreadSummary};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Board ordering: pinned threads first, then most recent activity first.
///
/// Equal keys compare `Equal`, so a stable sort keeps insertion order for
/// ties. Combined with unique thread ids this makes the order total.
pub fn board_order(a: &ThreadSummary, b: &ThreadSummary) -> Ordering {
    b.pinned
        .cmp(&a.pinned)
        .then_with(|| b.last_activity.cmp(&a.last_activity))
}

/// One board row: the summary plus whether the search filter hides it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardEntry {
    pub summary: ThreadSummary,
    pub hidden: bool,
}

/// The thread list the board view navigates over.
///
/// Threads are kept in [`board_order`]. An id → position map lets messages
/// (which only carry a `thread_id`) find their thread without back-pointers.
#[derive(Debug, Clone, Default)]
pub struct Board {
    entries: Vec<BoardEntry>,
    positions: HashMap<ThreadId, usize>,
    filter: Option<String>,
}

impl Board {
    pub fn from_record(record: BoardRecord) -> Self {
        let entries = record
            .threads
            .into_iter()
            .map(|summary| BoardEntry {
                summary,
                hidden: false,
            })
            .collect();
        let mut board = Self {
            entries,
            positions: HashMap::new(),
            filter: None,
        };
        board.sort();
        board
    }

    /// Re-sort after a flag change. Stable: ties keep their current order.
    pub fn sort(&mut self) {
        self.entries.sort_by(|a, b| board_order(&a.summary, &b.summary));
        self.positions = self
            .entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| (entry.summary.id.clone(), idx))
            .collect();
    }

    pub fn entries(&self) -> &[BoardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn thread(&self, id: &ThreadId) -> Option<&ThreadSummary> {
        self.positions.get(id).map(|&idx| &self.entries[idx].summary)
    }

    /// Positions (into [`Board::entries`]) of the threads not hidden by the filter.
    pub fn visible_positions(&self) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| !entry.hidden)
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn visible_count(&self) -> usize {
        self.entries.iter().filter(|entry| !entry.hidden).count()
    }

    /// Hide every thread whose id is not in `matches`.
    pub fn apply_filter(&mut self, pattern: impl Into<String>, matches: &[ThreadId]) {
        for entry in &mut self.entries {
            entry.hidden = !matches.contains(&entry.summary.id);
        }
        self.filter = Some(pattern.into());
    }

    pub fn clear_filter(&mut self) {
        for entry in &mut self.entries {
            entry.hidden = false;
        }
        self.filter = None;
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    pub fn is_filtered(&self) -> bool {
        self.filter.is_some()
    }
}
