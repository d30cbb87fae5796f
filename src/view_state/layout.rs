//! Screen split: header row, main panel, status row.

use crate::view::constants::{HEADER_HEIGHT, STATUS_BAR_HEIGHT};
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Areas of one frame.
///
/// Recomputed from the terminal size; a resize produces a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub panel: Rect,
    pub status: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(STATUS_BAR_HEIGHT),
            ])
            .split(area);
        Self {
            header: chunks[0],
            panel: chunks[1],
            status: chunks[2],
        }
    }
}
