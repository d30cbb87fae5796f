//! Layout of a single message: wrapped lines, pages, and the active page.

use super::pagination::{paginate, Page};
use super::viewport::Viewport;
use super::wrap::{wrap, DisplayLine};
use crate::model::{MessageId, MessageRecord};
use crate::view::styles::BoardStyles;

/// Columns reserved around message text (one on the left, two on the right).
pub const MESSAGE_MARGIN: u16 = 3;

/// Rows of the parent panel a page leaves free for separators.
pub const SEPARATOR_ROWS: u16 = 2;

/// One message wrapped for a given panel size.
///
/// Lines are: the wrapped `From <author> on <date>` header, a blank line, the
/// wrapped body, and a trailing blank line. Pages are cut from that sequence.
#[derive(Debug, Clone)]
pub struct MessageView {
    message_id: MessageId,
    lines: Vec<DisplayLine>,
    pages: Vec<Page>,
    active_page: usize,
}

impl MessageView {
    /// Wrap `message` for a panel interior of `width` x `height` cells.
    pub fn new(message: &MessageRecord, width: u16, height: u16) -> Self {
        let columns = usize::from(width.saturating_sub(MESSAGE_MARGIN));
        let mut lines = wrap(&message.header(), columns);
        lines.extend(wrap("", columns));
        lines.extend(wrap(&message.text, columns));
        lines.extend(wrap("", columns));
        Self::from_display_lines(message.id, lines, height)
    }

    pub(crate) fn from_display_lines(
        message_id: MessageId,
        lines: Vec<DisplayLine>,
        height: u16,
    ) -> Self {
        let page_height = usize::from(height.saturating_sub(SEPARATOR_ROWS));
        let pages = paginate(&lines, page_height);
        Self {
            message_id,
            lines,
            pages,
            active_page: 0,
        }
    }

    pub fn message_id(&self) -> MessageId {
        self.message_id
    }

    pub fn lines(&self) -> &[DisplayLine] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn active_page(&self) -> usize {
        self.active_page
    }

    pub fn page_up(&mut self) {
        self.active_page = self.active_page.saturating_sub(1);
    }

    pub fn page_down(&mut self) {
        if self.active_page + 1 < self.pages.len() {
            self.active_page += 1;
        }
    }

    /// Back to the first page.
    pub fn rewind(&mut self) {
        self.active_page = 0;
    }

    /// Draw the lines of page `page_index` into rows `[start_row, end_row)`.
    ///
    /// Returns the row after the last line drawn.
    pub fn draw_paged(
        &self,
        vp: &mut Viewport<'_>,
        start_row: u16,
        end_row: u16,
        page_index: usize,
        selected: bool,
        styles: &BoardStyles,
    ) -> u16 {
        debug_assert!(
            page_index < self.pages.len(),
            "page {page_index} out of bounds for message with {} pages",
            self.pages.len()
        );
        let Some(page) = self.pages.get(page_index) else {
            return start_row;
        };
        self.draw_lines(vp, start_row, end_row, page.range(), selected, styles)
    }

    /// Draw every line regardless of pagination.
    pub fn draw_all(
        &self,
        vp: &mut Viewport<'_>,
        start_row: u16,
        end_row: u16,
        selected: bool,
        styles: &BoardStyles,
    ) -> u16 {
        self.draw_lines(vp, start_row, end_row, 0..self.lines.len(), selected, styles)
    }

    fn draw_lines(
        &self,
        vp: &mut Viewport<'_>,
        start_row: u16,
        end_row: u16,
        range: std::ops::Range<usize>,
        selected: bool,
        styles: &BoardStyles,
    ) -> u16 {
        let col = vp.area().left().saturating_add(1);
        let mut row = start_row;

        for index in range {
            if row >= end_row {
                break;
            }
            let style = if index != 0 {
                styles.base
            } else if selected {
                vp.style_row(row, styles.selected);
                styles.selected
            } else {
                styles.header
            };
            vp.draw_text(col, row, self.lines[index].as_str(), style);
            row += 1;
        }
        row
    }
}
