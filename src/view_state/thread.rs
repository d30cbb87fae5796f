//! Layout of an open thread.
//!
//! The selected message is the anchor: drawing starts with it at the top of
//! the panel, messages before it are never drawn, and messages after it are
//! drawn in full while they fit. The first one that does not fit is drawn
//! paged and ends the frame.

use super::message::MessageView;
use super::viewport::Viewport;
use crate::model::{MessageRecord, ThreadRecord};
use crate::view::styles::BoardStyles;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders};

/// How one message is drawn in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawStep {
    /// Every line, followed by a separator rule.
    All(usize),
    /// One page only; always the last step.
    Paged { message: usize, page: usize },
}

#[derive(Debug, Clone)]
pub struct ThreadView {
    thread: ThreadRecord,
    messages: Vec<MessageView>,
    selected: usize,
    area: Rect,
}

impl ThreadView {
    /// Lay out `thread` for the panel at `area` (border included).
    pub fn new(thread: ThreadRecord, area: Rect) -> Self {
        let inner = Block::default().borders(Borders::ALL).inner(area);
        let messages = thread
            .messages
            .iter()
            .map(|m| MessageView::new(m, inner.width, inner.height))
            .collect();
        Self {
            thread,
            messages,
            selected: 0,
            area,
        }
    }

    #[cfg(test)]
    pub(crate) fn from_message_views(
        thread: ThreadRecord,
        messages: Vec<MessageView>,
        area: Rect,
    ) -> Self {
        Self {
            thread,
            messages,
            selected: 0,
            area,
        }
    }

    pub fn thread(&self) -> &ThreadRecord {
        &self.thread
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn messages(&self) -> &[MessageView] {
        &self.messages
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_message(&self) -> Option<&MessageRecord> {
        self.thread.messages.get(self.selected)
    }

    /// Select message `index`, clamped to the last message.
    pub fn select(&mut self, index: usize) {
        self.selected = index.min(self.messages.len().saturating_sub(1));
        if let Some(view) = self.messages.get_mut(self.selected) {
            view.rewind();
        }
    }

    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.select(self.selected - 1);
        }
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.messages.len() {
            self.select(self.selected + 1);
        }
    }

    pub fn page_up(&mut self) {
        if let Some(view) = self.messages.get_mut(self.selected) {
            view.page_up();
        }
    }

    pub fn page_down(&mut self) {
        if let Some(view) = self.messages.get_mut(self.selected) {
            view.page_down();
        }
    }

    /// Decide what gets drawn in `rows` rows of panel interior.
    pub fn plan(&self, rows: u16) -> Vec<DrawStep> {
        let mut remaining = usize::from(rows);
        let mut steps = Vec::new();

        for (index, view) in self.messages.iter().enumerate().skip(self.selected) {
            if remaining == 0 {
                break;
            }
            if remaining > view.line_count() {
                steps.push(DrawStep::All(index));
                remaining -= view.line_count() + 1;
            } else {
                let page = if index == self.selected {
                    view.active_page()
                } else {
                    0
                };
                steps.push(DrawStep::Paged {
                    message: index,
                    page,
                });
                break;
            }
        }
        steps
    }

    pub fn draw(&self, vp: &mut Viewport<'_>, styles: &BoardStyles) {
        vp.fill(styles.base);
        vp.draw_border(styles.border, Some(self.title_line()), self.footer_line());

        let inner = vp.inner();
        let mut vp = vp.child(inner);
        let end = inner.bottom();
        let mut row = inner.top();

        for step in self.plan(inner.height) {
            match step {
                DrawStep::All(index) => {
                    let selected = index == self.selected;
                    row = self.messages[index].draw_all(&mut vp, row, end, selected, styles);
                    vp.draw_rule(row, 0, styles.border);
                    row = row.saturating_add(1);
                }
                DrawStep::Paged { message, page } => {
                    let selected = message == self.selected;
                    self.messages[message].draw_paged(&mut vp, row, end, page, selected, styles);
                }
            }
        }
    }

    fn title_line(&self) -> Line<'static> {
        let closed = if self.thread.closed { "[closed] " } else { "" };
        if self.selected == 0 {
            Line::from(format!(" {closed}{} ", self.thread.title))
        } else {
            Line::from(format!(
                " {closed}{} - reply {} of {} ",
                self.thread.title,
                self.selected,
                self.messages.len() - 1
            ))
        }
    }

    fn footer_line(&self) -> Option<Line<'static>> {
        let view = self.messages.get(self.selected)?;
        (view.page_count() > 1).then(|| {
            Line::from(format!(
                " page {}/{} ",
                view.active_page() + 1,
                view.page_count()
            ))
            .alignment(Alignment::Right)
        })
    }
}

#[cfg(test)]
#[path = "thread_tests.rs"]
mod tests;
