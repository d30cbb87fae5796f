//! The thread list panel.
//!
//! `BoardView` only knows board positions of visible threads. Hidden threads
//! take no row and cannot be selected; the navigator runs over the visible
//! subsequence. The view is rebuilt whenever the board or the panel size
//! changes.

use super::list_navigator::ListNavigator;
use super::viewport::Viewport;
use crate::model::{format_date, Board, ThreadSummary};
use crate::view::styles::BoardStyles;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders};

/// Width the author column is padded or truncated to.
pub const AUTHOR_COLUMN: usize = 10;

#[derive(Debug, Clone)]
pub struct BoardView {
    navigator: ListNavigator,
    positions: Vec<usize>,
    area: Rect,
}

impl BoardView {
    /// Build the view for `board` drawn in the panel at `area` (border included).
    pub fn new(board: &Board, area: Rect, page_jump: usize) -> Self {
        let inner = Block::default().borders(Borders::ALL).inner(area);
        let positions = board.visible_positions();
        let navigator = ListNavigator::new(positions.len(), inner.top(), inner.bottom(), page_jump);
        Self {
            navigator,
            positions,
            area,
        }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn navigator(&self) -> &ListNavigator {
        &self.navigator
    }

    pub fn visible_len(&self) -> usize {
        self.positions.len()
    }

    /// Board position of the thread under the cursor.
    pub fn selected(&self) -> Option<usize> {
        self.navigator.selected().map(|index| self.positions[index])
    }

    pub fn move_up(&mut self) {
        self.navigator.move_up();
    }

    pub fn move_down(&mut self) {
        self.navigator.move_down();
    }

    pub fn draw(&self, board: &Board, vp: &mut Viewport<'_>, styles: &BoardStyles) {
        vp.fill(styles.base);
        vp.draw_border(styles.border, Some(Line::from(" threads ")), None);

        let inner = vp.inner();
        let mut vp = vp.child(inner);
        let col = inner.left();
        let selected = self.navigator.selected();

        let window = self.positions.iter().enumerate().skip(self.navigator.window_start());
        for (index, &position) in window {
            let Some(row) = self.navigator.row_of(index) else {
                break;
            };
            let summary = &board.entries()[position].summary;
            let style = if Some(index) == selected {
                vp.style_row(row, styles.selected);
                styles.selected
            } else if summary.pinned {
                styles.pinned
            } else {
                styles.base
            };
            vp.draw_text(col, row, &format_row(summary), style);
        }

        if self.positions.is_empty() {
            let hint = if board.is_filtered() {
                "no threads match"
            } else {
                "no threads yet, press a to start one"
            };
            vp.draw_text(col, inner.top(), hint, styles.muted);
        }
    }
}

/// `<date>|<author> <replies> <title>` for one board row.
pub fn format_row(summary: &ThreadSummary) -> String {
    let author: String = summary.author.chars().take(AUTHOR_COLUMN).collect();
    let closed = if summary.closed { "[closed] " } else { "" };
    format!(
        "{}|{:<width$} {:>3} {}{}",
        format_date(summary.last_activity),
        author,
        summary.replies,
        closed,
        summary.title,
        width = AUTHOR_COLUMN
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoardRecord, ThreadId};
    use crate::test_harness::{buffer_rows, summary};
    use ratatui::buffer::Buffer;
    use ratatui::style::Modifier;

    fn board_of(count: usize) -> Board {
        let threads = (0..count)
            .map(|i| summary(&format!("t{i}"), &format!("thread {i}"), false, 100 - i as i64))
            .collect();
        Board::from_record(BoardRecord { threads })
    }

    // ===== Row format =====

    #[test]
    fn row_pads_author_and_right_aligns_replies() {
        let mut s = summary("t1", "Hello", false, 0);
        s.author = "al".into();
        s.replies = 7;
        insta::assert_snapshot!(format_row(&s), @"01 Jan-70|al           7 Hello");
    }

    #[test]
    fn row_truncates_long_author_and_marks_closed() {
        let mut s = summary("t1", "Old news", false, 0);
        s.author = "bartholomew-the-third".into();
        s.closed = true;
        insta::assert_snapshot!(format_row(&s), @"01 Jan-70|bartholome   0 [closed] Old news");
    }

    // ===== Navigation =====

    #[test]
    fn selection_maps_to_board_position() {
        let board = board_of(5);
        let mut view = BoardView::new(&board, Rect::new(0, 0, 40, 10), 10);
        view.move_down();
        view.move_down();
        assert_eq!(view.selected(), Some(2));
    }

    #[test]
    fn hidden_threads_are_skipped_by_cursor() {
        // GIVEN a filter that keeps threads 1 and 3
        let mut board = board_of(5);
        let keep = [ThreadId::new("t1").unwrap(), ThreadId::new("t3").unwrap()];
        board.apply_filter("x", &keep);

        // WHEN the cursor moves past the end
        let mut view = BoardView::new(&board, Rect::new(0, 0, 40, 10), 10);
        assert_eq!(view.selected(), Some(1));
        view.move_down();
        view.move_down();

        // THEN only visible threads were selectable
        assert_eq!(view.visible_len(), 2);
        assert_eq!(view.selected(), Some(3));
    }

    #[test]
    fn empty_board_has_no_selection() {
        let board = Board::from_record(BoardRecord::default());
        let mut view = BoardView::new(&board, Rect::new(0, 0, 40, 10), 10);
        view.move_down();
        assert_eq!(view.selected(), None);
    }

    #[test]
    fn navigator_rows_are_panel_interior() {
        let view = BoardView::new(&board_of(3), Rect::new(0, 2, 40, 10), 10);
        assert_eq!(view.navigator().min_line(), 3);
        assert_eq!(view.navigator().max_line(), 11);
    }

    // ===== Drawing =====

    #[test]
    fn hidden_threads_take_no_rows() {
        let mut board = board_of(4);
        board.apply_filter("x", &[ThreadId::new("t0").unwrap(), ThreadId::new("t2").unwrap()]);
        let view = BoardView::new(&board, Rect::new(0, 0, 50, 6), 10);
        let mut buf = Buffer::empty(Rect::new(0, 0, 50, 6));
        let mut vp = Viewport::new(&mut buf, Rect::new(0, 0, 50, 6));

        view.draw(&board, &mut vp, &BoardStyles::default());

        let rows = buffer_rows(&buf);
        assert!(rows[1].contains("thread 0"), "{:?}", rows[1]);
        assert!(rows[2].contains("thread 2"), "{:?}", rows[2]);
        assert!(!rows[3].contains("thread"), "{:?}", rows[3]);
    }

    #[test]
    fn window_scrolls_with_cursor() {
        // 4 interior rows, jump of 2
        let board = board_of(10);
        let mut view = BoardView::new(&board, Rect::new(0, 0, 50, 6), 2);
        for _ in 0..4 {
            view.move_down();
        }
        assert_eq!(view.navigator().window_start(), 2);

        let mut buf = Buffer::empty(Rect::new(0, 0, 50, 6));
        let mut vp = Viewport::new(&mut buf, Rect::new(0, 0, 50, 6));
        view.draw(&board, &mut vp, &BoardStyles::default());

        let rows = buffer_rows(&buf);
        assert!(rows[1].contains("thread 2"), "{:?}", rows[1]);
        assert!(buf[(1, 2)].modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn pinned_rows_are_bold() {
        let board = Board::from_record(BoardRecord {
            threads: vec![
                summary("p", "pinned one", true, 1),
                summary("u", "recent", false, 500),
            ],
        });
        let mut view = BoardView::new(&board, Rect::new(0, 0, 50, 6), 10);
        view.move_down();
        let mut buf = Buffer::empty(Rect::new(0, 0, 50, 6));
        let mut vp = Viewport::new(&mut buf, Rect::new(0, 0, 50, 6));

        view.draw(&board, &mut vp, &BoardStyles::default());

        assert!(buf[(1, 1)].modifier.contains(Modifier::BOLD));
        assert!(!buf[(1, 1)].modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn empty_board_shows_hint() {
        let board = Board::from_record(BoardRecord::default());
        let view = BoardView::new(&board, Rect::new(0, 0, 50, 6), 10);
        let mut buf = Buffer::empty(Rect::new(0, 0, 50, 6));
        let mut vp = Viewport::new(&mut buf, Rect::new(0, 0, 50, 6));

        view.draw(&board, &mut vp, &BoardStyles::default());

        assert!(buffer_rows(&buf)[1].contains("press a to start one"));
    }
}
