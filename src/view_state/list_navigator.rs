//! Scroll and cursor state over a list longer than its window.
//!
//! The cursor lives in screen rows `[min_line, max_line)`; the window is the
//! slice of the list starting at `window_start`. The selected list index is
//! always `window_start + cursor_line - min_line`.
//!
//! Scrolling past the window edge does not move one row at a time: the window
//! jumps by `jump` items and the cursor row moves the opposite way, so the
//! selection itself is unchanged by the jump and the next step moves it.
//! The window only jumps while there is something past the edge to reveal.
//! A one-row window has no room for that, so it scrolls one item per step.

/// Jump size used when the cursor hits the window edge.
pub const DEFAULT_PAGE_JUMP: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListNavigator {
    window_start: usize,
    cursor_line: u16,
    min_line: u16,
    max_line: u16,
    len: usize,
    jump: usize,
}

impl ListNavigator {
    /// Navigator over `len` items drawn in rows `[min_line, max_line)`.
    ///
    /// Starts at the top of the list. `jump` is capped one short of the
    /// window height so a jump always leaves the cursor inside the window.
    pub fn new(len: usize, min_line: u16, max_line: u16, jump: usize) -> Self {
        let max_line = max_line.max(min_line);
        let rows = usize::from(max_line - min_line);
        Self {
            window_start: 0,
            cursor_line: min_line,
            min_line,
            max_line,
            len,
            jump: jump.min(rows.saturating_sub(1)).max(1),
        }
    }

    pub fn window_start(&self) -> usize {
        self.window_start
    }

    pub fn cursor_line(&self) -> u16 {
        self.cursor_line
    }

    pub fn min_line(&self) -> u16 {
        self.min_line
    }

    pub fn max_line(&self) -> u16 {
        self.max_line
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn cursor_offset(&self) -> usize {
        usize::from(self.cursor_line - self.min_line)
    }

    /// Index of the selected item.
    ///
    /// Calling this on an empty list is a programming error.
    pub fn selected_index(&self) -> usize {
        let index = self.window_start + self.cursor_offset();
        debug_assert!(
            index < self.len,
            "selected index {index} out of bounds for list of {}",
            self.len
        );
        index
    }

    /// Index of the selected item, or `None` when the list is empty.
    pub fn selected(&self) -> Option<usize> {
        (!self.is_empty()).then(|| self.selected_index())
    }

    pub fn move_up(&mut self) {
        if self.cursor_line > self.min_line {
            self.cursor_line -= 1;
        } else if self.rows() == 1 {
            self.window_start = self.window_start.saturating_sub(1);
        } else if self.window_start >= self.jump && self.can_shift_cursor_down() {
            self.window_start -= self.jump;
            self.cursor_line += self.jump_rows();
        }
    }

    pub fn move_down(&mut self) {
        if self.is_empty() || self.selected_index() + 1 >= self.len {
            return;
        }
        if self.cursor_line + 1 < self.max_line {
            self.cursor_line += 1;
        } else if self.rows() == 1 {
            self.window_start += 1;
        } else if self.cursor_offset() >= self.jump {
            self.window_start += self.jump;
            self.cursor_line -= self.jump_rows();
        }
    }

    /// Row of the item at `index`, if it falls inside the visible window.
    pub fn row_of(&self, index: usize) -> Option<u16> {
        let offset = index.checked_sub(self.window_start)?;
        let row = usize::from(self.min_line) + offset;
        (row < usize::from(self.max_line)).then_some(row as u16)
    }

    fn rows(&self) -> u16 {
        self.max_line - self.min_line
    }

    fn jump_rows(&self) -> u16 {
        self.jump as u16
    }

    fn can_shift_cursor_down(&self) -> bool {
        usize::from(self.cursor_line) + self.jump < usize::from(self.max_line)
    }
}
