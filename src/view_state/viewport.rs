//! Rectangular drawing region over a ratatui buffer.
//!
//! A `Viewport` owns no content. It is rebuilt from the current terminal area
//! every frame, so a resize simply produces a viewport with new bounds.
//! Rows and columns passed to the drawing primitives are absolute buffer
//! coordinates; anything falling outside the region is clipped.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols::line;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Widget};

use super::wrap::char_width;

pub struct Viewport<'a> {
    buf: &'a mut Buffer,
    area: Rect,
}

impl<'a> Viewport<'a> {
    /// Viewport over `area`, clamped to the buffer's own bounds.
    pub fn new(buf: &'a mut Buffer, area: Rect) -> Self {
        let area = area.intersection(buf.area);
        Self { buf, area }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// Area left inside a one-cell border.
    pub fn inner(&self) -> Rect {
        Block::default().borders(Borders::ALL).inner(self.area)
    }

    /// Sub-viewport over `area` (clipped to this one).
    pub fn child(&mut self, area: Rect) -> Viewport<'_> {
        let area = area.intersection(self.area);
        Viewport {
            buf: &mut *self.buf,
            area,
        }
    }

    /// Blank every cell and apply `style`.
    pub fn fill(&mut self, style: Style) {
        for y in self.area.top()..self.area.bottom() {
            for x in self.area.left()..self.area.right() {
                self.buf[(x, y)].reset();
            }
        }
        self.buf.set_style(self.area, style);
    }

    /// Draw a single-line border with optional top and bottom titles.
    pub fn draw_border(&mut self, style: Style, title: Option<Line<'_>>, footer: Option<Line<'_>>) {
        let mut block = Block::default().borders(Borders::ALL).border_style(style);
        if let Some(title) = title {
            block = block.title_top(title);
        }
        if let Some(footer) = footer {
            block = block.title_bottom(footer);
        }
        block.render(self.area, self.buf);
    }

    /// Horizontal rule across the interior of `row`, inset by `inset` columns.
    pub fn draw_rule(&mut self, row: u16, inset: u16, style: Style) {
        if !self.contains_row(row) {
            return;
        }
        let start = self.area.left().saturating_add(inset);
        let end = self.area.right().saturating_sub(inset);
        for x in start..end {
            self.buf[(x, row)]
                .set_symbol(line::HORIZONTAL)
                .set_style(style);
        }
    }

    /// Write `text` on `row` starting at column `col`, clipped at the right edge.
    ///
    /// Tabs advance to the next multiple of [`TAB_SPACES`] from `col`. Returns the
    /// column after the last cell written.
    ///
    /// [`TAB_SPACES`]: super::wrap::TAB_SPACES
    pub fn draw_text(&mut self, col: u16, row: u16, text: &str, style: Style) -> u16 {
        if !self.contains_row(row) {
            return col;
        }
        let right = self.area.right();
        let mut x = col.max(self.area.left());

        for ch in text.chars() {
            if x >= right {
                break;
            }
            let width = char_width(ch, usize::from(x - col)) as u16;
            if ch == '\t' {
                let end = x.saturating_add(width).min(right);
                for pad in x..end {
                    self.buf[(pad, row)].set_char(' ').set_style(style);
                }
                x = end;
                continue;
            }
            if width == 0 {
                continue;
            }
            if x + width > right {
                break;
            }
            self.buf[(x, row)].set_char(ch).set_style(style);
            for pad in 1..width {
                self.buf[(x + pad, row)].set_symbol("");
            }
            x += width;
        }
        x
    }

    /// Apply `style` to the whole interior width of `row` (e.g. a highlight bar).
    pub fn style_row(&mut self, row: u16, style: Style) {
        if !self.contains_row(row) {
            return;
        }
        let area = Rect::new(self.area.x, row, self.area.width, 1);
        self.buf.set_style(area, style);
    }

    fn contains_row(&self, row: u16) -> bool {
        row >= self.area.top() && row < self.area.bottom()
    }
}
