//! Word wrapping of raw message text into display lines.
//!
//! # Algorithm
//!
//! Explicit `\n` always ends a line. Within a newline-delimited segment,
//! characters accumulate until the next one would pass `width` terminal
//! cells; the line then breaks just after the last whitespace or punctuation
//! character inside that chunk, and the rest of the chunk is carried into the
//! next line. A chunk with no such boundary is hard-broken at the budget so
//! pathological input (one enormous token) always makes progress.
//!
//! Widths are display cells: wide (CJK) characters take two, combining marks
//! none, and a tab runs to the next multiple of [`TAB_SPACES`] from the start
//! of its line, the same rule [`Viewport::draw_text`] applies. Nothing is
//! trimmed: concatenating the lines (re-inserting `\n` after every
//! [`DisplayLine::ends_paragraph`] line) reproduces the input exactly.
//!
//! [`Viewport::draw_text`]: super::viewport::Viewport::draw_text

use unicode_width::UnicodeWidthChar;

/// Columns between tab stops.
pub const TAB_SPACES: usize = 4;

/// Cells `ch` occupies when drawn at `column` of its line.
pub fn char_width(ch: char, column: usize) -> usize {
    if ch == '\t' {
        TAB_SPACES - column % TAB_SPACES
    } else {
        ch.width().unwrap_or(0)
    }
}

/// A line guaranteed to fit within the column budget it was wrapped for.
///
/// Only [`wrap`] creates these; they are immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLine {
    text: String,
    ends_paragraph: bool,
}

impl DisplayLine {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of characters in the line.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Terminal cells the line occupies.
    pub fn width(&self) -> usize {
        self.text
            .chars()
            .fold(0, |column, ch| column + char_width(ch, column))
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether an explicit newline terminated this line in the source text.
    pub fn ends_paragraph(&self) -> bool {
        self.ends_paragraph
    }
}

/// Characters the wrapper may break after.
fn is_break_point(ch: char) -> bool {
    ch.is_whitespace() || ch.is_ascii_punctuation()
}

/// Split `text` into lines of at most `width` cells.
///
/// Empty text yields a single empty line. A `width` of zero is treated as one.
/// A single character wider than `width` (a CJK character at width 1) gets a
/// line of its own.
pub fn wrap(text: &str, width: usize) -> Vec<DisplayLine> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut segments = text.split('\n').peekable();

    while let Some(segment) = segments.next() {
        let ends_paragraph = segments.peek().is_some();
        wrap_segment(segment, width, ends_paragraph, &mut lines);
    }

    lines
}

fn wrap_segment(segment: &str, width: usize, ends_paragraph: bool, out: &mut Vec<DisplayLine>) {
    let chars: Vec<char> = segment.chars().collect();
    let mut start = 0;

    loop {
        let end = fitting_end(&chars, start, width);
        if end == chars.len() {
            out.push(DisplayLine {
                text: chars[start..].iter().collect(),
                ends_paragraph,
            });
            return;
        }

        let cut = chars[start..end]
            .iter()
            .rposition(|&ch| is_break_point(ch))
            .map_or(end, |pos| start + pos + 1);

        out.push(DisplayLine {
            text: chars[start..cut].iter().collect(),
            ends_paragraph: false,
        });
        start = cut;
    }
}

/// End of the longest run from `start` that fits in `width` cells.
///
/// Always takes at least one character when any remain.
fn fitting_end(chars: &[char], start: usize, width: usize) -> usize {
    let mut column = 0;
    let mut end = start;
    while let Some(&ch) = chars.get(end) {
        let cells = char_width(ch, column);
        if column + cells > width && end > start {
            break;
        }
        column += cells;
        end += 1;
    }
    end
}

/// Rebuild the source text from wrapped lines.
pub fn unwrap_lines(lines: &[DisplayLine]) -> String {
    let mut text = String::new();
    for line in lines {
        text.push_str(line.as_str());
        if line.ends_paragraph() {
            text.push('\n');
        }
    }
    text
}
