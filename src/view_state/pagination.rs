//! Fixed-height pagination over a sequence of display lines.

use std::ops::Range;

/// Half-open range `[from, to)` of line indices forming one screenful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub from: usize,
    pub to: usize,
}

impl Page {
    pub fn len(&self) -> usize {
        self.to - self.from
    }

    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }

    pub fn range(&self) -> Range<usize> {
        self.from..self.to
    }
}

/// Partition `lines` into pages of `page_height` lines.
///
/// Pages tile `[0, lines.len())` without gaps or overlaps; only the last page
/// may be shorter. A sequence that fits in one page (including an empty one)
/// produces exactly one page. A `page_height` of zero is treated as one.
pub fn paginate<T>(lines: &[T], page_height: usize) -> Vec<Page> {
    let total = lines.len();
    let page_height = page_height.max(1);

    if total <= page_height {
        return vec![Page { from: 0, to: total }];
    }

    (0..total)
        .step_by(page_height)
        .map(|from| Page {
            from,
            to: (from + page_height).min(total),
        })
        .collect()
}
