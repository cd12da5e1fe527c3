//! Regions: spans between two marks.

use super::cursor::Mark;

/// A span between two marks of the same buffer, in either order.
/// `start` is where the span began (the cursor or visual anchor) and `end`
/// is where a motion or the cursor moved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub start: Mark,
    pub end: Mark,
}

impl Region {
    pub const fn new(start: Mark, end: Mark) -> Self {
        Self { start, end }
    }

    /// A zero-length region at `mark`
    pub const fn collapsed(mark: Mark) -> Self {
        Self {
            start: mark,
            end: mark,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start.line == self.end.line && self.start.column == self.end.column
    }

    /// The two marks with the earlier one first
    pub fn ordered(&self) -> (Mark, Mark) {
        order_marks(self.start, self.end)
    }

    /// First and last line spanned
    pub fn line_span(&self) -> (usize, usize) {
        let (from, to) = self.ordered();
        (from.line, to.line)
    }
}

/// Sort two marks by line, then column
pub fn order_marks(a: Mark, b: Mark) -> (Mark, Mark) {
    if b.is_before(&a) {
        (b, a)
    } else {
        (a, b)
    }
}
