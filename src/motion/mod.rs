//! Motions: pure functions from a mark to a target span.
//!
//! A motion moves the cursor when used on its own and supplies the span for
//! operators (`d`, `c`, `y`) when used as their continuation. The [`Target`]
//! it returns says how an operator should treat the span:
//!
//! - `inclusive`: the character under the later mark belongs to the span
//!   (`e`, `E`, `$`, `f`, search forward)
//! - `linewise`: the operator acts on whole lines (`j`, `k`, `gg`, `G`)

mod find;
mod word;

use std::fmt;

use regex::Regex;

use crate::editable::{Mark, Mode, Region, TextModel};
use crate::util::{big_word_class, char_class};

/// A compiled search pattern
#[derive(Clone)]
pub struct Pattern(Regex);

impl Pattern {
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Regex::new(source).map(Pattern)
    }

    /// A pattern matching `text` literally
    pub fn literal(text: &str) -> Result<Self, regex::Error> {
        Self::new(&regex::escape(text))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn regex(&self) -> &Regex {
        &self.0
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pattern({:?})", self.0.as_str())
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

/// Every motion the editor knows
#[derive(Debug, Clone, PartialEq)]
pub enum Motion {
    /// `h`
    Left,
    /// `l`
    Right,
    /// `k`
    Up,
    /// `j`
    Down,
    /// `e`: end of the current or next word
    WordEnd,
    /// `E`: end of the current or next WORD
    BigWordEnd,
    /// `w`
    NextWordStart,
    /// `W`
    NextBigWordStart,
    /// `b`
    PrevWordStart,
    /// `B`
    PrevBigWordStart,
    /// `0`
    LineStart,
    /// `$`
    LineEnd,
    /// `gg`
    FirstLine,
    /// `G`
    LastLine,
    /// Next match of a pattern after the mark
    FindRight(Pattern),
    /// Last match of a pattern before the mark
    FindLeft(Pattern),
    /// `n`: repeat the last search forward
    SearchNext,
    /// `N`: repeat the last search backward
    SearchPrev,
}

/// The span a motion covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    /// From the starting mark to where the motion lands
    pub region: Region,
    /// The character under the later mark is part of the span
    pub inclusive: bool,
    /// Operators act on every line the region touches
    pub linewise: bool,
}

impl Target {
    fn exclusive(from: Mark, to: Mark) -> Self {
        Self {
            region: Region::new(from, to),
            inclusive: false,
            linewise: false,
        }
    }

    fn inclusive(from: Mark, to: Mark) -> Self {
        Self {
            region: Region::new(from, to),
            inclusive: true,
            linewise: false,
        }
    }

    fn linewise(from: Mark, to: Mark) -> Self {
        Self {
            region: Region::new(from, to),
            inclusive: false,
            linewise: true,
        }
    }

    /// Where the cursor lands when the motion is used on its own
    pub fn destination(&self) -> Mark {
        self.region.end
    }
}

impl Motion {
    /// Replace the search-repeat motions by a find with the last pattern.
    /// Returns `None` when there is nothing to repeat.
    pub fn resolve(self, last_search: Option<&Pattern>) -> Option<Motion> {
        match self {
            Motion::SearchNext => last_search.cloned().map(Motion::FindRight),
            Motion::SearchPrev => last_search.cloned().map(Motion::FindLeft),
            other => Some(other),
        }
    }

    /// Apply the motion once from `mark`
    pub fn apply(&self, mark: Mark, text: &TextModel, mode: Mode) -> Target {
        match self {
            Motion::Left => {
                let mut to = mark;
                if to.column > 0 {
                    to.column -= 1;
                }
                Target::exclusive(mark, to)
            }
            Motion::Right => {
                if mark.column < mark.max_cursor_column(text, mode) {
                    Target::exclusive(mark, Mark::new(mark.buffer, mark.line, mark.column + 1))
                } else {
                    // Already on the last character: an operator still takes it
                    Target {
                        region: Region::collapsed(mark),
                        inclusive: !mark.at_empty_line(text),
                        linewise: false,
                    }
                }
            }
            Motion::Up => {
                let mut to = mark;
                to.move_up(text, mode, 1);
                Target::linewise(mark, to)
            }
            Motion::Down => {
                let mut to = mark;
                to.move_down(text, mode, 1);
                Target::linewise(mark, to)
            }
            Motion::WordEnd => word::word_end(mark, text, char_class),
            Motion::BigWordEnd => word::word_end(mark, text, big_word_class),
            Motion::NextWordStart => word::next_word_start(mark, text, char_class),
            Motion::NextBigWordStart => word::next_word_start(mark, text, big_word_class),
            Motion::PrevWordStart => word::prev_word_start(mark, text, char_class),
            Motion::PrevBigWordStart => word::prev_word_start(mark, text, big_word_class),
            Motion::LineStart => Target::exclusive(mark, Mark::new(mark.buffer, mark.line, 0)),
            Motion::LineEnd => match mark.last_char_column(text) {
                Some(column) => {
                    Target::inclusive(mark, Mark::new(mark.buffer, mark.line, column))
                }
                None => Target::exclusive(mark, Mark::new(mark.buffer, mark.line, 0)),
            },
            Motion::FirstLine => Target::linewise(mark, Mark::first_text_char(mark.buffer)),
            Motion::LastLine => {
                Target::linewise(mark, Mark::new(mark.buffer, text.last_line(), 0))
            }
            Motion::FindRight(pattern) => {
                Target::inclusive(mark, find::find_right(mark, text, pattern))
            }
            Motion::FindLeft(pattern) => {
                Target::exclusive(mark, find::find_left(mark, text, pattern))
            }
            // Unresolved repeats have nothing to search for
            Motion::SearchNext | Motion::SearchPrev => {
                Target::exclusive(mark, mark)
            }
        }
    }

    /// Apply the motion `count` times, each time from where the last landed.
    /// The returned region starts at `mark`.
    pub fn apply_count(&self, mark: Mark, text: &TextModel, mode: Mode, count: usize) -> Target {
        let mut target = self.apply(mark, text, mode);
        for _ in 1..count.max(1) {
            let end = target.region.end;
            let next = self.apply(end, text, mode);
            if next.region.end == end && next.inclusive == target.inclusive {
                break;
            }
            target = next;
        }
        target.region.start = mark;
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editable::BufferId;

    const ID: BufferId = BufferId(0);

    fn text(content: &str) -> TextModel {
        TextModel::from_text(ID, content)
    }

    fn at(line: usize, column: usize) -> Mark {
        Mark::new(ID, line, column)
    }

    #[test]
    fn test_line_start_and_end() {
        let text = text("hello\n\n");
        let end = Motion::LineEnd.apply(at(0, 1), &text, Mode::Normal);
        assert_eq!(end.destination(), at(0, 4));
        assert!(end.inclusive);

        let empty = Motion::LineEnd.apply(at(1, 0), &text, Mode::Normal);
        assert_eq!(empty.destination(), at(1, 0));
        assert!(!empty.inclusive);

        let start = Motion::LineStart.apply(at(0, 3), &text, Mode::Normal);
        assert_eq!(start.destination(), at(0, 0));
        assert!(!start.inclusive);
    }

    #[test]
    fn test_first_and_last_line_are_linewise() {
        let text = text("a\nb\nc\n");
        let last = Motion::LastLine.apply(at(0, 0), &text, Mode::Normal);
        assert_eq!(last.destination(), at(2, 0));
        assert!(last.linewise);

        let first = Motion::FirstLine.apply(at(2, 0), &text, Mode::Normal);
        assert_eq!(first.destination(), at(0, 0));
        assert!(first.linewise);
    }

    #[test]
    fn test_right_on_last_char_stays_inclusive() {
        let text = text("ab\ncd\n");
        let target = Motion::Right.apply(at(0, 1), &text, Mode::Normal);
        assert_eq!(target.destination(), at(0, 1));
        assert!(target.inclusive);

        let target = Motion::Right.apply(at(0, 0), &text, Mode::Normal);
        assert_eq!(target.destination(), at(0, 1));
        assert!(!target.inclusive);
    }

    #[test]
    fn test_apply_count_repeats_from_landing_point() {
        let text = text("one two three four\n");
        let target = Motion::NextWordStart.apply_count(at(0, 0), &text, Mode::Normal, 2);
        assert_eq!(target.region.start, at(0, 0));
        assert_eq!(target.destination(), at(0, 8));

        let down = Motion::Down.apply_count(at(0, 0), &text, Mode::Normal, 5);
        assert_eq!(down.destination(), at(0, 0));
    }

    #[test]
    fn test_resolve_search_repeat() {
        let pattern = Pattern::new("fo+").unwrap();
        assert_eq!(
            Motion::SearchNext.resolve(Some(&pattern)),
            Some(Motion::FindRight(pattern.clone()))
        );
        assert_eq!(Motion::SearchPrev.resolve(None), None);
        assert_eq!(Motion::WordEnd.resolve(None), Some(Motion::WordEnd));
    }
}
