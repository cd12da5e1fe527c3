//! Word and WORD motions.
//!
//! The scan walks every character position of the text, newline sentinels
//! included, so words on following lines are reached naturally. Sentinels
//! classify as space. An empty line counts as a word of its own for `w`
//! and `b`.

use super::Target;
use crate::editable::{Mark, TextModel};
use crate::util::CharClass;

type Classify = fn(char) -> CharClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pos {
    line: usize,
    column: usize,
}

impl Pos {
    fn of(mark: Mark) -> Self {
        Self {
            line: mark.line,
            column: mark.column,
        }
    }

    fn mark(self, like: Mark) -> Mark {
        Mark::new(like.buffer, self.line, self.column)
    }
}

fn next(text: &TextModel, pos: Pos) -> Option<Pos> {
    if pos.column + 1 < text.line_len(pos.line) {
        Some(Pos {
            line: pos.line,
            column: pos.column + 1,
        })
    } else if pos.line < text.last_line() {
        Some(Pos {
            line: pos.line + 1,
            column: 0,
        })
    } else {
        None
    }
}

fn prev(text: &TextModel, pos: Pos) -> Option<Pos> {
    if pos.column > 0 {
        Some(Pos {
            line: pos.line,
            column: pos.column - 1,
        })
    } else if pos.line > 0 {
        Some(Pos {
            line: pos.line - 1,
            column: text.line_len(pos.line - 1) - 1,
        })
    } else {
        None
    }
}

fn class_at(text: &TextModel, pos: Pos, classify: Classify) -> CharClass {
    text.char_at(pos.line, pos.column)
        .map_or(CharClass::Space, classify)
}

fn is_empty_line(text: &TextModel, pos: Pos) -> bool {
    pos.column == 0 && text.line_len(pos.line) == 1
}

/// `e`/`E`: the last character of the current word, or of the next one when
/// already there
pub(super) fn word_end(mark: Mark, text: &TextModel, classify: Classify) -> Target {
    let mut pos = Pos::of(mark);
    loop {
        match next(text, pos) {
            Some(p) => pos = p,
            None => return stay(mark, text, classify),
        }
        if class_at(text, pos, classify) != CharClass::Space {
            break;
        }
    }

    let class = class_at(text, pos, classify);
    while let Some(p) = next(text, pos) {
        if class_at(text, p, classify) != class {
            break;
        }
        pos = p;
    }
    Target::inclusive(mark, pos.mark(mark))
}

/// `w`/`W`: the first character of the next word
pub(super) fn next_word_start(mark: Mark, text: &TextModel, classify: Classify) -> Target {
    let start = Pos::of(mark);
    let mut pos = start;

    let class = class_at(text, pos, classify);
    if class != CharClass::Space {
        loop {
            match next(text, pos) {
                Some(p) => pos = p,
                None => return to_end_of_text(mark, text),
            }
            if class_at(text, pos, classify) != class {
                break;
            }
        }
    }

    while class_at(text, pos, classify) == CharClass::Space {
        if pos != start && is_empty_line(text, pos) {
            break;
        }
        match next(text, pos) {
            Some(p) => pos = p,
            None => return to_end_of_text(mark, text),
        }
    }
    Target::exclusive(mark, pos.mark(mark))
}

/// `b`/`B`: the first character of the current word, or of the previous
/// one when already there
pub(super) fn prev_word_start(mark: Mark, text: &TextModel, classify: Classify) -> Target {
    let mut pos = Pos::of(mark);
    loop {
        match prev(text, pos) {
            Some(p) => pos = p,
            None => return Target::exclusive(mark, Mark::first_text_char(mark.buffer)),
        }
        if class_at(text, pos, classify) != CharClass::Space || is_empty_line(text, pos) {
            break;
        }
    }

    let class = class_at(text, pos, classify);
    if class != CharClass::Space {
        while let Some(p) = prev(text, pos) {
            if class_at(text, p, classify) != class {
                break;
            }
            pos = p;
        }
    }
    Target::exclusive(mark, pos.mark(mark))
}

/// No further word: stay put. An operator still takes the character under
/// the mark if it is visible.
fn stay(mark: Mark, text: &TextModel, classify: Classify) -> Target {
    let visible = class_at(text, Pos::of(mark), classify) != CharClass::Space;
    Target {
        region: crate::editable::Region::collapsed(mark),
        inclusive: visible,
        linewise: false,
    }
}

/// No further word start: span to the end of the last line
fn to_end_of_text(mark: Mark, text: &TextModel) -> Target {
    let line = text.last_line();
    let end = Mark::new(mark.buffer, line, text.line_len(line) - 1);
    Target::exclusive(mark, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editable::{BufferId, Mode};
    use crate::motion::Motion;

    const ID: BufferId = BufferId(0);

    fn text(content: &str) -> TextModel {
        TextModel::from_text(ID, content)
    }

    fn at(line: usize, column: usize) -> Mark {
        Mark::new(ID, line, column)
    }

    fn land(motion: Motion, content: &str, line: usize, column: usize) -> (usize, usize) {
        let text = text(content);
        let dest = motion.apply(at(line, column), &text, Mode::Normal).destination();
        (dest.line, dest.column)
    }

    #[test]
    fn test_word_end() {
        assert_eq!(land(Motion::WordEnd, "hello dude\n", 0, 0), (0, 4));
        assert_eq!(land(Motion::WordEnd, "hello dude\n", 0, 4), (0, 9));
        assert_eq!(land(Motion::WordEnd, "var xxx_yyy\n", 0, 5), (0, 10));
        assert_eq!(land(Motion::WordEnd, "foo.bar\n", 0, 0), (0, 2));
        assert_eq!(land(Motion::BigWordEnd, "foo.bar x\n", 0, 0), (0, 6));
        assert_eq!(land(Motion::WordEnd, "ab\n  cd\n", 0, 1), (1, 3));
    }

    #[test]
    fn test_word_end_at_last_char_stays_inclusive() {
        let text = text("abc\n");
        let target = Motion::WordEnd.apply(at(0, 2), &text, Mode::Normal);
        assert_eq!(target.destination(), at(0, 2));
        assert!(target.inclusive);
    }

    #[test]
    fn test_next_word_start() {
        assert_eq!(land(Motion::NextWordStart, "var xxx_yyy\n", 0, 0), (0, 4));
        assert_eq!(land(Motion::NextWordStart, "foo.bar\n", 0, 0), (0, 3));
        assert_eq!(land(Motion::NextBigWordStart, "foo.bar x\n", 0, 0), (0, 8));
        assert_eq!(land(Motion::NextWordStart, "1\n2\n3\n", 0, 0), (1, 0));
        assert_eq!(land(Motion::NextWordStart, "a\n\nb\n", 0, 0), (1, 0));
    }

    #[test]
    fn test_next_word_start_at_end_spans_to_end_of_text() {
        let text = text("x foo\n");
        let target = Motion::NextWordStart.apply(at(0, 2), &text, Mode::Normal);
        assert_eq!(target.destination(), at(0, 5));
        assert!(!target.inclusive);
    }

    #[test]
    fn test_prev_word_start() {
        assert_eq!(land(Motion::PrevWordStart, "hello world\n", 0, 8), (0, 6));
        assert_eq!(land(Motion::PrevWordStart, "hello world\n", 0, 6), (0, 0));
        assert_eq!(land(Motion::PrevWordStart, "ab\n  cd\n", 1, 2), (0, 0));
        assert_eq!(land(Motion::PrevBigWordStart, "x foo.bar\n", 0, 8), (0, 2));
        assert_eq!(land(Motion::PrevWordStart, "abc\n", 0, 0), (0, 0));
    }

    #[test]
    fn test_end_then_start_returns_to_same_word() {
        let content = "alpha beta_gamma, delta\n";
        let text = text(content);
        for column in [1, 7, 11, 19] {
            let end = Motion::WordEnd.apply(at(0, column), &text, Mode::Normal).destination();
            let back = Motion::PrevWordStart.apply(end, &text, Mode::Normal).destination();
            let word_start = Motion::PrevWordStart
                .apply(at(0, column), &text, Mode::Normal)
                .destination();
            assert_eq!(back, word_start, "column {column}");
        }
    }
}
