//! Pattern search motions, scanning line by line.

use super::Pattern;
use crate::editable::{Mark, TextModel};

/// Byte offset of char index `column` in `line`, or `None` past the end
fn byte_offset(line: &str, column: usize) -> Option<usize> {
    if column == line.chars().count() {
        return Some(line.len());
    }
    line.char_indices().nth(column).map(|(offset, _)| offset)
}

fn char_column(line: &str, byte: usize) -> usize {
    line[..byte].chars().count()
}

/// First match starting after the mark, wrapping to following lines.
/// Without a match, the last text position of the buffer.
pub(super) fn find_right(mark: Mark, text: &TextModel, pattern: &Pattern) -> Mark {
    for line in mark.line..text.line_count() {
        let content = text.line_text(line);
        let from = if line == mark.line {
            match byte_offset(&content, mark.column + 1) {
                Some(offset) => offset,
                None => continue,
            }
        } else {
            0
        };
        if let Some(found) = pattern.regex().find_at(&content, from) {
            return Mark::new(mark.buffer, line, char_column(&content, found.start()));
        }
    }
    Mark::last_text_char(text)
}

/// Last match starting before the mark, wrapping to preceding lines.
/// Without a match, the first position of the buffer.
pub(super) fn find_left(mark: Mark, text: &TextModel, pattern: &Pattern) -> Mark {
    for line in (0..=mark.line.min(text.last_line())).rev() {
        let content = text.line_text(line);
        let before = if line == mark.line {
            mark.column
        } else {
            usize::MAX
        };
        let last = pattern
            .regex()
            .find_iter(&content)
            .map(|found| char_column(&content, found.start()))
            .take_while(|&column| column < before)
            .last();
        if let Some(column) = last {
            return Mark::new(mark.buffer, line, column);
        }
    }
    Mark::first_text_char(mark.buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editable::BufferId;

    const ID: BufferId = BufferId(0);

    fn at(line: usize, column: usize) -> Mark {
        Mark::new(ID, line, column)
    }

    #[test]
    fn test_find_right_skips_match_under_cursor() {
        let text = TextModel::from_text(ID, "foo bar foo\nbaz foo\n");
        let pattern = Pattern::new("foo").unwrap();
        assert_eq!(find_right(at(0, 0), &text, &pattern), at(0, 8));
        assert_eq!(find_right(at(0, 8), &text, &pattern), at(1, 4));
        assert_eq!(find_right(at(1, 4), &text, &pattern), at(1, 6));
    }

    #[test]
    fn test_find_left_wraps_to_previous_lines() {
        let text = TextModel::from_text(ID, "foo bar foo\nbaz foo\n");
        let pattern = Pattern::new("foo").unwrap();
        assert_eq!(find_left(at(1, 4), &text, &pattern), at(0, 8));
        assert_eq!(find_left(at(0, 8), &text, &pattern), at(0, 0));
        assert_eq!(find_left(at(0, 0), &text, &pattern), at(0, 0));
    }

    #[test]
    fn test_find_handles_multibyte_text() {
        let text = TextModel::from_text(ID, "héllo wörld\n");
        let pattern = Pattern::literal("ö").unwrap();
        assert_eq!(find_right(at(0, 0), &text, &pattern), at(0, 7));
    }
}
