//! Character classification and display helpers

/// Character class for word motions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// Whitespace, including the line sentinel
    Space,
    /// Letters, digits and underscore
    Word,
    /// Any other visible character
    Symbol,
}

/// Class of a character for `w`/`b`/`e` motions
pub fn char_class(ch: char) -> CharClass {
    if ch.is_whitespace() {
        CharClass::Space
    } else if ch.is_alphanumeric() || ch == '_' {
        CharClass::Word
    } else {
        CharClass::Symbol
    }
}

/// Class of a character for `W`/`B`/`E` motions: anything visible is a word
pub fn big_word_class(ch: char) -> CharClass {
    if ch.is_whitespace() {
        CharClass::Space
    } else {
        CharClass::Word
    }
}

/// Convert a char column to a display column, expanding tabs
pub fn char_col_to_visual_col(line: &[char], char_col: usize, tab_stop: usize) -> usize {
    let tab_stop = tab_stop.max(1);
    let mut visual_col = 0;
    for &ch in line.iter().take(char_col) {
        if ch == '\t' {
            visual_col += tab_stop - (visual_col % tab_stop);
        } else {
            visual_col += 1;
        }
    }
    visual_col
}

/// Expand tabs to spaces for display, dropping the line sentinel
pub fn expand_tabs_for_display(line: &[char], tab_stop: usize) -> String {
    let tab_stop = tab_stop.max(1);
    let mut result = String::with_capacity(line.len());
    let mut visual_col = 0;
    for &ch in line {
        match ch {
            '\n' => break,
            '\t' => {
                let spaces = tab_stop - (visual_col % tab_stop);
                result.extend(std::iter::repeat(' ').take(spaces));
                visual_col += spaces;
            }
            _ => {
                result.push(ch);
                visual_col += 1;
            }
        }
    }
    result
}

/// Width of leading whitespace in columns, tabs counted to the next stop
pub fn indent_width(line: &[char], tab_stop: usize) -> usize {
    let leading = line.iter().take_while(|&&c| c == ' ' || c == '\t').count();
    char_col_to_visual_col(line, leading, tab_stop)
}

/// Leading whitespace for an indent of `width` columns
pub fn indent_string(width: usize, tab_stop: usize, expand_tab: bool) -> Vec<char> {
    let tab_stop = tab_stop.max(1);
    if expand_tab {
        return vec![' '; width];
    }
    let mut indent = vec!['\t'; width / tab_stop];
    indent.extend(std::iter::repeat(' ').take(width % tab_stop));
    indent
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_char_class() {
        assert_eq!(char_class('a'), CharClass::Word);
        assert_eq!(char_class('_'), CharClass::Word);
        assert_eq!(char_class('7'), CharClass::Word);
        assert_eq!(char_class('.'), CharClass::Symbol);
        assert_eq!(char_class('\n'), CharClass::Space);
        assert_eq!(big_word_class('.'), CharClass::Word);
    }

    #[test]
    fn test_tab_expansion() {
        let line = chars("\tab\tc\n");
        assert_eq!(expand_tabs_for_display(&line, 4), "    ab  c");
        assert_eq!(char_col_to_visual_col(&line, 1, 4), 4);
        assert_eq!(char_col_to_visual_col(&line, 4, 4), 8);
    }

    #[test]
    fn test_indent_helpers() {
        assert_eq!(indent_width(&chars("\t  x\n"), 4), 6);
        assert_eq!(indent_string(6, 4, false), chars("\t  "));
        assert_eq!(indent_string(3, 4, true), chars("   "));
    }
}
