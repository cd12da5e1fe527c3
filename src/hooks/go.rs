//! Go source support

use regex::Regex;

use super::FiletypeHooks;
use crate::editable::{Line, TextModel, NEWLINE};
use crate::util::text::indent_width;

const TRIGGERS: [char; 3] = [')', '}', ':'];

/// Block-based indentation and trailing-whitespace cleanup for Go
#[derive(Debug, Clone)]
pub struct GoHooks {
    open_block: Regex,
    close_block: Regex,
    case_label: Regex,
}

impl GoHooks {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            open_block: Regex::new(r"[{(:]\s*$")?,
            close_block: Regex::new(r"^\s*[})]")?,
            case_label: Regex::new(r"^\s*(?:case\s.*|default\s*):\s*$")?,
        })
    }
}

/// Line content without the newline or a trailing `//` comment
fn code_of(line: &[char]) -> String {
    let text: String = line.iter().take_while(|&&c| c != NEWLINE).collect();
    match text.find("//") {
        Some(index) => text[..index].to_string(),
        None => text,
    }
}

impl FiletypeHooks for GoHooks {
    fn trigger_chars(&self) -> &[char] {
        &TRIGGERS
    }

    fn indent(&self, text: &TextModel, line: usize, tab_stop: usize) -> usize {
        let (Some(prev), Some(curr)) = (
            line.checked_sub(1).and_then(|l| text.line(l)),
            text.line(line),
        ) else {
            return 0;
        };

        let mut indent = indent_width(prev, tab_stop);
        let prev_code = code_of(prev);
        let curr_code = code_of(curr);

        if self.open_block.is_match(&prev_code) {
            indent += tab_stop;
        }
        if self.close_block.is_match(&curr_code) {
            indent = indent.saturating_sub(tab_stop);
        }
        if self.case_label.is_match(&curr_code) {
            indent = indent.saturating_sub(tab_stop);
        }
        indent
    }

    /// Strip trailing blanks from every line
    fn before_save(&self, text: &TextModel) -> Option<Vec<Line>> {
        let mut changed = false;
        let lines = text
            .lines()
            .iter()
            .map(|line| {
                let content = &line[..line.len() - 1];
                let keep = content
                    .iter()
                    .rposition(|&c| c != ' ' && c != '\t')
                    .map_or(0, |i| i + 1);
                if keep < content.len() {
                    changed = true;
                }
                let mut trimmed = content[..keep].to_vec();
                trimmed.push(NEWLINE);
                trimmed
            })
            .collect();
        changed.then_some(lines)
    }
}
