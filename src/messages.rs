//! Message types passed between the parser and the dispatcher
//!
//! Every resolved key sequence becomes one [`CommandContext`]. The dispatcher
//! answers each with a [`Completion`].

use crate::editable::{Mark, Mode, Region, Snippet};
use crate::keymap::Command;
use crate::motion::Motion;

/// A fully resolved command, ready to execute
#[derive(Debug, Clone, PartialEq)]
pub struct CommandContext {
    pub command: Command,
    /// Repeat count, at least 1
    pub count: usize,
    /// The keys that produced the command, for logging
    pub keys: String,
    /// Ex command line for `CommandLineCommit`
    pub argument: String,
    pub motion: Option<Motion>,
    /// Where the command acts; the dispatcher fills in the cursor if unset
    pub point: Option<Mark>,
    /// Character payload (typed char, `r`/`f` argument)
    pub ch: Option<char>,
    /// Text payload (paste, replace)
    pub text: Option<Snippet>,
    /// The text payload is whole lines
    pub linewise: bool,
    /// Span replaced by `ReplaceRegion`
    pub region: Option<Region>,
    /// Skip rendering after execution
    pub silent: bool,
    /// Executing from history: do not record a new change
    pub replay: bool,
    /// Message the handler wants on the status line
    pub status: String,
}

impl CommandContext {
    pub fn new(command: Command) -> Self {
        Self {
            command,
            count: 1,
            keys: String::new(),
            argument: String::new(),
            motion: None,
            point: None,
            ch: None,
            text: None,
            linewise: false,
            region: None,
            silent: false,
            replay: false,
            status: String::new(),
        }
    }

    pub fn with_char(mut self, ch: char) -> Self {
        self.ch = Some(ch);
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count.max(1);
        self
    }

    pub fn silent(mut self) -> Self {
        self.silent = true;
        self
    }
}

/// Reply to one executed command
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Completion {
    /// Mode of the active buffer after the command
    pub mode: Mode,
    pub status: String,
    /// The session should end
    pub quit: bool,
}
