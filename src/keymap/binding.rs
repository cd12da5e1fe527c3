//! Binding struct representing what a key sequence resolves to

use super::command::Command;
use crate::motion::Motion;

/// What the parser must read after a binding before the command is complete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// A motion, optionally with its own count (`d2w`)
    Motion,
    /// A single character (`r`, `f`, `F`)
    Char,
}

/// The command a key sequence maps to
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    /// The command to execute
    pub command: Command,
    /// Motion for movement bindings
    pub motion: Option<Motion>,
    /// Input still needed after the key sequence
    pub continuation: Option<Continuation>,
}

impl Binding {
    pub fn new(command: Command) -> Self {
        Self {
            command,
            motion: None,
            continuation: None,
        }
    }

    /// A cursor movement by `motion`
    pub fn motion(motion: Motion) -> Self {
        Self {
            command: Command::Move,
            motion: Some(motion),
            continuation: None,
        }
    }

    /// Require more input before dispatching (builder pattern)
    pub fn awaiting(mut self, continuation: Continuation) -> Self {
        self.continuation = Some(continuation);
        self
    }
}
