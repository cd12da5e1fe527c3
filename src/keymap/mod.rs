//! Modal keyboard mapping
//!
//! This module provides the per-mode binding tables the input parser reads:
//! - Maps printable key sequences (`dd`, `gg`, `jj`) and special keys
//!   (Esc, arrows, Ctrl-R) to commands
//! - Marks bindings that need more input (an operator's motion, `r`'s char)
//! - Holds the motion table used after operators
//!
//! # Architecture
//!
//! ```text
//! crossterm::KeyEvent → Keystroke → SequenceTable::match_prefix() → Binding → CommandContext
//! ```
//!
//! # Building a keymap
//!
//! ```
//! use quill::keymap::{default_keymap, keystrokes, Command};
//!
//! let keymap = default_keymap("jj");
//! let binding = keymap.normal.lookup(&keystrokes("dd")).unwrap();
//! assert_eq!(binding.command, Command::DeleteLines);
//! ```

mod binding;
mod command;
mod crossterm_adapter;
mod defaults;
#[allow(clippy::module_inception)]
mod keymap;
mod types;

pub use binding::{Binding, Continuation};
pub use command::Command;
pub use crossterm_adapter::keystroke_from_crossterm;
pub use defaults::default_keymap;
pub use keymap::{Keymap, SequenceMatch, SequenceTable};
pub use types::{keystrokes, KeyCode, Keystroke, Modifiers};

#[cfg(test)]
mod tests;
