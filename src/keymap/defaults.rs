//! Default keybindings for the editor
//!
//! These are the standard vi-style bindings that ship with the editor. The
//! only configurable part is the insert-mode escape sequence (`jj` unless
//! the settings file says otherwise).

use super::binding::{Binding, Continuation};
use super::command::Command;
use super::keymap::{Keymap, SequenceTable};
use super::types::{KeyCode, Keystroke};
use crate::motion::Motion;

/// Key sequences for the motion table
fn default_motions() -> Vec<(&'static str, Motion)> {
    vec![
        ("h", Motion::Left),
        ("l", Motion::Right),
        ("k", Motion::Up),
        ("j", Motion::Down),
        ("e", Motion::WordEnd),
        ("E", Motion::BigWordEnd),
        ("w", Motion::NextWordStart),
        ("W", Motion::NextBigWordStart),
        ("b", Motion::PrevWordStart),
        ("B", Motion::PrevBigWordStart),
        ("0", Motion::LineStart),
        ("$", Motion::LineEnd),
        ("gg", Motion::FirstLine),
        ("G", Motion::LastLine),
        ("n", Motion::SearchNext),
        ("N", Motion::SearchPrev),
    ]
}

/// Arrow and navigation keys that move the cursor in every editing mode
fn bind_cursor_keys(table: &mut SequenceTable<Binding>) {
    let keys = [
        (KeyCode::Left, Motion::Left),
        (KeyCode::Right, Motion::Right),
        (KeyCode::Up, Motion::Up),
        (KeyCode::Down, Motion::Down),
        (KeyCode::Home, Motion::LineStart),
        (KeyCode::End, Motion::LineEnd),
    ];
    for (key, motion) in keys {
        table.bind_key(Keystroke::key(key), Binding::motion(motion));
    }
    table.bind_key(
        Keystroke::key(KeyCode::F(1)),
        Binding::new(Command::ForceExit),
    );
}

fn normal_table(motions: &[(&'static str, Motion)]) -> SequenceTable<Binding> {
    let mut table = SequenceTable::new();
    for (keys, motion) in motions {
        table.bind(keys, Binding::motion(motion.clone()));
    }

    // Mode changes
    table.bind("i", Binding::new(Command::EnterInsert));
    table.bind("a", Binding::new(Command::Append));
    table.bind("I", Binding::new(Command::InsertLineStart));
    table.bind("A", Binding::new(Command::AppendLineEnd));
    table.bind("o", Binding::new(Command::OpenBelow));
    table.bind("O", Binding::new(Command::OpenAbove));
    table.bind("v", Binding::new(Command::EnterVisual));
    table.bind(":", Binding::new(Command::EnterCommandLine));

    // Operators
    table.bind(
        "d",
        Binding::new(Command::Delete).awaiting(Continuation::Motion),
    );
    table.bind("dd", Binding::new(Command::DeleteLines));
    table.bind(
        "c",
        Binding::new(Command::Change).awaiting(Continuation::Motion),
    );
    table.bind("cc", Binding::new(Command::ChangeLines));
    table.bind(
        "y",
        Binding::new(Command::Yank).awaiting(Continuation::Motion),
    );
    table.bind("yy", Binding::new(Command::YankLines));
    table.bind(
        "D",
        Binding {
            motion: Some(Motion::LineEnd),
            ..Binding::new(Command::Delete)
        },
    );
    table.bind(
        "C",
        Binding {
            motion: Some(Motion::LineEnd),
            ..Binding::new(Command::Change)
        },
    );

    // Simple edits
    table.bind("x", Binding::new(Command::DeleteCharAfter));
    table.bind("X", Binding::new(Command::DeleteCharBefore));
    table.bind("p", Binding::new(Command::PasteAfter));
    table.bind("P", Binding::new(Command::PasteBefore));
    table.bind("J", Binding::new(Command::JoinLines));
    table.bind(
        "r",
        Binding::new(Command::ReplaceChar).awaiting(Continuation::Char),
    );
    table.bind(
        "f",
        Binding::new(Command::FindCharRight).awaiting(Continuation::Char),
    );
    table.bind(
        "F",
        Binding::new(Command::FindCharLeft).awaiting(Continuation::Char),
    );

    // History
    table.bind("u", Binding::new(Command::Undo));
    table.bind_key(Keystroke::ctrl('r'), Binding::new(Command::Redo));

    table.bind_key(Keystroke::key(KeyCode::Escape), Binding::new(Command::Noop));
    table.bind_key(Keystroke::ctrl('c'), Binding::new(Command::Noop));
    bind_cursor_keys(&mut table);
    table
}

fn visual_table(motions: &[(&'static str, Motion)]) -> SequenceTable<Binding> {
    let mut table = SequenceTable::new();
    for (keys, motion) in motions {
        table.bind(keys, Binding::motion(motion.clone()));
    }
    table.bind("d", Binding::new(Command::DeleteSelection));
    table.bind("x", Binding::new(Command::DeleteSelection));
    table.bind("c", Binding::new(Command::ChangeSelection));
    table.bind("y", Binding::new(Command::YankSelection));
    table.bind("v", Binding::new(Command::ToNormal));

    table.bind_key(Keystroke::key(KeyCode::Escape), Binding::new(Command::ToNormal));
    table.bind_key(Keystroke::ctrl('c'), Binding::new(Command::ToNormal));
    bind_cursor_keys(&mut table);
    table
}

fn insert_table(escape: &str) -> SequenceTable<Binding> {
    let mut table = SequenceTable::new();
    table.bind(escape, Binding::new(Command::ToNormal));

    let keys = [
        (KeyCode::Escape, Command::ToNormal),
        (KeyCode::Enter, Command::InsertNewline),
        (KeyCode::Tab, Command::InsertTab),
        (KeyCode::Backspace, Command::DeleteCharBefore),
        (KeyCode::Delete, Command::DeleteCharAfter),
    ];
    for (key, command) in keys {
        table.bind_key(Keystroke::key(key), Binding::new(command));
    }
    table.bind_key(Keystroke::ctrl('c'), Binding::new(Command::ToNormal));
    bind_cursor_keys(&mut table);
    table
}

fn command_line_table() -> SequenceTable<Binding> {
    let mut table = SequenceTable::new();
    let keys = [
        (KeyCode::Enter, Command::CommandLineCommit),
        (KeyCode::Escape, Command::CommandLineCancel),
        (KeyCode::Backspace, Command::CommandLineBackspace),
        (KeyCode::Up, Command::CommandLineHistoryPrev),
        (KeyCode::Down, Command::CommandLineHistoryNext),
        (KeyCode::F(1), Command::ForceExit),
    ];
    for (key, command) in keys {
        table.bind_key(Keystroke::key(key), Binding::new(command));
    }
    table.bind_key(Keystroke::ctrl('c'), Binding::new(Command::CommandLineCancel));
    table
}

/// The standard keymap with `escape` as the insert-mode escape sequence
pub fn default_keymap(escape: &str) -> Keymap {
    let motions = default_motions();
    let mut motion_table = SequenceTable::new();
    for (keys, motion) in &motions {
        motion_table.bind(keys, motion.clone());
    }

    Keymap {
        normal: normal_table(&motions),
        visual: visual_table(&motions),
        insert: insert_table(escape),
        command_line: command_line_table(),
        motions: motion_table,
    }
}
