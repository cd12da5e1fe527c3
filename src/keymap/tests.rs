//! Integration tests for the keymap system

use super::*;
use crate::editable::Mode;
use crate::motion::Motion;

#[test]
fn test_operator_prefix_is_ambiguous() {
    let keymap = default_keymap("jj");
    let found = keymap.normal.match_prefix(&keystrokes("d"));
    assert_eq!(found.candidates, 2);
    assert_eq!(
        found.exact.map(|b| b.continuation),
        Some(Some(Continuation::Motion))
    );
    assert!(!found.is_unique());
}

#[test]
fn test_doubled_operator_is_unique() {
    let keymap = default_keymap("jj");
    let found = keymap.normal.match_prefix(&keystrokes("dd"));
    assert!(found.is_unique());
    assert_eq!(found.exact.map(|b| b.command), Some(Command::DeleteLines));
}

#[test]
fn test_gg_needs_second_key() {
    let keymap = default_keymap("jj");
    let found = keymap.normal.match_prefix(&keystrokes("g"));
    assert_eq!(found.candidates, 1);
    assert!(found.exact.is_none());
}

#[test]
fn test_unknown_sequence_has_no_candidates() {
    let keymap = default_keymap("jj");
    let found = keymap.normal.match_prefix(&keystrokes("de"));
    assert_eq!(found.candidates, 0);
    assert!(found.exact.is_none());
}

#[test]
fn test_motion_bindings_carry_motion() {
    let keymap = default_keymap("jj");
    let binding = keymap.normal.lookup(&keystrokes("e")).unwrap();
    assert_eq!(binding.command, Command::Move);
    assert_eq!(binding.motion, Some(Motion::WordEnd));

    assert_eq!(
        keymap.motions.lookup(&keystrokes("G")),
        Some(&Motion::LastLine)
    );
}

#[test]
fn test_insert_escape_is_configurable() {
    let keymap = default_keymap("kj");
    assert!(keymap.insert.lookup(&keystrokes("jj")).is_none());
    assert_eq!(
        keymap.insert.lookup(&keystrokes("kj")).map(|b| b.command),
        Some(Command::ToNormal)
    );
}

#[test]
fn test_special_keys_per_mode() {
    let keymap = default_keymap("jj");
    let esc = Keystroke::key(KeyCode::Escape);

    let lookup = |mode: Mode| keymap.table(mode).lookup_key(&esc).map(|b| b.command);
    assert_eq!(lookup(Mode::Insert), Some(Command::ToNormal));
    assert_eq!(lookup(Mode::Visual), Some(Command::ToNormal));
    assert_eq!(lookup(Mode::Normal), Some(Command::Noop));
    assert_eq!(lookup(Mode::CommandLine), Some(Command::CommandLineCancel));

    assert_eq!(
        keymap
            .normal
            .lookup_key(&Keystroke::ctrl('r'))
            .map(|b| b.command),
        Some(Command::Redo)
    );
}

#[test]
fn test_bind_replaces_existing_sequence() {
    let mut table = SequenceTable::new();
    table.bind("zz", Binding::new(Command::Noop));
    table.bind("zz", Binding::new(Command::Undo));
    assert_eq!(table.len(), 1);
    assert_eq!(
        table.lookup(&keystrokes("zz")).map(|b| b.command),
        Some(Command::Undo)
    );
}
