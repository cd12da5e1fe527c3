//! Undo/redo tests - every change undoes to the exact prior text and redoes
//! to the exact later one

mod common;

use common::{editor, numbered_lines};
use quill::keymap::{KeyCode, Keystroke};
use quill::runtime::LocalEditor;

/// Apply `keys`, then check that undo restores `content` and redo restores
/// the edited text
fn assert_undo_law(content: &str, keys: &str) {
    let mut editor = editor(content);
    editor.keys(keys).unwrap();
    let edited = editor.text();
    assert_ne!(edited, content, "{:?} changed nothing", keys);

    editor.keys("u").unwrap();
    assert_eq!(editor.text(), content, "undo after {:?}", keys);

    editor.key(Keystroke::ctrl('r')).unwrap();
    assert_eq!(editor.text(), edited, "redo after {:?}", keys);
}

/// Apply `keys`, undo `n` changes, redo them and undo them again. The
/// second undo lands on the same text as the first.
fn assert_undo_law_steps(content: &str, keys: &str, n: usize) {
    let mut editor = editor(content);
    editor.keys(keys).unwrap();
    let edited = editor.text();
    let changes = editor.dispatcher().session().active().unwrap().changes.len();
    assert!(changes >= n, "{:?} made {} changes, wanted {}", keys, changes, n);

    let undo = |editor: &mut LocalEditor| {
        for _ in 0..n {
            editor.keys("u").unwrap();
        }
    };
    undo(&mut editor);
    let undone = editor.text();
    if n == changes {
        assert_eq!(undone, content, "undoing all of {:?}", keys);
    }

    for _ in 0..n {
        editor.key(Keystroke::ctrl('r')).unwrap();
    }
    assert_eq!(editor.text(), edited, "redo {} of {:?}", n, keys);

    undo(&mut editor);
    assert_eq!(editor.text(), undone, "undo {} again after {:?}", n, keys);
}

// ========================================================================
// The undo law for each kind of change
// ========================================================================

#[test]
fn test_undo_law_operators() {
    assert_undo_law("hello dude\n", "de");
    assert_undo_law("var xxx_yyy\n", "wlde");
    assert_undo_law("1\n2\n3\n", "dw");
    assert_undo_law("hello world\n", "wD");
    assert_undo_law("a\nb\nc\n", "dj");
    assert_undo_law(&numbered_lines(15), "4j10dd");
    assert_undo_law("only\n", "dd");
}

#[test]
fn test_undo_law_character_edits() {
    assert_undo_law("abcdef\n", "3x");
    assert_undo_law("abc\n", "llX");
    assert_undo_law("abc\n", "2rz");
    assert_undo_law("foo\n  bar\nbaz\n", "3J");
}

#[test]
fn test_undo_law_paste() {
    assert_undo_law("a\nb\n", "yyp");
    assert_undo_law("a\nb\n", "yyP");
    assert_undo_law("foo bar\n", "yw$p");
}

#[test]
fn test_undo_law_insert_sessions() {
    assert_undo_law("123\n", "li0\x1b");
    assert_undo_law("hello world\n", "cwbye\x1b");
    assert_undo_law("  hello\nx\n", "ccbye\x1b");
    assert_undo_law("a\nb\n", "Ox\x1b");
    assert_undo_law("a\nb\n", "ox\ny\x1b");
    assert_undo_law("abc\n", "ixjj");
}

#[test]
fn test_undo_law_visual() {
    assert_undo_law("hello world\n", "vlld");
    assert_undo_law("hello world\n", "velcbye\x1b");
}

// ========================================================================
// History walking
// ========================================================================

#[test]
fn test_undo_steps_back_one_change_at_a_time() {
    let mut editor = editor("abc\n");
    editor.keys("xxx").unwrap();
    assert_eq!(editor.text(), "\n");

    editor.keys("u").unwrap();
    assert_eq!(editor.text(), "c\n");
    editor.keys("u").unwrap();
    assert_eq!(editor.text(), "bc\n");
    editor.keys("u").unwrap();
    assert_eq!(editor.text(), "abc\n");
}

#[test]
fn test_undo_status_messages() {
    let mut editor = editor("abc\n");
    editor.keys("x").unwrap();
    editor.keys("u").unwrap();
    assert_eq!(editor.status(), "undid change #1 of 1");
    editor.keys("u").unwrap();
    assert_eq!(editor.status(), "No more changes to undo");

    editor.key(Keystroke::ctrl('r')).unwrap();
    assert_eq!(editor.status(), "redid change #1 of 1");
    editor.key(Keystroke::ctrl('r')).unwrap();
    assert_eq!(editor.status(), "Already at latest change");
    assert_eq!(editor.text(), "bc\n");
}

#[test]
fn test_new_change_discards_redo() {
    let mut editor = editor("abc\n");
    editor.keys("xux").unwrap();
    assert_eq!(editor.text(), "bc\n");
    editor.key(Keystroke::ctrl('r')).unwrap();
    assert_eq!(editor.status(), "Already at latest change");
    assert_eq!(editor.text(), "bc\n");
}

#[test]
fn test_typing_is_one_change() {
    let mut editor = editor("\n");
    editor.keys("ihello world\x1b").unwrap();
    assert_eq!(editor.text(), "hello world\n");
    editor.keys("u").unwrap();
    assert_eq!(editor.text(), "\n");
}

#[test]
fn test_cursor_move_splits_typing() {
    let mut editor = editor("\n");
    editor.keys("iab").unwrap();
    editor.key(Keystroke::key(KeyCode::Left)).unwrap();
    editor.keys("X\x1b").unwrap();
    assert_eq!(editor.text(), "aXb\n");

    editor.keys("u").unwrap();
    assert_eq!(editor.text(), "ab\n");
    editor.keys("u").unwrap();
    assert_eq!(editor.text(), "\n");
}

#[test]
fn test_backspace_past_insert_start_undoes() {
    let mut editor = editor("abc\n");
    editor.keys("A").unwrap();
    editor.key(Keystroke::key(KeyCode::Backspace)).unwrap();
    editor.keys("Z\x1b").unwrap();
    assert_eq!(editor.text(), "abZ\n");

    editor.keys("u").unwrap();
    assert_eq!(editor.text(), "abc\n");
    editor.key(Keystroke::ctrl('r')).unwrap();
    assert_eq!(editor.text(), "abZ\n");
}

#[test]
fn test_yank_is_not_a_change() {
    let mut editor = editor("abc\n");
    editor.keys("yy").unwrap();
    editor.keys("u").unwrap();
    assert_eq!(editor.status(), "No more changes to undo");
}

#[test]
fn test_redo_replays_recorded_paste_not_register() {
    let mut editor = editor("a\nb\n");
    editor.keys("yyp").unwrap();
    editor.keys("u").unwrap();
    editor.keys("jyy").unwrap();
    editor.key(Keystroke::ctrl('r')).unwrap();
    assert_eq!(editor.text(), "a\na\nb\n");
}

// ========================================================================
// The undo law over several changes
// ========================================================================

#[test]
fn test_undo_law_over_operators_inserts_and_joins() {
    let keys = "dwjA!\x1bkJ";
    assert_undo_law_steps("hello world\nfoo bar\n", keys, 3);
    assert_undo_law_steps("hello world\nfoo bar\n", keys, 2);
}

#[test]
fn test_undo_law_over_paste_and_visual_edits() {
    let keys = "yyjpxvlld";
    assert_undo_law_steps("one\ntwo\nthree\n", keys, 3);
    assert_undo_law_steps("one\ntwo\nthree\n", keys, 1);
}

#[test]
fn test_undo_law_over_change_replace_and_open_line() {
    let keys = "cwxyz\x1b3xOnew\x1bjrQ";
    assert_undo_law_steps("abc def\n", keys, 4);
    assert_undo_law_steps("abc def\n", keys, 2);
}

#[test]
fn test_undo_law_over_counted_line_deletes() {
    let keys = "3jdd2ddggPGp";
    assert_undo_law_steps(&numbered_lines(10), keys, 4);
    assert_undo_law_steps(&numbered_lines(10), keys, 3);
}
