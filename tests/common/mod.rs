//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::path::Path;

use quill::editable::{BufferId, Mark, TextModel};
use quill::hooks::HookRegistry;
use quill::keymap::{default_keymap, KeyCode, Keymap, Keystroke};
use quill::runtime::LocalEditor;
use quill::storage::MemoryStorage;
use quill::view::NullRenderer;
use quill::{Dispatcher, EditorConfig, EditorSession};

pub const ID: BufferId = BufferId(0);

/// Text model for buffer 0
pub fn text(content: &str) -> TextModel {
    TextModel::from_text(ID, content)
}

/// Mark in buffer 0
pub fn at(line: usize, column: usize) -> Mark {
    Mark::new(ID, line, column)
}

/// Scratch editor holding `content`, cursor on the first character
pub fn editor(content: &str) -> LocalEditor {
    LocalEditor::with_text(content)
}

/// Scratch editor holding `content`, reading keys through `keymap`
pub fn editor_with_keymap(content: &str, keymap: Keymap) -> LocalEditor {
    let dispatcher = Dispatcher::new(
        EditorSession::with_text(EditorConfig::default(), content),
        Box::new(NullRenderer),
        Box::new(MemoryStorage::new()),
        HookRegistry::new(),
    );
    LocalEditor::new(dispatcher, keymap)
}

/// `"1\n2\n...\nn\n"`
pub fn numbered_lines(n: usize) -> String {
    (1..=n).map(|i| format!("{}\n", i)).collect()
}

/// Editor with the built-in filetype hooks, editing `path` from `storage`
pub fn file_editor(storage: &MemoryStorage, path: &str) -> LocalEditor {
    let config = EditorConfig::default();
    let keymap = default_keymap(&config.insert_escape);
    let mut session = EditorSession::new(config);
    session.open(Path::new(path), storage);
    let hooks = HookRegistry::with_defaults().unwrap();
    let dispatcher = Dispatcher::new(
        session,
        Box::new(NullRenderer),
        Box::new(storage.clone()),
        hooks,
    );
    LocalEditor::new(dispatcher, keymap)
}

/// Type `keys` and check the resulting text
pub fn assert_keys(content: &str, keys: &str, expected: &str) {
    let mut editor = editor(content);
    editor.keys(keys).unwrap();
    assert_eq!(
        editor.text(),
        expected,
        "typing {:?} into {:?}",
        keys,
        content
    );
}

/// Keystrokes for `sequence`, with `\n` as Enter and `\x1b` as Escape
pub fn typed(sequence: &str) -> Vec<Keystroke> {
    sequence
        .chars()
        .map(|ch| match ch {
            '\n' => Keystroke::key(KeyCode::Enter),
            '\x1b' => Keystroke::key(KeyCode::Escape),
            ch => Keystroke::char(ch),
        })
        .collect()
}
