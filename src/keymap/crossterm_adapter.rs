//! Adapter to convert crossterm key events to our Keystroke type

use crossterm::event::{KeyCode as TermKeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::types::{KeyCode, Keystroke, Modifiers};

/// Convert a crossterm key event to our Keystroke type
///
/// Returns None for key releases and keys the editor has no use for.
pub fn keystroke_from_crossterm(event: &KeyEvent) -> Option<Keystroke> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    let key = match event.code {
        TermKeyCode::Char(c) => KeyCode::Char(c),
        TermKeyCode::Enter => KeyCode::Enter,
        TermKeyCode::Esc => KeyCode::Escape,
        TermKeyCode::Tab | TermKeyCode::BackTab => KeyCode::Tab,
        TermKeyCode::Backspace => KeyCode::Backspace,
        TermKeyCode::Delete => KeyCode::Delete,

        // Arrows
        TermKeyCode::Up => KeyCode::Up,
        TermKeyCode::Down => KeyCode::Down,
        TermKeyCode::Left => KeyCode::Left,
        TermKeyCode::Right => KeyCode::Right,

        // Navigation
        TermKeyCode::Home => KeyCode::Home,
        TermKeyCode::End => KeyCode::End,
        TermKeyCode::PageUp => KeyCode::PageUp,
        TermKeyCode::PageDown => KeyCode::PageDown,
        TermKeyCode::Insert => KeyCode::Insert,

        TermKeyCode::F(n) => KeyCode::F(n),
        _ => return None,
    };

    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    let alt = event.modifiers.contains(KeyModifiers::ALT);
    // Shift is already folded into the character for printable keys
    let shift =
        event.modifiers.contains(KeyModifiers::SHIFT) && !matches!(key, KeyCode::Char(_));

    Some(Keystroke::new(key, Modifiers::new(ctrl, shift, alt)))
}
