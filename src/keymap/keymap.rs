//! Per-mode tables for looking up key sequences

use std::collections::HashMap;

use super::binding::Binding;
use super::types::{keystrokes, Keystroke};
use crate::editable::Mode;
use crate::motion::Motion;

/// Result of matching a partial key sequence against a table
#[derive(Debug, PartialEq)]
pub struct SequenceMatch<'a, T> {
    /// The entry whose sequence equals the input, if any
    pub exact: Option<&'a T>,
    /// Number of entries whose sequence starts with the input
    pub candidates: usize,
}

impl<T> SequenceMatch<'_, T> {
    /// Exactly one entry could match and the input is complete
    pub fn is_unique(&self) -> bool {
        self.candidates == 1 && self.exact.is_some()
    }
}

/// Maps printable key sequences and single special keys to values
#[derive(Debug, Clone)]
pub struct SequenceTable<T> {
    /// Printable sequences such as `dd`, `gg` or `jj`
    sequences: Vec<(Vec<Keystroke>, T)>,
    /// Special keys (Esc, arrows, ctrl chords), resolved without waiting
    special: HashMap<Keystroke, T>,
}

impl<T> Default for SequenceTable<T> {
    fn default() -> Self {
        Self {
            sequences: Vec::new(),
            special: HashMap::new(),
        }
    }
}

impl<T> SequenceTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a printable key sequence, replacing an existing binding
    pub fn bind(&mut self, sequence: &str, value: T) {
        let keys = keystrokes(sequence);
        if keys.is_empty() {
            return;
        }
        match self.sequences.iter_mut().find(|(k, _)| *k == keys) {
            Some(entry) => entry.1 = value,
            None => self.sequences.push((keys, value)),
        }
    }

    /// Bind a special key
    pub fn bind_key(&mut self, key: Keystroke, value: T) {
        self.special.insert(key, value);
    }

    pub fn lookup(&self, sequence: &[Keystroke]) -> Option<&T> {
        self.sequences
            .iter()
            .find(|(keys, _)| keys.as_slice() == sequence)
            .map(|(_, value)| value)
    }

    pub fn lookup_key(&self, key: &Keystroke) -> Option<&T> {
        self.special.get(key)
    }

    /// Match a (possibly incomplete) sequence
    pub fn match_prefix(&self, sequence: &[Keystroke]) -> SequenceMatch<'_, T> {
        let mut exact = None;
        let mut candidates = 0;
        for (keys, value) in &self.sequences {
            if keys.starts_with(sequence) {
                candidates += 1;
                if keys.len() == sequence.len() {
                    exact = Some(value);
                }
            }
        }
        SequenceMatch { exact, candidates }
    }

    pub fn len(&self) -> usize {
        self.sequences.len() + self.special.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Bindings for every mode plus the motion table used by operators
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    pub normal: SequenceTable<Binding>,
    pub visual: SequenceTable<Binding>,
    pub insert: SequenceTable<Binding>,
    pub command_line: SequenceTable<Binding>,
    /// Motions accepted after an operator (`d`, `c`, `y`)
    pub motions: SequenceTable<Motion>,
}

impl Keymap {
    /// The binding table for a mode
    pub fn table(&self, mode: Mode) -> &SequenceTable<Binding> {
        match mode {
            Mode::Normal => &self.normal,
            Mode::Visual => &self.visual,
            Mode::Insert => &self.insert,
            Mode::CommandLine => &self.command_line,
        }
    }
}
