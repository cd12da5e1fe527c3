//! Keystroke parser
//!
//! Turns single keystrokes into [`CommandContext`]s using the per-mode
//! tables of a [`Keymap`]. The parser is a plain state machine: it never
//! touches the session, it only looks at the mode it is told the active
//! buffer is in. The caller (the parser task, or [`crate::runtime::LocalEditor`]
//! in tests) dispatches everything in [`Step::emit`] in order, waits for
//! each completion, and feeds the same key again when [`Step::reprocess`]
//! is set.
//!
//! Resolution of a partial sequence:
//! - no candidates: abandon (normal and visual mode first retry the
//!   sequence without its last key)
//! - exactly one candidate that matches in full: dispatch
//! - otherwise wait for another key or the quiescence timeout, which
//!   dispatches the exact match if there is one

use crate::editable::Mode;
use crate::keymap::{Binding, Command, Continuation, Keymap, Keystroke};
use crate::messages::CommandContext;
use crate::motion::Motion;

/// Where the parser is in a key sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    AwaitingCommand,
    /// An ambiguous prefix is pending
    AwaitingTimeout,
    /// A command was matched and needs a motion or a character
    AwaitingContinuation(Continuation),
}

/// Input to the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(Keystroke),
    /// No key arrived within the quiescence timeout
    Timeout,
}

/// What the caller must do after one event
#[derive(Debug, Default, PartialEq)]
pub struct Step {
    /// Commands to dispatch in order, each after the previous completed
    pub emit: Vec<CommandContext>,
    /// Feed the same key again once `emit` and `replay` are done
    pub reprocess: bool,
    /// Keys typed after a resolved prefix, fed again in order once `emit`
    /// has been dispatched
    pub replay: Vec<Keystroke>,
}

impl Step {
    fn none() -> Self {
        Self::default()
    }

    fn emit(ctx: CommandContext) -> Self {
        Self {
            emit: vec![ctx],
            ..Self::default()
        }
    }

    fn reprocess(mut self) -> Self {
        self.reprocess = true;
        self
    }
}

#[derive(Debug)]
pub struct InputParser {
    keymap: Keymap,
    state: ParserState,
    /// Keys of the command sequence typed so far
    sequence: Vec<Keystroke>,
    /// Mode the pending sequence was typed in
    sequence_mode: Mode,
    count: Option<usize>,
    /// Command waiting for its continuation
    pending: Option<CommandContext>,
    /// Last key of the operator, repeated for the linewise form
    operator_key: Option<Keystroke>,
    motion_keys: Vec<Keystroke>,
    motion_count: Option<usize>,
}

impl InputParser {
    pub fn new(keymap: Keymap) -> Self {
        Self {
            keymap,
            state: ParserState::AwaitingCommand,
            sequence: Vec::new(),
            sequence_mode: Mode::Normal,
            count: None,
            pending: None,
            operator_key: None,
            motion_keys: Vec::new(),
            motion_count: None,
        }
    }

    pub fn state(&self) -> ParserState {
        self.state
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    /// Whether a partial sequence waits for the quiescence timeout
    pub fn is_pending(&self) -> bool {
        match self.state {
            ParserState::AwaitingTimeout => true,
            ParserState::AwaitingContinuation(Continuation::Motion) => {
                !self.motion_keys.is_empty()
            }
            _ => false,
        }
    }

    /// Drop any partial input
    pub fn reset(&mut self) {
        self.state = ParserState::AwaitingCommand;
        self.sequence.clear();
        self.count = None;
        self.pending = None;
        self.operator_key = None;
        self.motion_keys.clear();
        self.motion_count = None;
    }

    pub fn handle(&mut self, event: InputEvent, mode: Mode) -> Step {
        let step = match (event, self.state) {
            (InputEvent::Timeout, _) => self.on_timeout(),
            (InputEvent::Key(key), ParserState::AwaitingContinuation(Continuation::Motion)) => {
                self.on_motion_key(key)
            }
            (InputEvent::Key(key), ParserState::AwaitingContinuation(Continuation::Char)) => {
                self.on_char_key(key)
            }
            (InputEvent::Key(key), _) => self.on_key(key, mode),
        };
        tracing::debug!(
            target: "input",
            ?event,
            state = ?self.state,
            emitted = step.emit.len(),
            reprocess = step.reprocess,
            "parsed key"
        );
        step
    }

    // =========================================================================
    // Command sequences
    // =========================================================================

    fn on_key(&mut self, key: Keystroke, mode: Mode) -> Step {
        if mode == Mode::CommandLine {
            return self.on_command_line_key(key);
        }
        match key.printable() {
            Some(ch) if mode == Mode::Insert => self.on_insert_char(key, ch),
            Some(ch) => self.on_normal_char(key, ch, mode),
            None => self.on_special_key(key, mode),
        }
    }

    fn on_command_line_key(&mut self, key: Keystroke) -> Step {
        self.reset();
        if let Some(ch) = key.printable() {
            return Step::emit(CommandContext::new(Command::CommandLineChar).with_char(ch));
        }
        match self.keymap.command_line.lookup_key(&key) {
            Some(binding) => Step::emit(CommandContext::new(binding.command)),
            None => Step::none(),
        }
    }

    /// Insert mode: the character goes in right away; if the typed keys
    /// complete a binding, they are backspaced out again first
    fn on_insert_char(&mut self, key: Keystroke, ch: char) -> Step {
        let mut step = Step::emit(CommandContext::new(Command::InsertChar).with_char(ch));

        self.sequence.push(key);
        self.sequence_mode = Mode::Insert;
        let mut found = self.keymap.insert.match_prefix(&self.sequence);
        if found.candidates == 0 {
            self.sequence = vec![key];
            found = self.keymap.insert.match_prefix(&self.sequence);
        }

        if found.candidates == 0 {
            self.reset();
        } else if found.is_unique() {
            let binding = found.exact.cloned();
            if let Some(binding) = binding {
                step.emit.extend(self.compensate_and_accept(&binding));
            }
        } else {
            self.state = ParserState::AwaitingTimeout;
        }
        step
    }

    fn on_normal_char(&mut self, key: Keystroke, ch: char, mode: Mode) -> Step {
        if self.sequence.is_empty() {
            if let Some(digit) = ch.to_digit(10) {
                if digit != 0 || self.count.is_some() {
                    self.count = Some(push_digit(self.count, digit));
                    return Step::none();
                }
            }
        }

        self.sequence.push(key);
        self.sequence_mode = mode;
        let table = self.keymap.table(mode);
        let found = table.match_prefix(&self.sequence);

        if found.candidates == 0 {
            // The shorter sequence may have been a command on its own
            let shorter = &self.sequence[..self.sequence.len() - 1];
            let binding = if shorter.is_empty() {
                None
            } else {
                table.lookup(shorter).cloned()
            };
            return match binding {
                Some(binding) => {
                    self.sequence.pop();
                    self.accept(&binding).reprocess()
                }
                None => {
                    self.reset();
                    Step::none()
                }
            };
        }

        if found.is_unique() {
            let binding = found.exact.cloned();
            if let Some(binding) = binding {
                return self.accept(&binding);
            }
        }
        self.state = ParserState::AwaitingTimeout;
        Step::none()
    }

    fn on_special_key(&mut self, key: Keystroke, mode: Mode) -> Step {
        if !self.sequence.is_empty() {
            // Typed insert-mode keys are already in the buffer
            if self.sequence_mode != Mode::Insert {
                if let Some((binding, rest)) = self.split_longest_exact() {
                    let mut step = self.accept(&binding).reprocess();
                    step.replay = rest;
                    return step;
                }
            }
            self.reset();
        }

        let binding = self.keymap.table(mode).lookup_key(&key).cloned();
        match binding {
            Some(binding) => {
                self.sequence.push(key);
                self.accept(&binding)
            }
            None => {
                self.reset();
                Step::none()
            }
        }
    }

    fn on_timeout(&mut self) -> Step {
        match self.state {
            ParserState::AwaitingTimeout => {
                let insert = self.sequence_mode == Mode::Insert;
                let typed = self.sequence.len();
                match self.split_longest_exact() {
                    Some((binding, rest)) if insert => {
                        // Every typed key is in the buffer, not just the prefix
                        let mut emit: Vec<CommandContext> = (0..typed)
                            .map(|_| CommandContext::new(Command::DeleteCharBefore).silent())
                            .collect();
                        emit.extend(self.accept(&binding).emit);
                        Step {
                            emit,
                            replay: rest,
                            ..Step::default()
                        }
                    }
                    Some((binding, rest)) => Step {
                        replay: rest,
                        ..self.accept(&binding)
                    },
                    None => {
                        self.reset();
                        Step::none()
                    }
                }
            }
            ParserState::AwaitingContinuation(Continuation::Motion)
                if !self.motion_keys.is_empty() =>
            {
                match self.keymap.motions.lookup(&self.motion_keys).cloned() {
                    Some(motion) => self.complete_with_motion(motion),
                    None => {
                        self.reset();
                        Step::none()
                    }
                }
            }
            _ => Step::none(),
        }
    }

    /// Build the context for a matched binding. Bindings that need more
    /// input park the context until the continuation arrives.
    fn accept(&mut self, binding: &Binding) -> Step {
        let mut ctx = CommandContext::new(binding.command).with_count(self.count.unwrap_or(1));
        ctx.keys = keys_to_string(&self.sequence);
        ctx.motion = binding.motion.clone();

        match binding.continuation {
            Some(continuation) => {
                let operator_key = self.sequence.last().copied();
                self.reset();
                self.pending = Some(ctx);
                self.operator_key = operator_key;
                self.state = ParserState::AwaitingContinuation(continuation);
                Step::none()
            }
            None => {
                self.reset();
                Step::emit(ctx)
            }
        }
    }

    /// Cut the pending sequence down to its longest prefix that is a
    /// binding on its own. Returns the binding and the keys after it.
    fn split_longest_exact(&mut self) -> Option<(Binding, Vec<Keystroke>)> {
        let table = self.keymap.table(self.sequence_mode);
        let (len, binding) = (1..=self.sequence.len())
            .rev()
            .find_map(|len| table.lookup(&self.sequence[..len]).map(|b| (len, b.clone())))?;
        let rest = self.sequence.split_off(len);
        Some((binding, rest))
    }

    fn compensate_and_accept(&mut self, binding: &Binding) -> Vec<CommandContext> {
        let mut emit: Vec<CommandContext> = self
            .sequence
            .iter()
            .map(|_| CommandContext::new(Command::DeleteCharBefore).silent())
            .collect();
        emit.extend(self.accept(binding).emit);
        emit
    }

    // =========================================================================
    // Continuations
    // =========================================================================

    fn on_motion_key(&mut self, key: Keystroke) -> Step {
        let Some(ch) = key.printable() else {
            return self.on_motion_special_key(key);
        };

        if self.motion_keys.is_empty() {
            if let Some(digit) = ch.to_digit(10) {
                if digit != 0 || self.motion_count.is_some() {
                    self.motion_count = Some(push_digit(self.motion_count, digit));
                    return Step::none();
                }
            }
            if Some(key) == self.operator_key {
                return self.complete_linewise();
            }
        }

        self.motion_keys.push(key);
        let found = self.keymap.motions.match_prefix(&self.motion_keys);
        if found.candidates == 0 {
            self.reset();
            return Step::none();
        }
        if found.is_unique() {
            if let Some(motion) = found.exact.cloned() {
                return self.complete_with_motion(motion);
            }
        }
        Step::none()
    }

    fn on_motion_special_key(&mut self, key: Keystroke) -> Step {
        if !self.motion_keys.is_empty() {
            if let Some(motion) = self.keymap.motions.lookup(&self.motion_keys).cloned() {
                return self.complete_with_motion(motion).reprocess();
            }
        } else if let Some(motion) = self
            .keymap
            .normal
            .lookup_key(&key)
            .and_then(|binding| binding.motion.clone())
        {
            // Cursor keys work as motions too (`d<Left>`)
            self.motion_keys.push(key);
            return self.complete_with_motion(motion);
        }
        self.reset();
        Step::none().reprocess()
    }

    fn complete_with_motion(&mut self, motion: Motion) -> Step {
        let Some(mut ctx) = self.pending.take() else {
            self.reset();
            return Step::none();
        };
        ctx.count = ctx
            .count
            .saturating_mul(self.motion_count.unwrap_or(1))
            .min(MAX_COUNT);
        ctx.keys.push_str(&keys_to_string(&self.motion_keys));
        ctx.motion = Some(motion);
        self.reset();
        Step::emit(ctx)
    }

    fn complete_linewise(&mut self) -> Step {
        let Some(mut ctx) = self.pending.take() else {
            self.reset();
            return Step::none();
        };
        let Some(command) = ctx.command.linewise() else {
            self.reset();
            return Step::none();
        };
        ctx.command = command;
        ctx.count = ctx
            .count
            .saturating_mul(self.motion_count.unwrap_or(1))
            .min(MAX_COUNT);
        if let Some(key) = self.operator_key {
            ctx.keys.push_str(&key.to_string());
        }
        self.reset();
        Step::emit(ctx)
    }

    fn on_char_key(&mut self, key: Keystroke) -> Step {
        let pending = self.pending.take();
        self.reset();
        match (pending, key.printable()) {
            (Some(ctx), Some(ch)) => {
                let mut ctx = ctx.with_char(ch);
                ctx.keys.push(ch);
                Step::emit(ctx)
            }
            _ => Step::none().reprocess(),
        }
    }
}

/// Largest count a command receives; longer digit runs stop growing
pub const MAX_COUNT: usize = 999_999;

fn push_digit(count: Option<usize>, digit: u32) -> usize {
    count
        .unwrap_or(0)
        .saturating_mul(10)
        .saturating_add(digit as usize)
        .min(MAX_COUNT)
}

fn keys_to_string(keys: &[Keystroke]) -> String {
    keys.iter().map(|k| k.to_string()).collect()
}
