//! Synchronous driver for a session, without tasks or queues
//!
//! Feeds keys through an [`InputParser`] and executes what it emits on a
//! [`Dispatcher`], exactly as the parser and dispatcher tasks would. Used by
//! tests and benchmarks.

use crate::config::EditorConfig;
use crate::editable::Mode;
use crate::error::EditorError;
use crate::hooks::HookRegistry;
use crate::input::{InputEvent, InputParser};
use crate::keymap::{default_keymap, KeyCode, Keymap, Keystroke};
use crate::model::EditorSession;
use crate::storage::MemoryStorage;
use crate::update::Dispatcher;
use crate::view::NullRenderer;

pub struct LocalEditor {
    parser: InputParser,
    dispatcher: Dispatcher,
}

impl LocalEditor {
    pub fn new(dispatcher: Dispatcher, keymap: Keymap) -> Self {
        Self {
            parser: InputParser::new(keymap),
            dispatcher,
        }
    }

    /// A scratch session holding `text`, with in-memory storage and no
    /// filetype hooks
    pub fn with_text(text: &str) -> Self {
        let config = EditorConfig::default();
        let keymap = default_keymap(&config.insert_escape);
        let dispatcher = Dispatcher::new(
            EditorSession::with_text(config, text),
            Box::new(NullRenderer),
            Box::new(MemoryStorage::new()),
            HookRegistry::new(),
        );
        Self::new(dispatcher, keymap)
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher {
        &mut self.dispatcher
    }

    pub fn parser(&self) -> &InputParser {
        &self.parser
    }

    pub fn key(&mut self, key: Keystroke) -> Result<(), EditorError> {
        self.feed(InputEvent::Key(key))
    }

    /// Type a string of keys. `\n` is Enter and `\x1b` is Escape.
    pub fn keys(&mut self, sequence: &str) -> Result<(), EditorError> {
        for ch in sequence.chars() {
            let key = match ch {
                '\n' => Keystroke::key(KeyCode::Enter),
                '\x1b' => Keystroke::key(KeyCode::Escape),
                '\t' => Keystroke::key(KeyCode::Tab),
                ch => Keystroke::char(ch),
            };
            self.key(key)?;
        }
        Ok(())
    }

    /// Let the quiescence timeout fire
    pub fn timeout(&mut self) -> Result<(), EditorError> {
        self.feed(InputEvent::Timeout)
    }

    fn feed(&mut self, event: InputEvent) -> Result<(), EditorError> {
        loop {
            let step = self.parser.handle(event, self.dispatcher.mode());
            for ctx in step.emit {
                self.dispatcher.dispatch(ctx)?;
            }
            for key in step.replay {
                self.feed(InputEvent::Key(key))?;
            }
            if !step.reprocess {
                return Ok(());
            }
        }
    }

    // === Inspection ===

    pub fn text(&self) -> String {
        self.dispatcher
            .session()
            .active()
            .map(|b| b.text.to_string())
            .unwrap_or_default()
    }

    /// Cursor as (line, column)
    pub fn cursor(&self) -> (usize, usize) {
        self.dispatcher
            .session()
            .active()
            .map(|b| (b.cursor.line, b.cursor.column))
            .unwrap_or_default()
    }

    pub fn mode(&self) -> Mode {
        self.dispatcher.mode()
    }

    pub fn status(&self) -> &str {
        &self.dispatcher.session().status
    }
}
