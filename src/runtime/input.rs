//! Keyboard input
//!
//! The input task blocks on a [`KeySource`] on tokio's blocking pool and
//! forwards every keystroke to the parser queue. The force-exit key cancels
//! the session directly, without going through the parser.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::keymap::{keystroke_from_crossterm, KeyCode, Keystroke};

/// How long one poll waits before checking for cancellation
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// The key that ends the session immediately
pub const FORCE_EXIT: Keystroke = Keystroke::key(KeyCode::F(1));

/// Somewhere keystrokes come from
pub trait KeySource: Send {
    /// Wait up to `wait` for the next key. `Ok(None)` when none arrived.
    fn next_key(&mut self, wait: Duration) -> io::Result<Option<Keystroke>>;
}

/// The terminal, read through crossterm
#[derive(Debug, Clone, Copy, Default)]
pub struct CrosstermKeys;

impl KeySource for CrosstermKeys {
    fn next_key(&mut self, wait: Duration) -> io::Result<Option<Keystroke>> {
        if !event::poll(wait)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) => Ok(keystroke_from_crossterm(&key)),
            _ => Ok(None),
        }
    }
}

/// A fixed list of keys, then silence
#[derive(Debug, Clone, Default)]
pub struct ScriptedKeys {
    keys: VecDeque<Keystroke>,
}

impl ScriptedKeys {
    pub fn new(keys: impl IntoIterator<Item = Keystroke>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }
}

impl KeySource for ScriptedKeys {
    fn next_key(&mut self, wait: Duration) -> io::Result<Option<Keystroke>> {
        match self.keys.pop_front() {
            Some(key) => Ok(Some(key)),
            None => {
                std::thread::sleep(wait);
                Ok(None)
            }
        }
    }
}

/// Run `source` on the blocking pool until the session is cancelled or the
/// parser goes away
pub fn spawn_input<S>(
    mut source: S,
    keys: mpsc::Sender<Keystroke>,
    cancel: CancellationToken,
) -> JoinHandle<()>
where
    S: KeySource + 'static,
{
    tokio::task::spawn_blocking(move || {
        while !cancel.is_cancelled() {
            let key = match source.next_key(POLL_INTERVAL) {
                Ok(Some(key)) => key,
                Ok(None) => continue,
                Err(err) => {
                    error!(target: "input", "Reading keys failed: {}", err);
                    cancel.cancel();
                    break;
                }
            };
            if key == FORCE_EXIT {
                debug!(target: "input", "Force exit");
                cancel.cancel();
                break;
            }
            if keys.blocking_send(key).is_err() {
                break;
            }
        }
    })
}
