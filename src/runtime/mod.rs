//! Runtime module - the tasks that drive a session
//!
//! Three tokio tasks joined by bounded queues:
//! - `input`: reads keys from a [`KeySource`] (see [`input::spawn_input`])
//! - parser: turns keys into commands with the [`InputParser`]
//! - dispatcher: the only task that touches the [`EditorSession`]
//!
//! The parser sends each command with a oneshot sender and waits for the
//! [`Completion`] before it looks at the next key, so it always knows the
//! mode the key has to be read in.
//!
//! [`EditorSession`]: crate::model::EditorSession

pub mod input;
pub mod local;

pub use input::{spawn_input, CrosstermKeys, KeySource, ScriptedKeys};
pub use local::LocalEditor;

use std::collections::VecDeque;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::{JoinError, JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::editable::Mode;
use crate::error::EditorError;
use crate::input::{InputEvent, InputParser};
use crate::keymap::{Keymap, Keystroke};
use crate::messages::{CommandContext, Completion};
use crate::update::Dispatcher;

/// A command on its way to the dispatcher
#[derive(Debug)]
pub struct Request {
    pub ctx: CommandContext,
    pub done: oneshot::Sender<Completion>,
}

/// Handles to a running session
#[derive(Debug)]
pub struct EditorHandle {
    /// Keys for the parser
    pub keys: mpsc::Sender<Keystroke>,
    pub cancel: CancellationToken,
    parser: JoinHandle<()>,
    dispatcher: JoinHandle<Dispatcher>,
}

impl EditorHandle {
    /// Close the key queue, let queued work finish and return the dispatcher
    pub async fn join(self) -> Result<Dispatcher, JoinError> {
        drop(self.keys);
        self.parser.await?;
        self.dispatcher.await
    }
}

/// Start the parser and dispatcher tasks for `dispatcher`'s session
pub fn spawn(dispatcher: Dispatcher, keymap: Keymap, cancel: CancellationToken) -> EditorHandle {
    let config = &dispatcher.session().config;
    let capacity = config.queue_capacity.max(1);
    let timeout = Duration::from_millis(config.keypress_timeout_ms);
    let mode = dispatcher.mode();

    let (keys_tx, keys_rx) = mpsc::channel(capacity);
    let (commands_tx, commands_rx) = mpsc::channel(capacity);

    let parser = tokio::spawn(parse_keys(
        InputParser::new(keymap),
        mode,
        keys_rx,
        commands_tx,
        timeout,
        cancel.clone(),
    ));
    let dispatcher = tokio::spawn(execute_commands(dispatcher, commands_rx, cancel.clone()));

    EditorHandle {
        keys: keys_tx,
        cancel,
        parser,
        dispatcher,
    }
}

// =============================================================================
// Parser task
// =============================================================================

async fn parse_keys(
    mut parser: InputParser,
    mut mode: Mode,
    mut keys: mpsc::Receiver<Keystroke>,
    commands: mpsc::Sender<Request>,
    timeout: Duration,
    cancel: CancellationToken,
) {
    loop {
        let event = if parser.is_pending() {
            tokio::select! {
                _ = cancel.cancelled() => break,
                key = tokio::time::timeout(timeout, keys.recv()) => match key {
                    Ok(Some(key)) => InputEvent::Key(key),
                    Ok(None) => break,
                    Err(_) => InputEvent::Timeout,
                },
            }
        } else {
            tokio::select! {
                _ = cancel.cancelled() => break,
                key = keys.recv() => match key {
                    Some(key) => InputEvent::Key(key),
                    None => break,
                },
            }
        };

        // Events still to parse; replayed keys go ahead of a reprocessed one
        let mut events = VecDeque::from([event]);
        while let Some(event) = events.pop_front() {
            let step = parser.handle(event, mode);
            for ctx in step.emit {
                let Some(completion) = submit(&commands, ctx).await else {
                    debug!(target: "input", "Dispatcher is gone");
                    return;
                };
                mode = completion.mode;
            }
            let mut next: Vec<InputEvent> =
                step.replay.into_iter().map(InputEvent::Key).collect();
            if step.reprocess {
                next.push(event);
            }
            for event in next.into_iter().rev() {
                events.push_front(event);
            }
        }
    }
    debug!(target: "input", "Parser stopped");
}

/// Queue one command and wait until it has run
async fn submit(commands: &mpsc::Sender<Request>, ctx: CommandContext) -> Option<Completion> {
    let (done, reply) = oneshot::channel();
    commands.send(Request { ctx, done }).await.ok()?;
    reply.await.ok()
}

// =============================================================================
// Dispatcher task
// =============================================================================

async fn execute_commands(
    mut dispatcher: Dispatcher,
    mut commands: mpsc::Receiver<Request>,
    cancel: CancellationToken,
) -> Dispatcher {
    dispatcher.render();
    loop {
        let Request { ctx, done } = tokio::select! {
            _ = cancel.cancelled() => break,
            request = commands.recv() => match request {
                Some(request) => request,
                None => break,
            },
        };

        let command = ctx.command;
        match std::panic::catch_unwind(AssertUnwindSafe(|| dispatcher.dispatch(ctx))) {
            Ok(Ok(completion)) => {
                let quit = completion.quit;
                // The parser may have stopped waiting
                let _ = done.send(completion);
                if quit {
                    info!(target: "dispatch", "Session ended");
                    cancel.cancel();
                    break;
                }
            }
            Ok(Err(err)) => {
                error!(target: "dispatch", ?command, "Command failed: {}", err);
                cancel.cancel();
                break;
            }
            Err(panic) => {
                let err = EditorError::Panic(panic_message(panic.as_ref()));
                error!(target: "dispatch", ?command, "{}", err);
                cancel.cancel();
                break;
            }
        }
    }
    dispatcher
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
