use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::info;

use quill::cli::CliArgs;
use quill::config_paths::ConfigPaths;
use quill::hooks::HookRegistry;
use quill::keymap::default_keymap;
use quill::runtime::{self, spawn_input, CrosstermKeys};
use quill::storage::FsStorage;
use quill::view::TerminalRenderer;
use quill::{Dispatcher, EditorConfig, EditorSession};

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    if args.print_log_path {
        match ConfigPaths::discover().and_then(|paths| paths.latest_log()) {
            Some(path) => println!("{}", path.display()),
            None => eprintln!("No log file yet"),
        }
        return Ok(());
    }

    quill::tracing::init(args.log_level.as_deref());
    install_panic_hook();

    let config = match &args.config {
        Some(path) => EditorConfig::load_from(path),
        None => EditorConfig::load(),
    };
    let keymap = default_keymap(&config.insert_escape);
    let hooks = HookRegistry::with_defaults().context("Failed to build filetype hooks")?;

    let storage = FsStorage;
    let mut session = EditorSession::new(config.clone());
    if let Some(path) = &args.path {
        session.open(path, &storage);
    }

    let renderer =
        TerminalRenderer::enter(config.tab_stop).context("Failed to set up the terminal")?;
    let dispatcher = Dispatcher::new(session, Box::new(renderer), Box::new(storage), hooks);

    let cancel = CancellationToken::new();
    let handle = runtime::spawn(dispatcher, keymap, cancel.clone());
    let input = spawn_input(CrosstermKeys, handle.keys.clone(), cancel.clone());
    info!("Editor started");

    cancel.cancelled().await;
    let dispatcher = handle.join().await.context("Editor task failed")?;
    input.await.context("Input task failed")?;

    // Dropping the renderer restores the terminal
    drop(dispatcher);
    info!("Editor stopped");
    Ok(())
}

/// Leave raw mode before the panic message is printed
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );
        tracing::error!("Panic: {}", panic_info);
        default_hook(panic_info);
    }));
}
