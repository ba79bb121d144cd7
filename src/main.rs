//! slate - A small shell emulator with guarded line editing
//!
//! slate shows a prompt, reads commands, tokenizes them and hands them to
//! a command dispatcher. Output already on screen is immutable: editing is
//! confined to the text after the last prompt.
//!
//! # Features
//!
//! - **Guarded input region**: Backspace, arrows and Home never leave the live line
//! - **Command History**: Up/Down replay earlier commands, the draft is restored
//! - **Startup Script**: Commands replayed at launch through the same path as typing
//! - **Quoting**: `"..."` and `'...'` group words into one argument
//!
//! # Quick Start
//!
//! ```text
//! slate --vfs-path /tmp/vfs --startup-script ./startup.sh
//! ```
//!
//! # Keybindings
//!
//! | Key | Action |
//! |-----|--------|
//! | Enter | Run the current line |
//! | Up/Down | Navigate history |
//! | Home | Start of input |
//! | Ctrl+A | Select the current input |
//! | Ctrl+Shift+C | Copy selection |

mod config;
mod core;
mod ui;

use std::path::PathBuf;

use anyhow::anyhow;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::{ColorScheme, Config as SlateConfig};
use crate::core::{
    EditKey, Identity, LaunchParams, ScriptOutcome, Session, SessionEvent, StubDispatcher,
    TextSurface,
};
use crate::ui::{KeyMapper, Renderer};

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "slate", version, about = "A small shell emulator with guarded line editing")]
struct Cli {
    /// Path to the virtual filesystem root
    #[arg(long)]
    vfs_path: Option<String>,

    /// Path to the startup script
    #[arg(long)]
    startup_script: Option<String>,

    /// Config file (default: ~/.slate/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Merge command line and config file; the command line wins
fn resolve_params(cli: &Cli, config: &SlateConfig) -> anyhow::Result<LaunchParams> {
    let vfs_path = cli
        .vfs_path
        .clone()
        .or_else(|| config.vfs_path.clone())
        .ok_or_else(|| anyhow!("missing --vfs-path"))?;
    let startup_script = cli
        .startup_script
        .clone()
        .or_else(|| config.startup_script.clone())
        .ok_or_else(|| anyhow!("missing --startup-script"))?;
    Ok(LaunchParams {
        vfs_path,
        startup_script,
    })
}

/// Initialize logging to `~/.slate/slate.log`
fn init_logging() {
    let log_path = config::config_dir()
        .map(|dir| dir.join("slate.log"))
        .unwrap_or_else(|| PathBuf::from("slate.log"));

    // Create log directory if needed
    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .ok();

    if let Some(file) = log_file {
        let filter = EnvFilter::try_from_env("SLATE_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = SlateConfig::load(cli.config.as_deref());
    let params = match resolve_params(&cli, &config) {
        Ok(params) => params,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information");
            std::process::exit(2);
        }
    };

    eprintln!("Debug parameters:");
    for line in params.dump_lines() {
        eprintln!("{}", line);
        info!("{}", line);
    }

    if !ColorScheme::list().contains(&config.color_scheme.as_str()) {
        warn!("Unknown color scheme '{}', using default", config.color_scheme);
    }

    let identity = Identity::detect();
    info!("slate starting as {}", identity.label());

    let script = PathBuf::from(&params.startup_script);
    let (mut session, outcome) = Session::start(
        TextSurface::new(),
        StubDispatcher::new(params),
        identity.prompt(),
        &script,
    );
    if let ScriptOutcome::Terminated { line } = outcome {
        info!("Startup script requested exit at line {}", line);
        return Ok(());
    }

    let mut renderer = Renderer::new(config.get_color_scheme());
    renderer.init(&format!("Slate - [{}]", identity.label()))?;

    let result = run_main_loop(&mut session, &mut renderer);

    let _ = renderer.cleanup();
    result
}

/// Main event loop
fn run_main_loop(
    session: &mut Session<TextSurface, StubDispatcher>,
    renderer: &mut Renderer,
) -> anyhow::Result<()> {
    let mut clipboard: Option<arboard::Clipboard> = None;
    renderer.render(session.surface())?;

    loop {
        let key = match event::read()? {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => KeyMapper::map(&key_event),
            Event::Mouse(mouse_event) => KeyMapper::map_mouse(&mouse_event, renderer),
            Event::Paste(text) => Some(EditKey::Paste(text)),
            Event::Resize(..) => {
                renderer.render(session.surface())?;
                continue;
            }
            _ => None,
        };
        let Some(key) = key else {
            continue;
        };

        match session.handle_key(&key) {
            SessionEvent::Continue => {}
            SessionEvent::Copy(text) => copy_to_clipboard(&mut clipboard, text),
            SessionEvent::Terminate => {
                info!("Session ended");
                break;
            }
        }

        renderer.render(session.surface())?;
    }

    Ok(())
}

/// Put text on the system clipboard, opening it on first use
fn copy_to_clipboard(clipboard: &mut Option<arboard::Clipboard>, text: String) {
    if clipboard.is_none() {
        match arboard::Clipboard::new() {
            Ok(cb) => *clipboard = Some(cb),
            Err(e) => {
                warn!("Clipboard unavailable: {}", e);
                return;
            }
        }
    }
    if let Some(cb) = clipboard.as_mut() {
        if let Err(e) = cb.set_text(text) {
            warn!("Failed to copy to clipboard: {}", e);
        }
    }
}
