//! Session engine
//!
//! Owns the surface, the input guard and the command history. Every
//! submitted line, whether typed or replayed from the startup script, goes
//! through the same tokenize → dispatch → print → prompt cycle.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use super::dispatcher::{CommandDispatcher, DispatchResult};
use super::guard::{EditKey, GuardOutcome, InputGuard};
use super::history::CommandHistory;
use super::surface::{Style, Surface};
use super::tokenizer::CommandLine;

/// Startup script errors
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("{path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Session events returned to the host loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Keep running
    Continue,
    /// Place this text on the clipboard
    Copy(String),
    /// The session asked to end
    Terminate,
}

/// How startup script replay ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptOutcome {
    /// Every line ran; `executed` counts non-blank lines
    Completed { executed: usize },
    /// Replay stopped on a parse error or unknown command at `line` (1-based)
    Halted { line: usize },
    /// A command at `line` ended the session
    Terminated { line: usize },
    /// The script could not be read
    Unreadable,
}

/// Mutable editing state owned by the session
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub guard: InputGuard,
    pub history: CommandHistory,
}

/// A shell session
pub struct Session<S: Surface, D: CommandDispatcher> {
    surface: S,
    dispatcher: D,
    prompt: String,
    state: SessionState,
    exit_requested: bool,
}

impl<S: Surface, D: CommandDispatcher> Session<S, D> {
    /// Create a session and print the first prompt
    pub fn new(mut surface: S, dispatcher: D, prompt: impl Into<String>) -> Self {
        let prompt = prompt.into();
        surface.append(&prompt, Style::Prompt);

        let mut state = SessionState::default();
        state.guard.advance_to_end(&surface);

        Self {
            surface,
            dispatcher,
            prompt,
            state,
            exit_requested: false,
        }
    }

    /// Create a session and replay `script` before accepting input
    pub fn start(
        surface: S,
        dispatcher: D,
        prompt: impl Into<String>,
        script: &Path,
    ) -> (Self, ScriptOutcome) {
        let mut session = Self::new(surface, dispatcher, prompt);
        let outcome = session.run_startup_script(script);
        (session, outcome)
    }

    /// Read and replay the startup script at `path`
    pub fn run_startup_script(&mut self, path: &Path) -> ScriptOutcome {
        match read_script(path) {
            Ok(lines) => self.replay_script(lines),
            Err(e) => {
                warn!("startup script unreadable: {}", e);
                self.show_error(&format!("Startup script error: {}", e));
                self.state.guard.advance_to_end(&self.surface);
                ScriptOutcome::Unreadable
            }
        }
    }

    /// Replay script lines as if typed. Stops at the first parse error or
    /// unknown command. Interactive input starts at the end of whatever
    /// was printed.
    pub fn replay_script<I, L>(&mut self, lines: I) -> ScriptOutcome
    where
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
    {
        let mut executed = 0;
        let mut outcome = None;

        for (index, raw) in lines.into_iter().enumerate() {
            let line_number = index + 1;
            let line = raw.as_ref().trim();
            if line.is_empty() {
                continue;
            }

            self.surface.append(line, Style::Input);
            self.surface.append("\n", Style::Input);

            let command = match CommandLine::parse(line) {
                Ok(command) => command,
                Err(e) => {
                    self.show_error(&format!("Line {}: {}", line_number, e));
                    outcome = Some(ScriptOutcome::Halted { line: line_number });
                    break;
                }
            };

            let result = self.dispatcher.dispatch(&command.name, &command.args);
            executed += 1;

            if let DispatchResult::NotFound(name) = &result {
                if !name.is_empty() {
                    self.show_error(&format!("Line {}: command \"{}\" not found", line_number, name));
                    outcome = Some(ScriptOutcome::Halted { line: line_number });
                    break;
                }
            }

            self.surface.append(&result.display_text(), Style::Output);
            self.surface.append("\n", Style::Output);
            self.surface.append(&self.prompt, Style::Prompt);

            if result == DispatchResult::Terminate {
                self.exit_requested = true;
                outcome = Some(ScriptOutcome::Terminated { line: line_number });
                break;
            }
        }

        self.surface.move_to_end();
        self.state.guard.advance_to_end(&self.surface);

        let outcome = outcome.unwrap_or(ScriptOutcome::Completed { executed });
        info!(?outcome, "startup script replayed");
        outcome
    }

    /// Handle one editing key
    pub fn handle_key(&mut self, key: &EditKey) -> SessionEvent {
        match self.state.guard.apply(&mut self.surface, key) {
            GuardOutcome::Handled => SessionEvent::Continue,
            GuardOutcome::Submit => self.submit(),
            GuardOutcome::Copy => match self.surface.selected_text() {
                Some(text) if !text.is_empty() => SessionEvent::Copy(text),
                _ => SessionEvent::Continue,
            },
            GuardOutcome::Navigate(direction) => {
                let live = self.state.guard.live_text(&self.surface);
                if let Some(text) = self.state.history.navigate(direction, &live) {
                    self.state.guard.replace_live_line(&mut self.surface, &text);
                }
                SessionEvent::Continue
            }
        }
    }

    /// Submit the live line
    pub fn submit(&mut self) -> SessionEvent {
        let text = self
            .state
            .guard
            .live_text(&self.surface)
            .replace('\u{2029}', "\n");
        let text = text.trim();

        let mut event = SessionEvent::Continue;

        if !text.is_empty() {
            debug!(line = text, "submit");
            self.state.history.record(text);

            match CommandLine::parse(text) {
                Ok(command) => {
                    let result = self.dispatcher.dispatch(&command.name, &command.args);
                    self.surface.append("\n", Style::Output);
                    self.surface.append(&result.display_text(), Style::Output);

                    if result == DispatchResult::Terminate {
                        info!("exit requested");
                        self.exit_requested = true;
                        event = SessionEvent::Terminate;
                    }
                }
                Err(e) => {
                    self.show_error(&e.to_string());
                    self.surface.append("\n", Style::Output);
                }
            }
        }

        self.state.history.reset_navigation();
        self.emit_prompt();
        event
    }

    fn emit_prompt(&mut self) {
        self.surface.append("\n", Style::Output);
        self.surface.append(&self.prompt, Style::Prompt);
        self.state.guard.advance_to_end(&self.surface);
    }

    fn show_error(&mut self, message: &str) {
        self.surface.append(&format!("\nError: {}", message), Style::Error);
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[allow(dead_code)]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[allow(dead_code)]
    pub fn history(&self) -> &CommandHistory {
        &self.state.history
    }

    /// First editable offset
    #[allow(dead_code)]
    pub fn boundary(&self) -> usize {
        self.state.guard.boundary()
    }

    /// Text of the live input region
    #[allow(dead_code)]
    pub fn live_text(&self) -> String {
        self.state.guard.live_text(&self.surface)
    }

    /// Whether a command (typed or scripted) ended the session
    #[allow(dead_code)]
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }
}

fn read_script(path: &Path) -> Result<Vec<String>, ScriptError> {
    let content = fs::read_to_string(path).map_err(|source| ScriptError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(content.lines().map(str::to_string).collect())
}
