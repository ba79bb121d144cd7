//! Command dispatch
//!
//! The session hands every parsed command to a [`CommandDispatcher`].
//! [`StubDispatcher`] provides the built-in placeholder commands.

use tracing::debug;

/// Result of running one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchResult {
    /// Text to print (may be empty)
    Output(String),
    /// No command with this name exists
    NotFound(String),
    /// The session should end
    Terminate,
}

impl DispatchResult {
    /// Text shown on the surface for this result
    pub fn display_text(&self) -> String {
        match self {
            DispatchResult::Output(text) => text.clone(),
            DispatchResult::NotFound(name) => format!("{}: command not found", name),
            DispatchResult::Terminate => String::new(),
        }
    }
}

/// Executes commands on behalf of the session
pub trait CommandDispatcher {
    fn dispatch(&mut self, name: &str, args: &[String]) -> DispatchResult;
}

/// Parameters the emulator was started with
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchParams {
    /// Root of the virtual filesystem
    pub vfs_path: String,
    /// Script replayed at startup
    pub startup_script: String,
}

impl LaunchParams {
    /// `key = value` lines, as printed by `conf-dump`
    pub fn dump_lines(&self) -> [String; 2] {
        [
            format!("vfs_path = {}", self.vfs_path),
            format!("startup_script = {}", self.startup_script),
        ]
    }
}

/// Placeholder command set
#[derive(Debug, Clone)]
pub struct StubDispatcher {
    params: LaunchParams,
}

impl StubDispatcher {
    pub fn new(params: LaunchParams) -> Self {
        Self { params }
    }
}

impl CommandDispatcher for StubDispatcher {
    fn dispatch(&mut self, name: &str, args: &[String]) -> DispatchResult {
        debug!(name, ?args, "dispatch");
        match name {
            "" => DispatchResult::Output(String::new()),
            "conf-dump" => DispatchResult::Output(self.params.dump_lines().join("\n")),
            "ls" | "cd" => DispatchResult::Output(format!("{}: {}", name, args.join(" "))),
            "exit" => DispatchResult::Terminate,
            _ => DispatchResult::NotFound(name.to_string()),
        }
    }
}
