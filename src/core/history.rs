//! Command history for slate
//!
//! Provides an in-memory, append-only command log with arrow-key style
//! navigation. History lives for the session only and is never persisted.

use tracing::debug;

/// Navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards earlier commands (Up)
    Older,
    /// Towards the live line (Down)
    Newer,
}

/// Command history storage and navigation state
#[derive(Debug, Clone, Default)]
pub struct CommandHistory {
    /// All recorded commands (newest last)
    entries: Vec<String>,
    /// Navigation cursor in `0..=entries.len()`; `entries.len()` is the live line
    cursor: usize,
    /// Text the user was composing before navigating away from the live line
    pending: String,
}

impl CommandHistory {
    /// Create an empty history
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a command to history
    ///
    /// Blank lines are not recorded. The navigation cursor is always reset
    /// to the live line.
    pub fn record(&mut self, line: &str) {
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            self.entries.push(trimmed.to_string());
        }
        self.reset_navigation();
    }

    /// Return to the live line and drop any saved edit
    pub fn reset_navigation(&mut self) {
        self.cursor = self.entries.len();
        self.pending.clear();
    }

    /// Move through history.
    ///
    /// `live_text` is the current content of the input region; it is saved
    /// when leaving the live line so it can be restored on the way back.
    /// Returns the text that should replace the input region, or `None`
    /// when the event is a no-op.
    pub fn navigate(&mut self, direction: Direction, live_text: &str) -> Option<String> {
        let len = self.entries.len();
        if len == 0 {
            return None;
        }

        match direction {
            Direction::Older => {
                if self.cursor == len {
                    self.pending = live_text.to_string();
                }
                if self.cursor == 0 {
                    return None;
                }
                self.cursor -= 1;
            }
            Direction::Newer => {
                if self.cursor == len {
                    return None;
                }
                self.cursor += 1;
                if self.cursor == len {
                    debug!("history: back to live line");
                    return Some(std::mem::take(&mut self.pending));
                }
            }
        }

        debug!(cursor = self.cursor, len, "history: navigate");
        self.entries.get(self.cursor).cloned()
    }

    /// Whether the user is currently browsing history
    #[allow(dead_code)]
    pub fn is_browsing(&self) -> bool {
        self.cursor < self.entries.len()
    }

    /// Current navigation cursor
    #[allow(dead_code)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Saved live-line text for the current excursion
    #[allow(dead_code)]
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// All entries, oldest first
    #[allow(dead_code)]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Get entry count
    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if history is empty
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_of(lines: &[&str]) -> CommandHistory {
        let mut history = CommandHistory::new();
        for line in lines {
            history.record(line);
        }
        history
    }

    #[test]
    fn test_record_skips_blank() {
        let history = history_of(&["ls", "   ", "", "  cd x  "]);
        assert_eq!(history.entries(), &["ls".to_string(), "cd x".to_string()]);
        assert_eq!(history.cursor(), 2);
    }

    #[test]
    fn test_round_trip_restores_live_text() {
        let mut history = history_of(&["ls", "cd x", "pwd"]);

        assert_eq!(history.navigate(Direction::Older, "draft"), Some("pwd".into()));
        assert_eq!(history.navigate(Direction::Older, "pwd"), Some("cd x".into()));
        assert_eq!(history.navigate(Direction::Older, "cd x"), Some("ls".into()));

        assert_eq!(history.navigate(Direction::Newer, "ls"), Some("cd x".into()));
        assert_eq!(history.navigate(Direction::Newer, "cd x"), Some("pwd".into()));
        assert_eq!(history.navigate(Direction::Newer, "pwd"), Some("draft".into()));
        assert!(!history.is_browsing());
    }

    #[test]
    fn test_older_on_empty_history_is_noop() {
        let mut history = CommandHistory::new();
        assert_eq!(history.navigate(Direction::Older, "typed"), None);
        assert_eq!(history.cursor(), 0);
        assert_eq!(history.pending(), "");
    }

    #[test]
    fn test_older_at_oldest_is_noop() {
        let mut history = history_of(&["one"]);
        assert_eq!(history.navigate(Direction::Older, ""), Some("one".into()));
        assert_eq!(history.navigate(Direction::Older, "one"), None);
        assert_eq!(history.cursor(), 0);
    }

    #[test]
    fn test_newer_on_live_line_is_noop() {
        let mut history = history_of(&["one", "two"]);
        assert_eq!(history.navigate(Direction::Newer, "typed"), None);
        assert_eq!(history.cursor(), 2);
    }

    #[test]
    fn test_pending_saved_only_when_leaving_live_line() {
        let mut history = history_of(&["a", "b"]);
        history.navigate(Direction::Older, "draft");
        // Edited history text must not overwrite the saved draft
        history.navigate(Direction::Older, "b edited");
        assert_eq!(history.pending(), "draft");
    }

    #[test]
    fn test_record_resets_cursor() {
        let mut history = history_of(&["a", "b"]);
        history.navigate(Direction::Older, "");
        history.navigate(Direction::Older, "b");
        history.record("c");
        assert_eq!(history.cursor(), 3);
        assert_eq!(history.pending(), "");
        assert_eq!(history.navigate(Direction::Older, ""), Some("c".into()));
    }
}
