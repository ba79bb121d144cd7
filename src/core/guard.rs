//! Input region guard
//!
//! Everything before the input boundary is immutable history. The guard
//! interprets editing keys against a [`Surface`] so that deletion and
//! cursor movement never cross into that region, and so that stray typing
//! outside it lands at the end of the live line instead.

use std::ops::Range;

use super::history::Direction;
use super::surface::Surface;

/// Abstract editing key, decoupled from any terminal backend
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditKey {
    Char(char),
    Paste(String),
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Enter,
    SelectAll,
    Copy,
    /// Place the cursor at an absolute offset (mouse click)
    MoveTo(usize),
}

/// What the session must do after the guard has seen a key
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Key fully handled against the surface (possibly as a no-op)
    Handled,
    /// Submit the live line
    Submit,
    /// Replay history into the live line
    Navigate(Direction),
    /// Copy the current selection to the clipboard
    Copy,
}

/// Tracks the input boundary and enforces edits against it
#[derive(Debug, Clone, Default)]
pub struct InputGuard {
    boundary: usize,
}

impl InputGuard {
    /// First editable offset
    pub fn boundary(&self) -> usize {
        self.boundary
    }

    /// Move the boundary to the surface end. Only called when a new
    /// prompt has been emitted; the boundary never moves backwards.
    pub fn advance_to_end<S: Surface + ?Sized>(&mut self, surface: &S) {
        let end = surface.end();
        debug_assert!(end >= self.boundary, "input boundary must not move backwards");
        self.boundary = self.boundary.max(end);
    }

    /// The live input region `[boundary, end)`
    pub fn live_range<S: Surface + ?Sized>(&self, surface: &S) -> Range<usize> {
        self.boundary.min(surface.end())..surface.end()
    }

    /// Text currently in the live input region
    pub fn live_text<S: Surface + ?Sized>(&self, surface: &S) -> String {
        surface.text_range(self.live_range(surface))
    }

    /// Replace the whole live region with `text`, cursor at the new end
    pub fn replace_live_line<S: Surface + ?Sized>(&self, surface: &mut S, text: &str) {
        let range = self.live_range(surface);
        surface.delete_range(range);
        surface.move_to_end();
        surface.insert(text);
        surface.move_to_end();
    }

    /// Apply `key` to the surface
    pub fn apply<S: Surface + ?Sized>(&self, surface: &mut S, key: &EditKey) -> GuardOutcome {
        let b = self.boundary;
        let p = surface.cursor();

        match key {
            EditKey::Up => return GuardOutcome::Navigate(Direction::Older),
            EditKey::Down => return GuardOutcome::Navigate(Direction::Newer),
            EditKey::Enter => return GuardOutcome::Submit,
            EditKey::Copy => return GuardOutcome::Copy,

            EditKey::SelectAll => surface.select(self.live_range(surface)),
            EditKey::Home => surface.move_to(b),
            EditKey::End => surface.move_to_end(),
            EditKey::MoveTo(pos) => surface.move_to(*pos),

            EditKey::Left => {
                if p <= b {
                    surface.move_to(b);
                } else {
                    surface.move_to(p - 1);
                }
            }
            EditKey::Right => {
                if p <= b {
                    surface.move_to_end();
                } else {
                    surface.move_to(p + 1);
                }
            }

            EditKey::Backspace => {
                if !self.delete_selection(surface) {
                    if p <= b {
                        surface.move_to(b);
                    } else {
                        surface.delete_range(p - 1..p);
                    }
                }
            }
            EditKey::Delete => {
                if !self.delete_selection(surface) && p > b {
                    surface.delete_range(p..p + 1);
                }
            }

            EditKey::Char(ch) => {
                let mut buf = [0u8; 4];
                self.insert_text(surface, ch.encode_utf8(&mut buf));
            }
            EditKey::Paste(text) => {
                let text = text.replace("\r\n", "\n").replace('\r', "\n");
                self.insert_text(surface, &text);
            }
        }

        GuardOutcome::Handled
    }

    fn insert_text<S: Surface + ?Sized>(&self, surface: &mut S, text: &str) {
        if surface.cursor() <= self.boundary {
            surface.move_to_end();
        }
        self.delete_selection(surface);
        surface.insert(text);
    }

    /// Delete the part of the selection inside the live region.
    /// Returns true if a selection existed.
    fn delete_selection<S: Surface + ?Sized>(&self, surface: &mut S) -> bool {
        let Some(selection) = surface.selection() else {
            return false;
        };
        let start = selection.start.max(self.boundary);
        if start < selection.end {
            surface.delete_range(start..selection.end);
        } else {
            surface.move_to_end();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::surface::{Style, TextSurface};

    const PROMPT: &str = "old output\nme@host $ ";

    fn setup(live: &str) -> (TextSurface, InputGuard) {
        let mut surface = TextSurface::new();
        surface.append(PROMPT, Style::Prompt);
        let mut guard = InputGuard::default();
        guard.advance_to_end(&surface);
        surface.insert(live);
        (surface, guard)
    }

    #[test]
    fn test_backspace_at_boundary_is_noop() {
        let (mut surface, guard) = setup("ls");
        surface.move_to(guard.boundary());
        for _ in 0..5 {
            assert_eq!(guard.apply(&mut surface, &EditKey::Backspace), GuardOutcome::Handled);
            assert_eq!(guard.live_text(&surface), "ls");
            assert_eq!(surface.cursor(), guard.boundary());
        }
        assert_eq!(surface.text(), format!("{PROMPT}ls"));
    }

    #[test]
    fn test_backspace_inside_region() {
        let (mut surface, guard) = setup("lsx");
        guard.apply(&mut surface, &EditKey::Backspace);
        assert_eq!(guard.live_text(&surface), "ls");
        for _ in 0..10 {
            guard.apply(&mut surface, &EditKey::Backspace);
        }
        assert_eq!(guard.live_text(&surface), "");
        assert_eq!(surface.text(), PROMPT);
    }

    #[test]
    fn test_backspace_in_history_snaps_to_boundary() {
        let (mut surface, guard) = setup("ls");
        surface.move_to(3);
        guard.apply(&mut surface, &EditKey::Backspace);
        assert_eq!(surface.cursor(), guard.boundary());
        assert_eq!(surface.text(), format!("{PROMPT}ls"));
    }

    #[test]
    fn test_left_and_home_stop_at_boundary() {
        let (mut surface, guard) = setup("ab");
        guard.apply(&mut surface, &EditKey::Left);
        guard.apply(&mut surface, &EditKey::Left);
        guard.apply(&mut surface, &EditKey::Left);
        assert_eq!(surface.cursor(), guard.boundary());

        guard.apply(&mut surface, &EditKey::End);
        guard.apply(&mut surface, &EditKey::Home);
        assert_eq!(surface.cursor(), guard.boundary());

        surface.move_to(0);
        guard.apply(&mut surface, &EditKey::Left);
        assert_eq!(surface.cursor(), guard.boundary());
    }

    #[test]
    fn test_typing_in_history_moves_to_end() {
        let (mut surface, guard) = setup("ls");
        surface.move_to(2);
        guard.apply(&mut surface, &EditKey::Char('x'));
        assert_eq!(surface.text(), format!("{PROMPT}lsx"));
        assert_eq!(surface.cursor(), surface.end());
    }

    #[test]
    fn test_typing_at_boundary_moves_to_end() {
        let (mut surface, guard) = setup("s");
        guard.apply(&mut surface, &EditKey::Home);
        guard.apply(&mut surface, &EditKey::Char('l'));
        assert_eq!(guard.live_text(&surface), "sl");
        assert_eq!(surface.cursor(), surface.end());

        guard.apply(&mut surface, &EditKey::Home);
        guard.apply(&mut surface, &EditKey::Paste("x".into()));
        assert_eq!(guard.live_text(&surface), "slx");
    }

    #[test]
    fn test_right_at_boundary_moves_to_end() {
        let (mut surface, guard) = setup("abc");
        guard.apply(&mut surface, &EditKey::Home);
        guard.apply(&mut surface, &EditKey::Right);
        assert_eq!(surface.cursor(), surface.end());

        guard.apply(&mut surface, &EditKey::Left);
        guard.apply(&mut surface, &EditKey::Right);
        assert_eq!(surface.cursor(), surface.end());
    }

    #[test]
    fn test_select_all_covers_live_region_only() {
        let (mut surface, guard) = setup("echo hi");
        surface.move_to(0);
        guard.apply(&mut surface, &EditKey::SelectAll);
        assert_eq!(surface.selected_text().as_deref(), Some("echo hi"));

        guard.apply(&mut surface, &EditKey::Backspace);
        assert_eq!(surface.text(), PROMPT);
    }

    #[test]
    fn test_typing_replaces_selection() {
        let (mut surface, guard) = setup("old");
        guard.apply(&mut surface, &EditKey::SelectAll);
        guard.apply(&mut surface, &EditKey::Char('n'));
        assert_eq!(guard.live_text(&surface), "n");
    }

    #[test]
    fn test_delete_at_or_before_boundary_is_noop() {
        let (mut surface, guard) = setup("ls");
        guard.apply(&mut surface, &EditKey::Home);
        guard.apply(&mut surface, &EditKey::Delete);
        assert_eq!(guard.live_text(&surface), "ls");
        assert_eq!(surface.cursor(), guard.boundary());

        surface.move_to(1);
        guard.apply(&mut surface, &EditKey::Delete);
        assert_eq!(surface.text(), format!("{PROMPT}ls"));
        assert_eq!(surface.cursor(), 1);
    }

    #[test]
    fn test_delete_forward_inside_region() {
        let (mut surface, guard) = setup("abc");
        guard.apply(&mut surface, &EditKey::Left);
        guard.apply(&mut surface, &EditKey::Delete);
        assert_eq!(guard.live_text(&surface), "ab");

        guard.apply(&mut surface, &EditKey::Left);
        guard.apply(&mut surface, &EditKey::Delete);
        assert_eq!(guard.live_text(&surface), "a");
        assert_eq!(surface.cursor(), guard.boundary() + 1);
    }

    #[test]
    fn test_replace_live_line() {
        let (mut surface, guard) = setup("partial");
        surface.move_to(0);
        guard.replace_live_line(&mut surface, "cd x");
        assert_eq!(surface.text(), format!("{PROMPT}cd x"));
        assert_eq!(surface.cursor(), surface.end());
    }

    #[test]
    fn test_paste_normalizes_carriage_returns() {
        let (mut surface, guard) = setup("");
        guard.apply(&mut surface, &EditKey::Paste("a\r\nb".into()));
        assert_eq!(guard.live_text(&surface), "a\nb");
    }

    #[test]
    fn test_control_keys_are_forwarded() {
        let (mut surface, guard) = setup("ls");
        assert_eq!(guard.apply(&mut surface, &EditKey::Enter), GuardOutcome::Submit);
        assert_eq!(
            guard.apply(&mut surface, &EditKey::Up),
            GuardOutcome::Navigate(Direction::Older)
        );
        assert_eq!(
            guard.apply(&mut surface, &EditKey::Down),
            GuardOutcome::Navigate(Direction::Newer)
        );
        assert_eq!(surface.text(), format!("{PROMPT}ls"));
    }
}
