//! Key mapping for terminal input
//!
//! Converts crossterm key and mouse events to editing keys for the session.

use bitflags::bitflags;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::core::EditKey;
use crate::ui::renderer::Renderer;

bitflags! {
    /// Modifier keys
    #[derive(Clone, Copy, Debug, Default, PartialEq)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
    }
}

impl From<KeyModifiers> for Modifiers {
    fn from(mods: KeyModifiers) -> Self {
        let mut result = Modifiers::empty();
        if mods.contains(KeyModifiers::SHIFT) {
            result |= Modifiers::SHIFT;
        }
        if mods.contains(KeyModifiers::CONTROL) {
            result |= Modifiers::CTRL;
        }
        if mods.contains(KeyModifiers::ALT) {
            result |= Modifiers::ALT;
        }
        result
    }
}

/// Key mapper for converting terminal events to editing keys
pub struct KeyMapper;

impl KeyMapper {
    /// Map a crossterm KeyEvent. Unbound keys map to `None`.
    pub fn map(event: &KeyEvent) -> Option<EditKey> {
        let mods = Modifiers::from(event.modifiers);

        match event.code {
            KeyCode::Char(ch) => Self::map_char(ch, mods),
            KeyCode::Enter => Some(EditKey::Enter),
            KeyCode::Backspace => Some(EditKey::Backspace),
            KeyCode::Delete => Some(EditKey::Delete),
            KeyCode::Left => Some(EditKey::Left),
            KeyCode::Right => Some(EditKey::Right),
            KeyCode::Up => Some(EditKey::Up),
            KeyCode::Down => Some(EditKey::Down),
            KeyCode::Home => Some(EditKey::Home),
            KeyCode::End => Some(EditKey::End),
            _ => None,
        }
    }

    /// Map a character with modifiers
    fn map_char(ch: char, mods: Modifiers) -> Option<EditKey> {
        if mods.contains(Modifiers::ALT) {
            return None;
        }

        if mods.contains(Modifiers::CTRL) {
            // Ctrl+Shift+C may arrive as 'C' or as 'c' with SHIFT
            let shifted = mods.contains(Modifiers::SHIFT) || ch.is_ascii_uppercase();
            return match ch.to_ascii_lowercase() {
                'a' if !shifted => Some(EditKey::SelectAll),
                'c' if shifted => Some(EditKey::Copy),
                _ => None,
            };
        }

        Some(EditKey::Char(ch))
    }

    /// Map a mouse event. A left click moves the cursor to the clicked cell.
    pub fn map_mouse(event: &MouseEvent, renderer: &Renderer) -> Option<EditKey> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => renderer
                .offset_at(event.column, event.row)
                .map(EditKey::MoveTo),
            _ => None,
        }
    }
}
