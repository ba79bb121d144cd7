//! Text surface abstraction
//!
//! The session writes into a `Surface`: a styled text buffer with a single
//! cursor and an optional selection. All positions are character offsets.

use std::ops::Range;

/// Style tag attached to every character on the surface
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Style {
    /// User-typed text
    #[default]
    Input,
    /// The prompt string
    Prompt,
    /// Command output
    Output,
    /// Error messages
    Error,
}

/// A single styled character
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: Style,
}

/// Editable text buffer driven by the session engine
pub trait Surface {
    /// End position (number of characters)
    fn end(&self) -> usize;

    /// Current cursor position
    fn cursor(&self) -> usize;

    /// Move the cursor, clamped to `0..=end`. Clears the selection.
    fn move_to(&mut self, pos: usize);

    /// Insert styled text at the cursor and leave the cursor after it
    fn insert_styled(&mut self, text: &str, style: Style);

    /// Delete characters in `range` (clamped). The cursor moves to
    /// `range.start` and the selection is cleared.
    fn delete_range(&mut self, range: Range<usize>);

    /// Select `range`; the cursor is placed at `range.end`
    fn select(&mut self, range: Range<usize>);

    /// Current selection, if any
    fn selection(&self) -> Option<Range<usize>>;

    /// Text in `range` (clamped)
    fn text_range(&self, range: Range<usize>) -> String;

    /// Move the cursor to the end
    fn move_to_end(&mut self) {
        let end = self.end();
        self.move_to(end);
    }

    /// Insert plain input text at the cursor
    fn insert(&mut self, text: &str) {
        self.insert_styled(text, Style::Input);
    }

    /// Append styled text at the end
    fn append(&mut self, text: &str, style: Style) {
        self.move_to_end();
        self.insert_styled(text, style);
    }

    /// Currently selected text
    fn selected_text(&self) -> Option<String> {
        self.selection().map(|range| self.text_range(range))
    }
}

/// In-memory surface backed by a cell vector
#[derive(Debug, Clone, Default)]
pub struct TextSurface {
    cells: Vec<Cell>,
    cursor: usize,
    anchor: Option<usize>,
}

impl TextSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// All cells, for rendering
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Whole buffer as a string
    #[allow(dead_code)]
    pub fn text(&self) -> String {
        self.cells.iter().map(|c| c.ch).collect()
    }

    fn clamp(&self, range: Range<usize>) -> Range<usize> {
        let end = range.end.min(self.cells.len());
        range.start.min(end)..end
    }
}

impl Surface for TextSurface {
    fn end(&self) -> usize {
        self.cells.len()
    }

    fn cursor(&self) -> usize {
        self.cursor
    }

    fn move_to(&mut self, pos: usize) {
        self.cursor = pos.min(self.cells.len());
        self.anchor = None;
    }

    fn insert_styled(&mut self, text: &str, style: Style) {
        let at = self.cursor.min(self.cells.len());
        let new_cells: Vec<Cell> = text.chars().map(|ch| Cell { ch, style }).collect();
        let count = new_cells.len();
        self.cells.splice(at..at, new_cells);
        self.cursor = at + count;
        self.anchor = None;
    }

    fn delete_range(&mut self, range: Range<usize>) {
        let range = self.clamp(range);
        self.cursor = range.start;
        self.cells.drain(range);
        self.anchor = None;
    }

    fn select(&mut self, range: Range<usize>) {
        let range = self.clamp(range);
        self.anchor = Some(range.start);
        self.cursor = range.end;
    }

    fn selection(&self) -> Option<Range<usize>> {
        let anchor = self.anchor?;
        let (start, end) = if anchor <= self.cursor {
            (anchor, self.cursor)
        } else {
            (self.cursor, anchor)
        };
        (start < end).then_some(start..end)
    }

    fn text_range(&self, range: Range<usize>) -> String {
        let range = self.clamp(range);
        self.cells[range].iter().map(|c| c.ch).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_at_cursor() {
        let mut surface = TextSurface::new();
        surface.insert("hello");
        surface.move_to(2);
        surface.insert("XY");
        assert_eq!(surface.text(), "heXYllo");
        assert_eq!(surface.cursor(), 4);
    }

    #[test]
    fn test_append_keeps_style() {
        let mut surface = TextSurface::new();
        surface.append("$ ", Style::Prompt);
        surface.move_to(0);
        surface.append("ls", Style::Input);
        assert_eq!(surface.text(), "$ ls");
        assert_eq!(surface.cells()[0].style, Style::Prompt);
        assert_eq!(surface.cells()[3].style, Style::Input);
    }

    #[test]
    fn test_delete_range_clamps() {
        let mut surface = TextSurface::new();
        surface.insert("abcdef");
        surface.delete_range(4..100);
        assert_eq!(surface.text(), "abcd");
        assert_eq!(surface.cursor(), 4);
    }

    #[test]
    fn test_selection() {
        let mut surface = TextSurface::new();
        surface.insert("prompt> cmd");
        surface.select(8..11);
        assert_eq!(surface.selection(), Some(8..11));
        assert_eq!(surface.selected_text().as_deref(), Some("cmd"));

        surface.move_to(3);
        assert_eq!(surface.selection(), None);
    }

    #[test]
    fn test_empty_selection_is_none() {
        let mut surface = TextSurface::new();
        surface.insert("abc");
        surface.select(3..3);
        assert_eq!(surface.selection(), None);
    }

    #[test]
    fn test_multibyte_offsets() {
        let mut surface = TextSurface::new();
        surface.insert("日本語");
        assert_eq!(surface.end(), 3);
        assert_eq!(surface.text_range(1..3), "本語");
    }
}
