//! Terminal renderer using crossterm
//!
//! Lays the surface out into screen rows and draws the bottom of it.

use std::io::{self, Write};
use std::ops::Range;

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute, queue,
    style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use unicode_width::UnicodeWidthChar;

use crate::config::{Color, ColorScheme};
use crate::core::{Cell, Style, Surface, TextSurface};

/// One laid-out cell
#[derive(Clone, Copy, Debug, PartialEq)]
struct Glyph {
    offset: usize,
    ch: char,
    style: Style,
    width: u16,
}

/// A screen row covering surface offsets `start..end`
#[derive(Clone, Debug, Default, PartialEq)]
struct Row {
    start: usize,
    end: usize,
    glyphs: Vec<Glyph>,
}

/// Surface text wrapped to a fixed width
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    rows: Vec<Row>,
    width: u16,
}

impl Layout {
    /// Wrap `cells` at hard newlines and at `width` display columns
    pub fn build(cells: &[Cell], width: u16) -> Self {
        let width = width.max(1);
        let mut rows = Vec::new();
        let mut row = Row::default();
        let mut col: u16 = 0;

        for (offset, cell) in cells.iter().enumerate() {
            if cell.ch == '\n' {
                row.end = offset;
                rows.push(std::mem::take(&mut row));
                row.start = offset + 1;
                col = 0;
                continue;
            }

            let (ch, w) = match cell.ch.width() {
                Some(w) if w > 0 => (cell.ch, w as u16),
                _ => (' ', 1),
            };
            if col + w > width && !row.glyphs.is_empty() {
                row.end = offset;
                rows.push(std::mem::take(&mut row));
                row.start = offset;
                col = 0;
            }
            row.glyphs.push(Glyph {
                offset,
                ch,
                style: cell.style,
                width: w,
            });
            col += w;
        }

        row.end = cells.len();
        rows.push(row);
        Self { rows, width }
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Screen position `(col, row)` of a surface offset
    pub fn position_of(&self, offset: usize) -> (u16, usize) {
        let row_index = self
            .rows
            .iter()
            .rposition(|row| row.start <= offset)
            .unwrap_or(0);
        let row = &self.rows[row_index];
        let col: u16 = row
            .glyphs
            .iter()
            .take_while(|g| g.offset < offset)
            .map(|g| g.width)
            .sum();
        (col.min(self.width.saturating_sub(1)), row_index)
    }

    /// Surface offset at screen position `(col, row)`, clamped to the layout
    pub fn offset_at(&self, col: u16, row: usize) -> usize {
        let Some(row) = self.rows.get(row).or_else(|| self.rows.last()) else {
            return 0;
        };
        let mut acc: u16 = 0;
        for glyph in &row.glyphs {
            if col < acc + glyph.width {
                return glyph.offset;
            }
            acc += glyph.width;
        }
        row.end
    }
}

/// Terminal renderer
pub struct Renderer {
    scheme: ColorScheme,
    /// Layout from the last frame
    layout: Option<Layout>,
    /// First layout row shown on screen
    top: usize,
}

impl Renderer {
    pub fn new(scheme: ColorScheme) -> Self {
        Self {
            scheme,
            layout: None,
            top: 0,
        }
    }

    /// Initialize the terminal for rendering
    pub fn init(&mut self, title: &str) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste,
            SetTitle(title),
            Hide
        )?;
        Ok(())
    }

    /// Restore the terminal
    pub fn cleanup(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            ResetColor,
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen,
            Show
        )?;
        terminal::disable_raw_mode()
    }

    /// Get terminal size
    pub fn size() -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Surface offset under a screen cell from the last frame
    pub fn offset_at(&self, col: u16, row: u16) -> Option<usize> {
        self.layout
            .as_ref()
            .map(|layout| layout.offset_at(col, self.top + row as usize))
    }

    /// Render the surface
    pub fn render(&mut self, surface: &TextSurface) -> io::Result<()> {
        let (cols, rows) = Self::size()?;
        let layout = Layout::build(surface.cells(), cols);
        let (cursor_col, cursor_row) = layout.position_of(surface.cursor());
        let visible = rows.max(1) as usize;

        self.top = layout.height().saturating_sub(visible);
        if cursor_row < self.top {
            self.top = cursor_row;
        } else if cursor_row >= self.top + visible {
            self.top = cursor_row + 1 - visible;
        }

        let selection = surface.selection();
        let mut stdout = io::stdout();
        queue!(
            stdout,
            Hide,
            SetBackgroundColor(self.scheme.background.to_crossterm()),
            Clear(ClearType::All)
        )?;

        for (screen_row, row) in layout.rows.iter().skip(self.top).take(visible).enumerate() {
            queue!(stdout, MoveTo(0, screen_row as u16))?;
            self.draw_row(&mut stdout, row, selection.as_ref())?;
        }

        queue!(
            stdout,
            ResetColor,
            MoveTo(cursor_col, (cursor_row - self.top) as u16),
            Show
        )?;
        stdout.flush()?;

        self.layout = Some(layout);
        Ok(())
    }

    fn draw_row<W: Write>(&self, out: &mut W, row: &Row, selection: Option<&Range<usize>>) -> io::Result<()> {
        let mut run = String::new();
        let mut run_colors: Option<(Color, Color)> = None;

        for glyph in &row.glyphs {
            let selected = selection.map_or(false, |s| s.contains(&glyph.offset));
            let colors = self.colors_for(glyph.style, selected);
            if run_colors != Some(colors) {
                self.flush_run(out, &mut run, run_colors)?;
                run_colors = Some(colors);
            }
            run.push(glyph.ch);
        }
        self.flush_run(out, &mut run, run_colors)
    }

    fn flush_run<W: Write>(&self, out: &mut W, run: &mut String, colors: Option<(Color, Color)>) -> io::Result<()> {
        if let Some((fg, bg)) = colors {
            if !run.is_empty() {
                queue!(
                    out,
                    SetForegroundColor(fg.to_crossterm()),
                    SetBackgroundColor(bg.to_crossterm()),
                    Print(run.as_str())
                )?;
            }
        }
        run.clear();
        Ok(())
    }

    /// Foreground and background for a style
    fn colors_for(&self, style: Style, selected: bool) -> (Color, Color) {
        let scheme = &self.scheme;
        if selected {
            return (scheme.selection_fg, scheme.selection_bg);
        }
        let fg = match style {
            Style::Input => scheme.input_fg,
            Style::Prompt => scheme.prompt_fg,
            Style::Output => scheme.output_fg,
            Style::Error => scheme.error_fg,
        };
        (fg, scheme.background)
    }
}
