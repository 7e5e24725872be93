//! Double-buffered screen rendering system
//! Minimizes flicker by only updating changed cells

use crate::terminal::{Attrs, Color, CursorStyle, Terminal};
use std::io;

/// A single cell on the screen
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
    pub attrs: Attrs,
}

impl Default for Cell {
    fn default() -> Self {
        Self::new(' ', Color::Black, Color::White)
    }
}

impl Cell {
    pub fn new(ch: char, fg: Color, bg: Color) -> Self {
        Self { ch, fg, bg, attrs: Attrs::NONE }
    }
}

/// Double-buffered screen
pub struct Screen {
    width: u16,
    height: u16,
    front: Vec<Cell>, // Currently displayed
    back: Vec<Cell>,  // Being drawn to
    cursor_row: u16,
    cursor_col: u16,
    cursor_visible: bool,
    cursor_style: CursorStyle,
}

impl Screen {
    pub fn new(width: u16, height: u16) -> Self {
        let size = (width as usize) * (height as usize);
        Self {
            width,
            height,
            front: vec![Cell::new('\0', Color::Black, Color::Black); size], // Force initial draw
            back: vec![Cell::default(); size],
            cursor_row: 1,
            cursor_col: 1,
            cursor_visible: false,
            cursor_style: CursorStyle::BlinkingBar,
        }
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        let size = (width as usize) * (height as usize);
        self.width = width;
        self.height = height;
        self.front = vec![Cell::new('\0', Color::Black, Color::Black); size];
        self.back = vec![Cell::default(); size];
    }

    /// Convert row/col to buffer index (1-based coordinates)
    fn index(&self, row: u16, col: u16) -> Option<usize> {
        if row >= 1 && row <= self.height && col >= 1 && col <= self.width {
            Some(((row - 1) as usize) * (self.width as usize) + ((col - 1) as usize))
        } else {
            None
        }
    }

    pub fn set(&mut self, row: u16, col: u16, ch: char, fg: Color, bg: Color) {
        self.set_styled(row, col, ch, fg, bg, Attrs::NONE);
    }

    pub fn set_styled(&mut self, row: u16, col: u16, ch: char, fg: Color, bg: Color, attrs: Attrs) {
        if let Some(idx) = self.index(row, col) {
            self.back[idx] = Cell { ch, fg, bg, attrs };
        }
    }

    pub fn get(&self, row: u16, col: u16) -> Option<Cell> {
        self.index(row, col).map(|idx| self.back[idx])
    }

    /// Write a string starting at the given position, clipped at the right edge
    pub fn write_str(&mut self, row: u16, col: u16, s: &str, fg: Color, bg: Color) {
        let mut c = col;
        for ch in s.chars() {
            if c > self.width {
                break;
            }
            self.set(row, c, ch, fg, bg);
            c += 1;
        }
    }

    pub fn fill(&mut self, row: u16, col: u16, width: u16, height: u16, ch: char, fg: Color, bg: Color) {
        for r in row..row.saturating_add(height) {
            for c in col..col.saturating_add(width) {
                self.set(r, c, ch, fg, bg);
            }
        }
    }

    pub fn clear_with(&mut self, fg: Color, bg: Color) {
        self.back.fill(Cell::new(' ', fg, bg));
    }

    /// Draw a single-line box with a filled interior
    pub fn draw_box(&mut self, row: u16, col: u16, width: u16, height: u16, fg: Color, bg: Color) {
        if width < 2 || height < 2 {
            return;
        }

        self.set(row, col, '┌', fg, bg);
        self.set(row, col + width - 1, '┐', fg, bg);
        self.set(row + height - 1, col, '└', fg, bg);
        self.set(row + height - 1, col + width - 1, '┘', fg, bg);

        for c in 1..width - 1 {
            self.set(row, col + c, '─', fg, bg);
            self.set(row + height - 1, col + c, '─', fg, bg);
        }

        for r in 1..height - 1 {
            self.set(row + r, col, '│', fg, bg);
            self.set(row + r, col + width - 1, '│', fg, bg);
        }

        for r in 1..height - 1 {
            for c in 1..width - 1 {
                self.set(row + r, col + c, ' ', fg, bg);
            }
        }
    }

    /// Darken the cells to the right of and below a box
    pub fn draw_shadow(&mut self, row: u16, col: u16, width: u16, height: u16) {
        for r in 1..=height {
            for c in 0..2 {
                if let Some(idx) = self.index(row + r, col + width + c) {
                    let cell = &mut self.back[idx];
                    cell.fg = Color::DarkGray;
                    cell.bg = Color::Black;
                }
            }
        }

        for c in 2..width + 2 {
            if let Some(idx) = self.index(row + height, col + c) {
                let cell = &mut self.back[idx];
                cell.fg = Color::DarkGray;
                cell.bg = Color::Black;
            }
        }
    }

    pub fn set_cursor(&mut self, row: u16, col: u16) {
        self.cursor_row = row;
        self.cursor_col = col;
    }

    pub fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
    }

    /// Flush changes to the terminal (only updates changed cells)
    pub fn flush(&mut self, term: &mut Terminal) -> io::Result<()> {
        let mut last_style: Option<(Color, Color, Attrs)> = None;
        let mut last_pos: Option<(u16, u16)> = None;

        for row in 1..=self.height {
            for col in 1..=self.width {
                let idx = ((row - 1) as usize) * (self.width as usize) + ((col - 1) as usize);
                let back = self.back[idx];
                if self.front[idx] == back {
                    continue;
                }

                if last_pos != Some((row, col.wrapping_sub(1))) {
                    term.goto(row, col)?;
                }

                let style = (back.fg, back.bg, back.attrs);
                if last_style != Some(style) {
                    term.set_style(back.fg, back.bg, back.attrs)?;
                    last_style = Some(style);
                }

                term.write_char(back.ch)?;
                self.front[idx] = back;
                last_pos = Some((row, col));
            }
        }

        if self.cursor_visible {
            term.goto(self.cursor_row, self.cursor_col)?;
            term.set_cursor_style(self.cursor_style)?;
            term.show_cursor()?;
        } else {
            term.hide_cursor()?;
        }

        term.flush()
    }

    /// Force full redraw on next flush
    pub fn invalidate(&mut self) {
        for cell in &mut self.front {
            cell.ch = '\0';
        }
    }
}
