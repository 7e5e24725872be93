//! TextField - a single-line text input used by the dialogs

use crate::input::InputEvent;
use crate::screen::Screen;
use super::theme::Theme;

/// A single-line text input
#[derive(Clone, Debug, Default)]
pub struct TextField {
    text: String,
    /// Cursor position (character index)
    cursor_pos: usize,
    /// Selection anchor (character index), if any
    selection_anchor: Option<usize>,
    /// Only accept ASCII digits
    digits_only: bool,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Field prefilled with `text`, all of it selected
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut field = Self { text: text.into(), ..Self::default() };
        field.select_all();
        field
    }

    pub fn digits_only(mut self) -> Self {
        self.digits_only = true;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor_pos = self.char_len();
        self.selection_anchor = None;
    }

    pub fn cursor_pos(&self) -> usize {
        self.cursor_pos
    }

    pub fn select_all(&mut self) {
        self.selection_anchor = Some(0);
        self.cursor_pos = self.char_len();
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Byte offset of a character index
    fn byte_index(&self, char_pos: usize) -> usize {
        self.text.char_indices().nth(char_pos).map(|(i, _)| i).unwrap_or(self.text.len())
    }

    fn selection_range(&self) -> Option<(usize, usize)> {
        self.selection_anchor
            .filter(|&anchor| anchor != self.cursor_pos)
            .map(|anchor| (anchor.min(self.cursor_pos), anchor.max(self.cursor_pos)))
    }

    fn delete_selection(&mut self) -> bool {
        if let Some((start, end)) = self.selection_range() {
            let (a, b) = (self.byte_index(start), self.byte_index(end));
            self.text.replace_range(a..b, "");
            self.cursor_pos = start;
            self.selection_anchor = None;
            return true;
        }
        self.selection_anchor = None;
        false
    }

    fn insert_char(&mut self, ch: char) {
        if self.digits_only && !ch.is_ascii_digit() {
            return;
        }
        self.delete_selection();
        let at = self.byte_index(self.cursor_pos);
        self.text.insert(at, ch);
        self.cursor_pos += 1;
    }

    fn backspace(&mut self) {
        if self.delete_selection() || self.cursor_pos == 0 {
            return;
        }
        self.cursor_pos -= 1;
        let at = self.byte_index(self.cursor_pos);
        self.text.remove(at);
    }

    fn delete(&mut self) {
        if self.delete_selection() || self.cursor_pos >= self.char_len() {
            return;
        }
        let at = self.byte_index(self.cursor_pos);
        self.text.remove(at);
    }

    /// Move the cursor, extending the selection when `keep_selection`
    fn move_to(&mut self, pos: usize, keep_selection: bool) {
        if keep_selection {
            self.selection_anchor.get_or_insert(self.cursor_pos);
        } else {
            self.selection_anchor = None;
        }
        self.cursor_pos = pos.min(self.char_len());
    }

    fn move_left(&mut self, keep_selection: bool) {
        if !keep_selection {
            // Collapse to the start of a selection
            if let Some((start, _)) = self.selection_range() {
                self.move_to(start, false);
                return;
            }
        }
        self.move_to(self.cursor_pos.saturating_sub(1), keep_selection);
    }

    fn move_right(&mut self, keep_selection: bool) {
        if !keep_selection {
            if let Some((_, end)) = self.selection_range() {
                self.move_to(end, false);
                return;
            }
        }
        self.move_to(self.cursor_pos + 1, keep_selection);
    }

    /// Handle an editing key. Returns false for keys the field does not use.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Char(ch) => self.insert_char(*ch),
            InputEvent::Backspace => self.backspace(),
            InputEvent::Delete => self.delete(),
            InputEvent::CursorLeft => self.move_left(false),
            InputEvent::CursorRight => self.move_right(false),
            InputEvent::ShiftLeft => self.move_left(true),
            InputEvent::ShiftRight => self.move_right(true),
            InputEvent::Home => self.move_to(0, false),
            InputEvent::End => self.move_to(self.char_len(), false),
            InputEvent::ShiftHome => self.move_to(0, true),
            InputEvent::ShiftEnd => self.move_to(self.char_len(), true),
            InputEvent::CtrlA => self.select_all(),
            _ => return false,
        }
        true
    }

    /// Place the cursor under a click at `offset` cells into the field
    pub fn click(&mut self, offset: usize, width: usize) {
        let pos = self.scroll_offset(width) + offset;
        self.move_to(pos, false);
    }

    /// First visible character so the cursor stays inside `width` cells
    fn scroll_offset(&self, width: usize) -> usize {
        let usable = width.saturating_sub(1);
        self.cursor_pos.saturating_sub(usable)
    }

    /// Draw the field. The terminal cursor is placed when `focused`.
    pub fn draw(&self, screen: &mut Screen, theme: &Theme, row: u16, col: u16, width: u16, focused: bool) {
        let width_usize = width as usize;
        let offset = self.scroll_offset(width_usize);
        let bg = if focused { theme.field_focused_bg } else { theme.field_bg };
        let selection = self.selection_range().filter(|_| focused);
        let mut chars = self.text.chars().skip(offset);

        for i in 0..width_usize {
            let index = offset + i;
            let ch = chars.next().unwrap_or(' ');
            let selected = selection.is_some_and(|(start, end)| index >= start && index < end);
            let (fg, bg) = if selected {
                (theme.field_selection_fg, theme.field_selection_bg)
            } else {
                (theme.field_fg, bg)
            };
            screen.set(row, col + i as u16, ch, fg, bg);
        }

        if focused {
            screen.set_cursor(row, col + (self.cursor_pos - offset) as u16);
            screen.set_cursor_visible(true);
        }
    }
}
