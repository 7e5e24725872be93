//! Text area: the editing widget over an `EditorSession`
//!
//! The session owns the text and the selection; the widget adds what a
//! text control needs on top: which end of the selection the caret is on,
//! scrolling, soft wrap, an undo snapshot stack and the clipboard.

use arboard::Clipboard;
use tracing::{debug, warn};

use crate::command::WidgetAction;
use crate::config::FontStyle;
use crate::input::InputEvent;
use crate::screen::Screen;
use crate::session::{EditorSession, Selection};
use crate::terminal::Attrs;
use super::layout::Rect;
use super::theme::Theme;

const UNDO_LIMIT: usize = 100;
const WHEEL_ROWS: usize = 3;

/// One screen row: a byte range of the buffer, newline excluded
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Row {
    start: usize,
    end: usize,
}

/// Split `text` into screen rows. With `wrap_width` long lines break after
/// the last space that fits, or hard at the width when there is none.
fn layout_rows(text: &str, wrap_width: Option<usize>) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut line_start = 0;
    for line in text.split('\n') {
        match wrap_width {
            Some(width) if width > 0 => wrap_line(line, line_start, width, &mut rows),
            _ => rows.push(Row { start: line_start, end: line_start + line.len() }),
        }
        line_start += line.len() + 1;
    }
    rows
}

fn wrap_line(line: &str, offset: usize, width: usize, rows: &mut Vec<Row>) {
    let mut start = 0;
    loop {
        let rest = &line[start..];
        let Some((cut, _)) = rest.char_indices().nth(width) else {
            rows.push(Row { start: offset + start, end: offset + line.len() });
            return;
        };
        let split = rest[..cut].rfind(' ').map_or(cut, |space| space + 1);
        rows.push(Row { start: offset + start, end: offset + start + split });
        start += split;
    }
}

/// Index of the row holding `offset`. At a soft break the caret belongs to the next row.
fn row_of(rows: &[Row], offset: usize) -> usize {
    rows.partition_point(|r| r.start <= offset).saturating_sub(1)
}

fn prev_boundary(text: &str, offset: usize) -> usize {
    text[..offset].char_indices().next_back().map_or(0, |(i, _)| i)
}

fn next_boundary(text: &str, offset: usize) -> usize {
    text[offset..].chars().next().map_or(offset, |c| offset + c.len_utf8())
}

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Start of the next word after `offset`
fn word_right(text: &str, offset: usize) -> usize {
    let rest = &text[offset..];
    let after_word = rest.find(|c: char| !is_word(c)).unwrap_or(rest.len());
    let tail = &rest[after_word..];
    offset + after_word + tail.find(is_word).unwrap_or(tail.len())
}

/// Start of the word before `offset`
fn word_left(text: &str, offset: usize) -> usize {
    let before = text[..offset].trim_end_matches(|c: char| !is_word(c));
    before.trim_end_matches(is_word).len()
}

fn display_char(ch: char) -> char {
    if ch.is_control() {
        ' '
    } else {
        ch
    }
}

/// Where the horizontal motions would take the caret
struct CaretTargets {
    prev: usize,
    next: usize,
    word_prev: usize,
    word_next: usize,
    end: usize,
}

impl CaretTargets {
    fn new(text: &str, caret: usize) -> Self {
        Self {
            prev: prev_boundary(text, caret),
            next: next_boundary(text, caret),
            word_prev: word_left(text, caret),
            word_next: word_right(text, caret),
            end: text.len(),
        }
    }
}

#[derive(Clone, Debug)]
struct Snapshot {
    buffer: String,
    selection: Selection,
}

pub struct TextArea {
    /// Caret sits on `selection.start` rather than `selection.end`
    caret_at_start: bool,
    /// Selection as the widget last left it
    known: Selection,
    /// Column kept across Up/Down
    preferred_col: Option<usize>,
    scroll_row: usize,
    scroll_col: usize,
    undo_stack: Vec<Snapshot>,
    /// Last edit was typing, so the next keystroke joins its snapshot
    typing: bool,
    clipboard: Option<Clipboard>,
    /// Used when the system clipboard is unavailable
    local_clipboard: String,
    drag_anchor: Option<usize>,
}

impl TextArea {
    pub fn new() -> Self {
        let clipboard = match Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(e) => {
                warn!(error = %e, "system clipboard unavailable, using an internal one");
                None
            }
        };
        Self::with_clipboard(clipboard)
    }

    pub fn with_clipboard(clipboard: Option<Clipboard>) -> Self {
        Self {
            caret_at_start: false,
            known: Selection::default(),
            preferred_col: None,
            scroll_row: 0,
            scroll_col: 0,
            undo_stack: Vec::new(),
            typing: false,
            clipboard,
            local_clipboard: String::new(),
            drag_anchor: None,
        }
    }

    /// Forget history and scrolling after the document was replaced
    pub fn reset(&mut self) {
        self.undo_stack.clear();
        self.typing = false;
        self.caret_at_start = false;
        self.known = Selection::default();
        self.preferred_col = None;
        self.scroll_row = 0;
        self.scroll_col = 0;
        self.drag_anchor = None;
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Snapshot the session before an edit made outside the widget
    pub fn checkpoint(&mut self, session: &EditorSession) {
        self.push_snapshot(session);
        self.typing = false;
    }

    /// Drop the last snapshot if the edit it guarded changed nothing
    pub fn discard_if_unchanged(&mut self, session: &EditorSession) {
        if self.undo_stack.last().is_some_and(|s| s.buffer == session.buffer()) {
            self.undo_stack.pop();
        }
    }

    fn push_snapshot(&mut self, session: &EditorSession) {
        if self.undo_stack.len() == UNDO_LIMIT {
            self.undo_stack.remove(0);
        }
        self.undo_stack.push(Snapshot {
            buffer: session.buffer().to_string(),
            selection: session.selection(),
        });
    }

    /// Pick up selection changes made by session commands (Find, Go To)
    fn sync(&mut self, session: &EditorSession) {
        if session.selection() != self.known {
            self.caret_at_start = false;
            self.preferred_col = None;
            self.typing = false;
            self.known = session.selection();
        }
    }

    fn caret(&self, session: &EditorSession) -> usize {
        let selection = session.selection();
        if self.caret_at_start {
            selection.start
        } else {
            selection.end
        }
    }

    fn anchor(&self, session: &EditorSession) -> usize {
        let selection = session.selection();
        if self.caret_at_start {
            selection.end
        } else {
            selection.start
        }
    }

    /// Put the caret at `offset`, extending the selection from the anchor when `extend`
    fn move_to(&mut self, session: &mut EditorSession, offset: usize, extend: bool) {
        let anchor = if extend { self.anchor(session) } else { offset };
        session.set_selection(anchor, offset);
        self.caret_at_start = offset < anchor;
        self.known = session.selection();
        self.typing = false;
    }

    fn insert(&mut self, session: &mut EditorSession, text: &str, typing: bool) {
        if !(typing && self.typing) {
            self.push_snapshot(session);
        }
        session.replace_selection(text);
        self.typing = typing;
        self.caret_at_start = false;
        self.preferred_col = None;
        self.known = session.selection();
    }

    fn delete_range(&mut self, session: &mut EditorSession, start: usize, end: usize) {
        if start == end {
            return;
        }
        self.push_snapshot(session);
        session.replace_range(start, end, "");
        self.typing = false;
        self.caret_at_start = false;
        self.preferred_col = None;
        self.known = session.selection();
    }

    fn delete_selection(&mut self, session: &mut EditorSession) {
        let Selection { start, end } = session.selection();
        self.delete_range(session, start, end);
    }

    fn backspace(&mut self, session: &mut EditorSession) {
        let selection = session.selection();
        if !selection.is_empty() {
            self.delete_selection(session);
        } else if selection.start > 0 {
            let prev = prev_boundary(session.buffer(), selection.start);
            self.delete_range(session, prev, selection.start);
        }
    }

    fn delete_forward(&mut self, session: &mut EditorSession) {
        let selection = session.selection();
        if !selection.is_empty() {
            self.delete_selection(session);
        } else {
            let next = next_boundary(session.buffer(), selection.start);
            self.delete_range(session, selection.start, next);
        }
    }

    fn copy(&mut self, session: &EditorSession) -> bool {
        let text = session.selected_text();
        if text.is_empty() {
            return false;
        }
        self.local_clipboard = text.to_string();
        if let Some(clipboard) = self.clipboard.as_mut() {
            if let Err(e) = clipboard.set_text(text.to_string()) {
                warn!(error = %e, "clipboard write failed");
            }
        }
        true
    }

    fn paste_text(&mut self) -> String {
        let text = match self.clipboard.as_mut().map(Clipboard::get_text) {
            Some(Ok(text)) => text,
            Some(Err(e)) => {
                debug!(error = %e, "clipboard read failed, using internal copy");
                self.local_clipboard.clone()
            }
            None => self.local_clipboard.clone(),
        };
        text.replace("\r\n", "\n")
    }

    /// Run an Edit menu action. Returns false when there was nothing to do.
    pub fn apply(&mut self, session: &mut EditorSession, action: WidgetAction) -> bool {
        self.sync(session);
        debug!(?action, "text area action");
        match action {
            WidgetAction::Undo => match self.undo_stack.pop() {
                Some(snapshot) => {
                    session.restore(snapshot.buffer, snapshot.selection);
                    self.typing = false;
                    self.caret_at_start = false;
                    self.known = session.selection();
                    true
                }
                None => false,
            },
            WidgetAction::Copy => self.copy(session),
            WidgetAction::Cut => {
                if !self.copy(session) {
                    return false;
                }
                self.delete_selection(session);
                true
            }
            WidgetAction::Paste => {
                let text = self.paste_text();
                if text.is_empty() {
                    return false;
                }
                self.insert(session, &text, false);
                true
            }
            WidgetAction::Delete => {
                let before = session.buffer().len();
                self.delete_forward(session);
                session.buffer().len() != before
            }
            WidgetAction::SelectAll => {
                session.select_all();
                self.caret_at_start = false;
                self.known = session.selection();
                true
            }
        }
    }

    fn rows(session: &EditorSession, area: Rect, wrap: bool) -> Vec<Row> {
        layout_rows(session.buffer(), wrap.then_some(area.width as usize))
    }

    /// Row index and column of the caret
    fn caret_cell(&self, session: &EditorSession, rows: &[Row]) -> (usize, usize) {
        let caret = self.caret(session);
        let row = row_of(rows, caret);
        let col = session.buffer()[rows[row].start..caret].chars().count();
        (row, col)
    }

    /// Offset of column `col` on row `index`, clamped to the row
    fn offset_in_row(text: &str, rows: &[Row], index: usize, col: usize) -> usize {
        let row = rows[index];
        let soft_break = rows.get(index + 1).is_some_and(|next| next.start == row.end);
        let last = if soft_break && row.end > row.start {
            prev_boundary(text, row.end)
        } else {
            row.end
        };
        text[row.start..last]
            .char_indices()
            .nth(col)
            .map_or(last, |(i, _)| row.start + i)
    }

    fn move_vertically(&mut self, session: &mut EditorSession, area: Rect, wrap: bool, delta: isize, extend: bool) {
        let rows = Self::rows(session, area, wrap);
        let (row, col) = self.caret_cell(session, &rows);
        let col = *self.preferred_col.get_or_insert(col);
        let target = (row as isize + delta).clamp(0, rows.len() as isize - 1) as usize;
        let offset = if target == row && delta < 0 {
            0
        } else if target == row && delta > 0 {
            session.buffer().len()
        } else {
            Self::offset_in_row(session.buffer(), &rows, target, col)
        };
        self.move_to(session, offset, extend);
        self.preferred_col = Some(col);
    }

    fn move_home_end(&mut self, session: &mut EditorSession, area: Rect, wrap: bool, end: bool, extend: bool) {
        let rows = Self::rows(session, area, wrap);
        let (row, _) = self.caret_cell(session, &rows);
        let offset = if end {
            Self::offset_in_row(session.buffer(), &rows, row, usize::MAX)
        } else {
            rows[row].start
        };
        self.move_to(session, offset, extend);
    }

    /// Buffer offset under a screen cell of the text area
    fn offset_at_point(&self, session: &EditorSession, area: Rect, wrap: bool, row: u16, col: u16) -> usize {
        let rows = Self::rows(session, area, wrap);
        let index = self.scroll_row + row.saturating_sub(area.y) as usize;
        if index >= rows.len() {
            return session.buffer().len();
        }
        let h = if wrap { 0 } else { self.scroll_col };
        let col = h + col.saturating_sub(area.x) as usize;
        Self::offset_in_row(session.buffer(), &rows, index, col)
    }

    /// Handle a key or mouse event aimed at the text. Returns false if unused.
    pub fn handle_event(&mut self, session: &mut EditorSession, event: &InputEvent, area: Rect, wrap: bool) -> bool {
        self.sync(session);
        let selection = session.selection();
        let targets = CaretTargets::new(session.buffer(), self.caret(session));
        let page = area.height.max(1) as isize;

        if !matches!(
            event,
            InputEvent::CursorUp
                | InputEvent::CursorDown
                | InputEvent::ShiftUp
                | InputEvent::ShiftDown
                | InputEvent::PageUp
                | InputEvent::PageDown
                | InputEvent::ShiftPageUp
                | InputEvent::ShiftPageDown
        ) {
            self.preferred_col = None;
        }

        match event {
            InputEvent::Char(ch) => {
                let mut buf = [0u8; 4];
                self.insert(session, ch.encode_utf8(&mut buf), true);
            }
            InputEvent::Enter => self.insert(session, "\n", false),
            InputEvent::Tab => self.insert(session, "\t", false),
            InputEvent::Backspace => self.backspace(session),
            InputEvent::Delete => self.delete_forward(session),

            InputEvent::CursorLeft if !selection.is_empty() => self.move_to(session, selection.start, false),
            InputEvent::CursorRight if !selection.is_empty() => self.move_to(session, selection.end, false),
            InputEvent::CursorLeft => self.move_to(session, targets.prev, false),
            InputEvent::CursorRight => self.move_to(session, targets.next, false),
            InputEvent::ShiftLeft => self.move_to(session, targets.prev, true),
            InputEvent::ShiftRight => self.move_to(session, targets.next, true),
            InputEvent::CtrlLeft => self.move_to(session, targets.word_prev, false),
            InputEvent::CtrlRight => self.move_to(session, targets.word_next, false),
            InputEvent::CtrlShiftLeft => self.move_to(session, targets.word_prev, true),
            InputEvent::CtrlShiftRight => self.move_to(session, targets.word_next, true),

            InputEvent::CursorUp => self.move_vertically(session, area, wrap, -1, false),
            InputEvent::CursorDown => self.move_vertically(session, area, wrap, 1, false),
            InputEvent::ShiftUp => self.move_vertically(session, area, wrap, -1, true),
            InputEvent::ShiftDown => self.move_vertically(session, area, wrap, 1, true),
            InputEvent::PageUp => self.move_vertically(session, area, wrap, -page, false),
            InputEvent::PageDown => self.move_vertically(session, area, wrap, page, false),
            InputEvent::ShiftPageUp => self.move_vertically(session, area, wrap, -page, true),
            InputEvent::ShiftPageDown => self.move_vertically(session, area, wrap, page, true),

            InputEvent::Home => self.move_home_end(session, area, wrap, false, false),
            InputEvent::End => self.move_home_end(session, area, wrap, true, false),
            InputEvent::ShiftHome => self.move_home_end(session, area, wrap, false, true),
            InputEvent::ShiftEnd => self.move_home_end(session, area, wrap, true, true),
            InputEvent::CtrlHome => self.move_to(session, 0, false),
            InputEvent::CtrlEnd => self.move_to(session, targets.end, false),
            InputEvent::CtrlShiftHome => self.move_to(session, 0, true),
            InputEvent::CtrlShiftEnd => self.move_to(session, targets.end, true),

            InputEvent::MouseClick { row, col } if area.contains(*row, *col) => {
                let offset = self.offset_at_point(session, area, wrap, *row, *col);
                self.move_to(session, offset, false);
                self.drag_anchor = Some(offset);
            }
            InputEvent::MouseDrag { row, col } => {
                let Some(anchor) = self.drag_anchor else {
                    return false;
                };
                let row = (*row).clamp(area.y, area.y + area.height.saturating_sub(1));
                let offset = self.offset_at_point(session, area, wrap, row, *col);
                session.set_selection(anchor, offset);
                self.caret_at_start = offset < anchor;
                self.known = session.selection();
            }
            InputEvent::MouseRelease { .. } => {
                return self.drag_anchor.take().is_some();
            }
            InputEvent::ScrollUp { row, col } if area.contains(*row, *col) => {
                self.scroll_row = self.scroll_row.saturating_sub(WHEEL_ROWS);
                return true;
            }
            InputEvent::ScrollDown { row, col } if area.contains(*row, *col) => {
                let last = Self::rows(session, area, wrap).len().saturating_sub(1);
                self.scroll_row = (self.scroll_row + WHEEL_ROWS).min(last);
                return true;
            }
            _ => return false,
        }

        self.ensure_visible(session, area, wrap);
        true
    }

    /// Scroll so the caret is inside `area`
    pub fn ensure_visible(&mut self, session: &EditorSession, area: Rect, wrap: bool) {
        self.sync(session);
        let rows = Self::rows(session, area, wrap);
        let (row, col) = self.caret_cell(session, &rows);
        let height = area.height.max(1) as usize;
        let width = area.width.max(1) as usize;

        if row < self.scroll_row {
            self.scroll_row = row;
        } else if row >= self.scroll_row + height {
            self.scroll_row = row + 1 - height;
        }

        if wrap {
            self.scroll_col = 0;
        } else if col < self.scroll_col {
            self.scroll_col = col;
        } else if col >= self.scroll_col + width {
            self.scroll_col = col + 1 - width;
        }
    }

    pub fn draw(
        &self,
        screen: &mut Screen,
        session: &EditorSession,
        theme: &Theme,
        area: Rect,
        wrap: bool,
        style: FontStyle,
        focused: bool,
    ) {
        let text = session.buffer();
        let rows = Self::rows(session, area, wrap);
        let selection = session.selection();
        let attrs = Attrs { bold: style.is_bold(), italic: style.is_italic() };
        let h = if wrap { 0 } else { self.scroll_col };

        screen.fill(area.y, area.x, area.width, area.height, ' ', theme.text_fg, theme.text_bg);

        for r in 0..area.height {
            let Some(row) = rows.get(self.scroll_row + r as usize) else {
                break;
            };
            let screen_row = area.y + r;
            let mut drawn = 0u16;
            for (byte, ch) in text[row.start..row.end].char_indices().skip(h).take(area.width as usize) {
                let offset = row.start + byte;
                let (fg, bg) = if offset >= selection.start && offset < selection.end {
                    (theme.selection_fg, theme.selection_bg)
                } else {
                    (theme.text_fg, theme.text_bg)
                };
                screen.set_styled(screen_row, area.x + drawn, display_char(ch), fg, bg, attrs);
                drawn += 1;
            }

            // A selected line break shows as one highlighted cell
            let newline_selected = row.end < text.len()
                && text.as_bytes()[row.end] == b'\n'
                && row.end >= selection.start
                && row.end < selection.end;
            if newline_selected && drawn < area.width {
                screen.set(screen_row, area.x + drawn, ' ', theme.selection_fg, theme.selection_bg);
            }
        }

        if focused {
            let (row, col) = self.caret_cell(session, &rows);
            let visible_row = row.checked_sub(self.scroll_row).filter(|r| *r < area.height as usize);
            let visible_col = col.checked_sub(h).filter(|c| *c < area.width as usize);
            match (visible_row, visible_col) {
                (Some(r), Some(c)) => {
                    screen.set_cursor(area.y + r as u16, area.x + c as u16);
                    screen.set_cursor_visible(true);
                }
                _ => screen.set_cursor_visible(false),
            }
        }
    }
}

impl Default for TextArea {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn area() -> Rect {
        Rect::new(2, 3, 10, 4)
    }

    fn setup(text: &str) -> (TextArea, EditorSession) {
        let mut session = EditorSession::new();
        session.replace_selection(text);
        session.set_selection(0, 0);
        (TextArea::with_clipboard(None), session)
    }

    fn send(widget: &mut TextArea, session: &mut EditorSession, events: &[InputEvent]) {
        for event in events {
            widget.handle_event(session, event, area(), false);
        }
    }

    fn type_str(widget: &mut TextArea, session: &mut EditorSession, s: &str) {
        for ch in s.chars() {
            widget.handle_event(session, &InputEvent::Char(ch), area(), false);
        }
    }

    #[test]
    fn test_wrap_breaks_after_space() {
        let rows = layout_rows("hello world again", Some(8));
        let text = "hello world again";
        let pieces: Vec<&str> = rows.iter().map(|r| &text[r.start..r.end]).collect();
        assert_eq!(pieces, vec!["hello ", "world ", "again"]);
    }

    #[test]
    fn test_wrap_hard_breaks_long_words() {
        let text = "abcdefghij\nxy";
        let rows = layout_rows(text, Some(4));
        let pieces: Vec<&str> = rows.iter().map(|r| &text[r.start..r.end]).collect();
        assert_eq!(pieces, vec!["abcd", "efgh", "ij", "xy"]);
    }

    #[test]
    fn test_rows_without_wrap_follow_lines() {
        let rows = layout_rows("a\n\nbc", None);
        assert_eq!(rows, vec![Row { start: 0, end: 1 }, Row { start: 2, end: 2 }, Row { start: 3, end: 5 }]);
        assert_eq!(row_of(&rows, 2), 1);
        assert_eq!(row_of(&rows, 5), 2);
    }

    #[test]
    fn test_word_motion() {
        let text = "foo bar_baz, qux";
        assert_eq!(word_right(text, 0), 4);
        assert_eq!(word_right(text, 4), 13);
        assert_eq!(word_left(text, 13), 4);
        assert_eq!(word_left(text, 4), 0);
    }

    #[test]
    fn test_typing_replaces_selection_and_dirties() {
        let (mut widget, mut session) = setup("hello");
        send(&mut widget, &mut session, &[InputEvent::ShiftRight, InputEvent::ShiftRight]);
        assert_eq!(session.selected_text(), "he");
        type_str(&mut widget, &mut session, "J");
        assert_eq!(session.buffer(), "Jllo");
        assert!(session.is_dirty());
    }

    #[test]
    fn test_backspace_and_delete_multibyte() {
        let (mut widget, mut session) = setup("añb");
        send(&mut widget, &mut session, &[InputEvent::CursorRight, InputEvent::CursorRight]);
        assert_eq!(session.selection(), Selection::cursor(3));
        send(&mut widget, &mut session, &[InputEvent::Backspace]);
        assert_eq!(session.buffer(), "ab");
        send(&mut widget, &mut session, &[InputEvent::Delete]);
        assert_eq!(session.buffer(), "a");
    }

    #[test]
    fn test_shift_selection_extends_backwards() {
        let (mut widget, mut session) = setup("abcdef");
        send(&mut widget, &mut session, &[InputEvent::CtrlEnd, InputEvent::ShiftLeft, InputEvent::ShiftLeft]);
        assert_eq!(session.selection(), Selection { start: 4, end: 6 });
        send(&mut widget, &mut session, &[InputEvent::ShiftRight]);
        assert_eq!(session.selection(), Selection { start: 5, end: 6 });
        send(&mut widget, &mut session, &[InputEvent::CursorLeft]);
        assert_eq!(session.selection(), Selection::cursor(5));
    }

    #[test]
    fn test_vertical_moves_keep_column() {
        let (mut widget, mut session) = setup("abcdef\nx\nabcdef");
        send(&mut widget, &mut session, &[InputEvent::End]);
        assert_eq!(session.selection(), Selection::cursor(6));
        send(&mut widget, &mut session, &[InputEvent::CursorDown]);
        assert_eq!(session.selection(), Selection::cursor(8));
        send(&mut widget, &mut session, &[InputEvent::CursorDown]);
        assert_eq!(session.selection(), Selection::cursor(15));
        send(&mut widget, &mut session, &[InputEvent::CursorDown]);
        assert_eq!(session.selection(), Selection::cursor(15));
        send(&mut widget, &mut session, &[InputEvent::CtrlHome, InputEvent::CursorUp]);
        assert_eq!(session.selection(), Selection::cursor(0));
    }

    #[test]
    fn test_undo_coalesces_typing() {
        let (mut widget, mut session) = setup("");
        type_str(&mut widget, &mut session, "abc");
        send(&mut widget, &mut session, &[InputEvent::Enter]);
        type_str(&mut widget, &mut session, "de");
        assert_eq!(session.buffer(), "abc\nde");

        assert!(widget.apply(&mut session, WidgetAction::Undo));
        assert_eq!(session.buffer(), "abc\n");
        assert!(widget.apply(&mut session, WidgetAction::Undo));
        assert_eq!(session.buffer(), "abc");
        assert!(widget.apply(&mut session, WidgetAction::Undo));
        assert_eq!(session.buffer(), "");
        assert!(!session.is_dirty());
        assert!(!widget.apply(&mut session, WidgetAction::Undo));
    }

    #[test]
    fn test_checkpoint_for_session_edits() {
        let (mut widget, mut session) = setup("cat cat");
        widget.checkpoint(&session);
        session.replace_all("cat", "dog", true);
        widget.discard_if_unchanged(&session);
        assert!(widget.can_undo());

        widget.checkpoint(&session);
        session.replace_all("zebra", "x", true);
        widget.discard_if_unchanged(&session);

        widget.apply(&mut session, WidgetAction::Undo);
        assert_eq!(session.buffer(), "cat cat");
        assert!(!widget.can_undo());
    }

    #[test]
    fn test_cut_and_paste_with_internal_clipboard() {
        let (mut widget, mut session) = setup("one two");
        send(&mut widget, &mut session, &[InputEvent::CtrlShiftRight]);
        assert_eq!(session.selected_text(), "one ");
        assert!(widget.apply(&mut session, WidgetAction::Cut));
        assert_eq!(session.buffer(), "two");
        send(&mut widget, &mut session, &[InputEvent::CtrlEnd]);
        assert!(widget.apply(&mut session, WidgetAction::Paste));
        assert_eq!(session.buffer(), "twoone ");
        assert!(!widget.apply(&mut session, WidgetAction::Copy));
    }

    #[test]
    fn test_select_all_then_delete() {
        let (mut widget, mut session) = setup("gone");
        widget.apply(&mut session, WidgetAction::SelectAll);
        assert!(widget.apply(&mut session, WidgetAction::Delete));
        assert_eq!(session.buffer(), "");
        assert!(!widget.apply(&mut session, WidgetAction::Delete));
    }

    #[test]
    fn test_click_and_drag_select() {
        let (mut widget, mut session) = setup("first\nsecond");
        // Text area starts at column 2, row 3
        widget.handle_event(&mut session, &InputEvent::MouseClick { row: 4, col: 3 }, area(), false);
        assert_eq!(session.selection(), Selection::cursor(7));
        widget.handle_event(&mut session, &InputEvent::MouseDrag { row: 3, col: 4 }, area(), false);
        assert_eq!(session.selection(), Selection { start: 2, end: 7 });
        assert!(widget.handle_event(&mut session, &InputEvent::MouseRelease { row: 3, col: 4 }, area(), false));
        // Past the end of a line lands on its end
        widget.handle_event(&mut session, &InputEvent::MouseClick { row: 3, col: 11 }, area(), false);
        assert_eq!(session.selection(), Selection::cursor(5));
    }

    #[test]
    fn test_horizontal_scroll_follows_caret() {
        let (mut widget, mut session) = setup("0123456789abcdef");
        send(&mut widget, &mut session, &[InputEvent::End]);
        assert_eq!(widget.scroll_col, 7);
        send(&mut widget, &mut session, &[InputEvent::Home]);
        assert_eq!(widget.scroll_col, 0);
    }

    #[test]
    fn test_external_selection_change_resets_caret_side() {
        let (mut widget, mut session) = setup("abc abc");
        send(&mut widget, &mut session, &[InputEvent::CtrlEnd, InputEvent::ShiftLeft]);
        session.find("abc", true, crate::session::Direction::Up).unwrap();
        assert_eq!(session.selection(), Selection { start: 0, end: 3 });
        // A found match has the caret at its end
        send(&mut widget, &mut session, &[InputEvent::ShiftRight]);
        assert_eq!(session.selection(), Selection { start: 0, end: 4 });
    }

    #[test]
    fn test_draw_marks_selection_and_caret() {
        let (mut widget, mut session) = setup("abc");
        send(&mut widget, &mut session, &[InputEvent::ShiftRight]);
        let mut screen = Screen::new(20, 10);
        let theme = Theme::light();
        widget.draw(&mut screen, &session, &theme, area(), false, FontStyle::Bold, true);
        let a = screen.get(3, 2).unwrap();
        assert_eq!(a.ch, 'a');
        assert_eq!(a.bg, theme.selection_bg);
        assert!(a.attrs.bold);
        assert_eq!(screen.get(3, 3).map(|c| c.bg), Some(theme.text_bg));
    }
}
