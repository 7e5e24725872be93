//! Document session: the buffer, its file association and dirty tracking
//!
//! Offsets are UTF-8 byte offsets into the buffer and always sit on a
//! char boundary. The session never touches the filesystem itself; the
//! lifecycle workflows in `crate::lifecycle` ask the host for that.

mod position;
mod search;

pub use position::{position_at, Position};
pub use search::{Direction, SearchParams};

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

/// Application name shown in the title
pub const APP_NAME: &str = "Notepad";

/// Display name of a document that has never been saved
pub const UNTITLED: &str = "Untitled";

/// Format used by Time/Date, e.g. `3:07 PM 10/16/2026`
const TIMESTAMP_FORMAT: &str = "%-I:%M %p %-m/%-d/%Y";

/// Selected byte range, `start <= end`. Empty when it is just a cursor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Build a selection from two ends in any order
    pub fn new(a: usize, b: usize) -> Self {
        Self { start: a.min(b), end: a.max(b) }
    }

    pub fn cursor(at: usize) -> Self {
        Self { start: at, end: at }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Largest char boundary of `text` that is `<= offset`
pub fn floor_char_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// One open document
#[derive(Debug, Default)]
pub struct EditorSession {
    buffer: String,
    file_path: Option<PathBuf>,
    saved_snapshot: String,
    selection: Selection,
    last_search: Option<SearchParams>,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn selected_text(&self) -> &str {
        &self.buffer[self.selection.start..self.selection.end]
    }

    pub fn last_search(&self) -> Option<&SearchParams> {
        self.last_search.as_ref()
    }

    /// True when the buffer differs from what was last loaded or written
    pub fn is_dirty(&self) -> bool {
        self.buffer != self.saved_snapshot
    }

    /// File name of the associated path, or the untitled placeholder
    pub fn display_name(&self) -> String {
        self.file_path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| UNTITLED.to_string())
    }

    /// Window title, `*` marks unsaved changes
    pub fn title(&self) -> String {
        let marker = if self.is_dirty() { "*" } else { "" };
        format!("{}{} - {}", marker, self.display_name(), APP_NAME)
    }

    /// Status bar text for the cursor, e.g. `Ln 3, Col 7`
    pub fn status_text(&self) -> String {
        self.current_position().to_string()
    }

    /// Move the selection. Ends are clamped to the buffer and snapped to char boundaries.
    pub fn set_selection(&mut self, a: usize, b: usize) {
        let a = floor_char_boundary(&self.buffer, a);
        let b = floor_char_boundary(&self.buffer, b);
        self.selection = Selection::new(a, b);
    }

    pub fn select_all(&mut self) {
        self.selection = Selection::new(0, self.buffer.len());
    }

    /// Replace the selected text and leave the cursor after the insertion
    pub fn replace_selection(&mut self, text: &str) {
        let Selection { start, end } = self.selection;
        self.replace_range(start, end, text);
    }

    /// Splice `text` over `start..end` and leave the cursor after it
    pub fn replace_range(&mut self, start: usize, end: usize, text: &str) {
        let start = floor_char_boundary(&self.buffer, start);
        let end = floor_char_boundary(&self.buffer, end).max(start);
        self.buffer.replace_range(start..end, text);
        self.selection = Selection::cursor(start + text.len());
    }

    /// Restore an earlier buffer state (undo). The saved snapshot is untouched.
    pub fn restore(&mut self, buffer: String, selection: Selection) {
        self.buffer = buffer;
        self.set_selection(selection.start, selection.end);
    }

    /// Insert the current time and date at the selection
    pub fn insert_timestamp(&mut self, now: NaiveDateTime) {
        let stamp = now.format(TIMESTAMP_FORMAT).to_string();
        self.replace_selection(&stamp);
    }

    /// Start over with an empty, unassociated document
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.saved_snapshot.clear();
        self.file_path = None;
        self.selection = Selection::default();
    }

    /// Replace the session with freshly read file content
    pub fn load(&mut self, path: PathBuf, content: String) {
        self.saved_snapshot = content.clone();
        self.buffer = content;
        self.file_path = Some(path);
        self.selection = Selection::default();
    }

    /// Record that the buffer was written to the associated path
    pub fn mark_saved(&mut self) {
        self.saved_snapshot = self.buffer.clone();
    }

    /// Record that the buffer was written to a newly chosen path
    pub fn mark_saved_as(&mut self, path: PathBuf) {
        self.file_path = Some(path);
        self.mark_saved();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn session_with(text: &str) -> EditorSession {
        let mut session = EditorSession::new();
        session.replace_selection(text);
        session
    }

    #[test]
    fn test_new_session_is_clean_and_untitled() {
        let session = EditorSession::new();
        assert!(!session.is_dirty());
        assert_eq!(session.title(), "Untitled - Notepad");
        assert_eq!(session.status_text(), "Ln 1, Col 1");
        assert_eq!(session.file_path(), None);
    }

    #[test]
    fn test_dirty_tracks_content_not_edit_history() {
        let mut session = session_with("hello");
        assert!(session.is_dirty());
        assert_eq!(session.title(), "*Untitled - Notepad");

        // Editing back to the saved content clears the marker
        session.select_all();
        session.replace_selection("");
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_load_then_save_clears_dirty() {
        let mut session = EditorSession::new();
        session.load(PathBuf::from("/docs/notes.txt"), "first".into());
        assert!(!session.is_dirty());
        assert_eq!(session.title(), "notes.txt - Notepad");
        assert_eq!(session.selection(), Selection::cursor(0));

        session.set_selection(5, 5);
        session.replace_selection(" second");
        assert!(session.is_dirty());
        assert_eq!(session.title(), "*notes.txt - Notepad");

        session.mark_saved();
        assert!(!session.is_dirty());
        assert_eq!(session.buffer(), "first second");
    }

    #[test]
    fn test_save_as_sets_path_and_snapshot_together() {
        let mut session = session_with("draft");
        session.mark_saved_as(PathBuf::from("/tmp/draft.txt"));
        assert_eq!(session.file_path(), Some(Path::new("/tmp/draft.txt")));
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_reset_forgets_everything() {
        let mut session = EditorSession::new();
        session.load(PathBuf::from("a.txt"), "abc".into());
        session.set_selection(1, 2);
        session.reset();
        assert_eq!(session.buffer(), "");
        assert_eq!(session.file_path(), None);
        assert_eq!(session.selection(), Selection::default());
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_selection_is_clamped_and_ordered() {
        let mut session = session_with("héllo");
        session.set_selection(40, 1);
        assert_eq!(session.selection(), Selection { start: 1, end: 6 });

        // Offset 2 is inside 'é', snapped back to its start
        session.set_selection(2, 2);
        assert_eq!(session.selection(), Selection::cursor(1));
    }

    #[test]
    fn test_replace_selection_places_cursor_after_insert() {
        let mut session = session_with("one two");
        session.set_selection(4, 7);
        session.replace_selection("three");
        assert_eq!(session.buffer(), "one three");
        assert_eq!(session.selection(), Selection::cursor(9));
    }

    #[test]
    fn test_insert_timestamp_format() {
        let mut session = session_with("at ");
        let now = NaiveDate::from_ymd_opt(2026, 10, 6)
            .and_then(|d| d.and_hms_opt(15, 7, 0))
            .unwrap();
        session.insert_timestamp(now);
        assert_eq!(session.buffer(), "at 3:07 PM 10/6/2026");
        assert_eq!(session.selection(), Selection::cursor(session.buffer().len()));

        let mut session = EditorSession::new();
        let morning = NaiveDate::from_ymd_opt(2026, 1, 2)
            .and_then(|d| d.and_hms_opt(0, 5, 0))
            .unwrap();
        session.insert_timestamp(morning);
        assert_eq!(session.buffer(), "12:05 AM 1/2/2026");
    }

    #[test]
    fn test_restore_keeps_saved_snapshot() {
        let mut session = EditorSession::new();
        session.load(PathBuf::from("a.txt"), "abc".into());
        session.replace_selection("x");
        assert!(session.is_dirty());
        session.restore("abc".into(), Selection::cursor(0));
        assert!(!session.is_dirty());
    }
}
