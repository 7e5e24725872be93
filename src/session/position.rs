//! Go To line and cursor position for the status bar

use std::fmt;

use super::{EditorSession, Selection};
use crate::error::EditError;

/// 1-based line and column of a buffer offset
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ln {}, Col {}", self.line, self.column)
    }
}

/// Line and column of `offset`; the column counts chars, not bytes
pub fn position_at(text: &str, offset: usize) -> Position {
    let before = &text[..offset.min(text.len())];
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    Position {
        line: before.matches('\n').count() + 1,
        column: before[line_start..].chars().count() + 1,
    }
}

impl EditorSession {
    pub fn line_count(&self) -> usize {
        self.buffer.matches('\n').count() + 1
    }

    /// Put the cursor at the start of a 1-based line.
    ///
    /// Line 0 is ignored (`Ok(None)`); a line past the end is an error and
    /// leaves the selection alone.
    pub fn go_to_line(&mut self, line: usize) -> Result<Option<usize>, EditError> {
        if line < 1 {
            return Ok(None);
        }
        let total = self.line_count();
        if line > total {
            return Err(EditError::InvalidLineNumber { line, total });
        }
        let offset = self.buffer.split('\n').take(line - 1).map(|l| l.len() + 1).sum();
        self.selection = Selection::cursor(offset);
        Ok(Some(offset))
    }

    /// Position of the selection start
    pub fn current_position(&self) -> Position {
        position_at(&self.buffer, self.selection.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn session_with(text: &str) -> EditorSession {
        let mut session = EditorSession::new();
        session.replace_selection(text);
        session.set_selection(0, 0);
        session
    }

    #[test]
    fn test_go_to_line() {
        let mut session = session_with("one\ntwo\nthree");
        assert_eq!(session.go_to_line(2), Ok(Some(4)));
        assert_eq!(session.selection(), Selection::cursor(4));

        let err = session.go_to_line(4).unwrap_err();
        assert_eq!(err, EditError::InvalidLineNumber { line: 4, total: 3 });
        assert_eq!(session.selection(), Selection::cursor(4));

        assert!(matches!(session.go_to_line(usize::MAX), Err(EditError::InvalidLineNumber { .. })));
        assert_eq!(session.selection(), Selection::cursor(4));

        assert_eq!(session.go_to_line(3), Ok(Some(8)));
        assert_eq!(session.go_to_line(1), Ok(Some(0)));
    }

    #[test]
    fn test_go_to_line_zero_is_ignored() {
        let mut session = session_with("a\nb");
        session.set_selection(2, 3);
        assert_eq!(session.go_to_line(0), Ok(None));
        assert_eq!(session.selection(), Selection { start: 2, end: 3 });
    }

    #[test]
    fn test_trailing_newline_adds_a_line() {
        let mut session = session_with("last\n");
        assert_eq!(session.line_count(), 2);
        assert_eq!(session.go_to_line(2), Ok(Some(5)));
        assert_eq!(EditorSession::new().line_count(), 1);
    }

    #[test]
    fn test_current_position() {
        let mut session = session_with("one\ntwo\nthree");
        assert_eq!(session.current_position(), Position { line: 1, column: 1 });
        session.set_selection(6, 6);
        assert_eq!(session.current_position(), Position { line: 2, column: 3 });
        session.set_selection(13, 13);
        assert_eq!(session.status_text(), "Ln 3, Col 6");
    }

    #[test]
    fn test_position_uses_selection_start() {
        let mut session = session_with("ab\ncd");
        session.set_selection(4, 1);
        assert_eq!(session.current_position(), Position { line: 1, column: 2 });
    }

    #[test]
    fn test_column_counts_chars() {
        assert_eq!(position_at("naïve", "naïve".len()), Position { line: 1, column: 6 });
    }
}
