//! Find, Replace and Replace All
//!
//! Matching is literal. Without Match case both sides are folded one char
//! at a time with `to_lowercase`, keeping chars whose lowercase form is
//! more than one char (so `İ` only matches itself).

use super::{floor_char_boundary, EditorSession, Selection};
use crate::error::EditError;

/// Search direction of the Find dialog
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    Up,
    #[default]
    Down,
}

/// Parameters of the last Find, replayed by Find Next
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchParams {
    pub query: String,
    pub case_sensitive: bool,
    pub direction: Direction,
}

fn fold(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

fn chars_match(a: char, b: char, case_sensitive: bool) -> bool {
    a == b || (!case_sensitive && fold(a) == fold(b))
}

/// Byte length of the match of `needle` at the start of `haystack`
fn match_at(haystack: &str, needle: &str, case_sensitive: bool) -> Option<usize> {
    let mut hay = haystack.char_indices();
    for n in needle.chars() {
        let (_, h) = hay.next()?;
        if !chars_match(h, n, case_sensitive) {
            return None;
        }
    }
    Some(hay.next().map_or(haystack.len(), |(i, _)| i))
}

/// First match starting at or after `from`
pub(crate) fn find_forward(haystack: &str, needle: &str, from: usize, case_sensitive: bool) -> Option<(usize, usize)> {
    if needle.is_empty() || from > haystack.len() {
        return None;
    }
    let tail = &haystack[from..];
    if case_sensitive {
        return tail.find(needle).map(|i| (from + i, from + i + needle.len()));
    }
    tail.char_indices()
        .find_map(|(i, _)| match_at(&tail[i..], needle, false).map(|len| (from + i, from + i + len)))
}

/// Last match lying entirely before `limit`
pub(crate) fn find_backward(haystack: &str, needle: &str, limit: usize, case_sensitive: bool) -> Option<(usize, usize)> {
    if needle.is_empty() {
        return None;
    }
    let head = &haystack[..limit.min(haystack.len())];
    if case_sensitive {
        return head.rfind(needle).map(|i| (i, i + needle.len()));
    }
    head.char_indices()
        .rev()
        .find_map(|(i, _)| match_at(&head[i..], needle, false).map(|len| (i, i + len)))
}

fn texts_match(text: &str, query: &str, case_sensitive: bool) -> bool {
    match_at(text, query, case_sensitive) == Some(text.len())
}

impl EditorSession {
    /// Select the next match of `query`. An empty query does nothing and returns `Ok(None)`.
    ///
    /// Down searches from the end of the selection, Up takes the last match
    /// before its start. There is no wrap-around.
    pub fn find(&mut self, query: &str, case_sensitive: bool, direction: Direction) -> Result<Option<Selection>, EditError> {
        if query.is_empty() {
            return Ok(None);
        }
        self.last_search = Some(SearchParams {
            query: query.to_string(),
            case_sensitive,
            direction,
        });

        let found = match direction {
            Direction::Down => find_forward(&self.buffer, query, self.selection.end, case_sensitive),
            Direction::Up => find_backward(&self.buffer, query, self.selection.start, case_sensitive),
        };
        match found {
            Some((start, end)) => {
                self.selection = Selection { start, end };
                Ok(Some(self.selection))
            }
            None => {
                tracing::debug!(query, ?direction, "no match");
                Err(EditError::NotFound { query: query.to_string() })
            }
        }
    }

    /// Replay the last Find. `Ok(None)` means there was none and the Find dialog should open.
    pub fn find_next(&mut self) -> Result<Option<Selection>, EditError> {
        match self.last_search.clone() {
            Some(params) => self.find(&params.query, params.case_sensitive, params.direction),
            None => Ok(None),
        }
    }

    /// Replace the selection if it matches `query`, then find the next match downwards
    pub fn replace(&mut self, query: &str, replacement: &str, case_sensitive: bool) -> Result<Option<Selection>, EditError> {
        if query.is_empty() {
            return Ok(None);
        }
        if texts_match(self.selected_text(), query, case_sensitive) {
            let start = self.selection.start;
            self.buffer.replace_range(start..self.selection.end, replacement);
            self.selection = Selection { start, end: start + replacement.len() };
        }
        self.find(query, case_sensitive, Direction::Down)
    }

    /// Replace every non-overlapping match, left to right. Returns the count.
    pub fn replace_all(&mut self, query: &str, replacement: &str, case_sensitive: bool) -> usize {
        if query.is_empty() {
            return 0;
        }
        let mut replaced = String::with_capacity(self.buffer.len());
        let mut pos = 0;
        let mut count = 0;
        while let Some((start, end)) = find_forward(&self.buffer, query, pos, case_sensitive) {
            replaced.push_str(&self.buffer[pos..start]);
            replaced.push_str(replacement);
            pos = end;
            count += 1;
        }
        if count == 0 {
            return 0;
        }
        replaced.push_str(&self.buffer[pos..]);
        self.buffer = replaced;

        let cursor = floor_char_boundary(&self.buffer, self.selection.start);
        self.selection = Selection::cursor(cursor);
        tracing::debug!(query, count, "replaced all");
        count
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
    fn test_find_case_insensitive_steps_through_matches() {
        let mut session = session_with("abcABC");
        let found = session.find("abc", false, Direction::Down).unwrap();
        assert_eq!(found, Some(Selection { start: 0, end: 3 }));

        let found = session.find_next().unwrap();
        assert_eq!(found, Some(Selection { start: 3, end: 6 }));

        let err = session.find_next().unwrap_err();
        assert_eq!(err, EditError::NotFound { query: "abc".into() });
        assert_eq!(session.selection(), Selection { start: 3, end: 6 });
    }

    #[test]
    fn test_find_case_sensitive() {
        let mut session = session_with("abcABC");
        let found = session.find("ABC", true, Direction::Down).unwrap();
        assert_eq!(found, Some(Selection { start: 3, end: 6 }));
        session.set_selection(0, 0);
        assert!(session.find("aBc", true, Direction::Down).is_err());
    }

    #[test]
    fn test_find_does_not_wrap() {
        let mut session = session_with("needle hay");
        session.set_selection(3, 3);
        assert!(session.find("needle", false, Direction::Down).is_err());
        assert_eq!(session.selection(), Selection::cursor(3));
    }

    #[test]
    fn test_find_up_steps_strictly_left() {
        let mut session = session_with("ab ab ab");
        session.set_selection(8, 8);
        assert_eq!(session.find("ab", true, Direction::Up).unwrap(), Some(Selection { start: 6, end: 8 }));
        assert_eq!(session.find("ab", true, Direction::Up).unwrap(), Some(Selection { start: 3, end: 5 }));
        assert_eq!(session.find("ab", true, Direction::Up).unwrap(), Some(Selection { start: 0, end: 2 }));
        assert!(session.find("ab", true, Direction::Up).is_err());
    }

    #[test]
    fn test_find_up_after_single_match_does_not_reselect_it() {
        let mut session = session_with("say hello there");
        session.set_selection(1, 1);
        let found = session.find("hello", false, Direction::Down).unwrap();
        assert_eq!(found, Some(Selection { start: 4, end: 9 }));

        assert!(session.find("hello", false, Direction::Up).is_err());
        assert_eq!(session.selection(), Selection { start: 4, end: 9 });
    }

    #[test]
    fn test_failed_find_still_records_last_search() {
        let mut session = session_with("text");
        assert!(session.find("zzz", true, Direction::Up).is_err());
        assert_eq!(
            session.last_search(),
            Some(&SearchParams { query: "zzz".into(), case_sensitive: true, direction: Direction::Up })
        );
    }

    #[test]
    fn test_empty_query_is_ignored() {
        let mut session = session_with("text");
        assert_eq!(session.find("", false, Direction::Down), Ok(None));
        assert_eq!(session.last_search(), None);
        assert_eq!(session.find_next(), Ok(None));
        assert_eq!(session.replace_all("", "x", false), 0);
        assert_eq!(session.buffer(), "text");
    }

    #[test]
    fn test_find_with_multibyte_text() {
        let mut session = session_with("Grüße, GRÜSSE, grüße");
        let found = session.find("GRÜßE", false, Direction::Down).unwrap();
        assert_eq!(found, Some(Selection { start: 0, end: "Grüße".len() }));
        let found = session.find_next().unwrap().unwrap();
        assert_eq!(&session.buffer()[found.start..found.end], "grüße");
    }

    #[test]
    fn test_fold_keeps_multi_char_lowercase() {
        assert_eq!(fold('A'), 'a');
        assert_eq!(fold('Ü'), 'ü');
        assert_eq!(fold('İ'), 'İ');
        let mut session = session_with("İi");
        assert_eq!(session.find("i", false, Direction::Down).unwrap(), Some(Selection { start: 2, end: 3 }));
    }

    #[test]
    fn test_replace_current_then_advance() {
        let mut session = session_with("cat cat cat");
        session.find("cat", true, Direction::Down).unwrap();
        let next = session.replace("cat", "dog", true).unwrap();
        assert_eq!(session.buffer(), "dog cat cat");
        assert_eq!(next, Some(Selection { start: 4, end: 7 }));
        assert!(session.is_dirty());
    }

    #[test]
    fn test_replace_without_matching_selection_only_finds() {
        let mut session = session_with("cat cat");
        let next = session.replace("CAT", "dog", false).unwrap();
        assert_eq!(session.buffer(), "cat cat");
        assert_eq!(next, Some(Selection { start: 0, end: 3 }));
    }

    #[test]
    fn test_replace_last_match_reports_not_found() {
        let mut session = session_with("one cat");
        session.find("cat", true, Direction::Down).unwrap();
        let err = session.replace("cat", "dog", true).unwrap_err();
        assert_eq!(session.buffer(), "one dog");
        assert_eq!(err, EditError::NotFound { query: "cat".into() });
        assert_eq!(session.selection(), Selection { start: 4, end: 7 });
    }

    #[test]
    fn test_replace_all_counts_non_overlapping() {
        let mut session = session_with("aaa");
        assert_eq!(session.replace_all("a", "bb", true), 3);
        assert_eq!(session.buffer(), "bbbbbb");

        let mut session = session_with("aaaa");
        assert_eq!(session.replace_all("aa", "b", true), 2);
        assert_eq!(session.buffer(), "bb");
    }

    #[test]
    fn test_replace_all_keeps_literal_replacement_case() {
        let mut session = session_with("Foo foo FOO");
        assert_eq!(session.replace_all("foo", "bar", false), 3);
        assert_eq!(session.buffer(), "bar bar bar");
    }

    #[test]
    fn test_replace_all_absent_query_is_noop() {
        let mut session = session_with("unchanged");
        session.set_selection(2, 4);
        assert_eq!(session.replace_all("zzz", "x", false), 0);
        assert_eq!(session.buffer(), "unchanged");
        assert_eq!(session.selection(), Selection { start: 2, end: 4 });
    }

    #[test]
    fn test_replace_all_collapses_selection_inside_buffer() {
        let mut session = session_with("long long long");
        session.set_selection(12, 14);
        assert_eq!(session.replace_all("long", "x", true), 3);
        assert_eq!(session.buffer(), "x x x");
        assert_eq!(session.selection(), Selection::cursor(5));
    }
}
