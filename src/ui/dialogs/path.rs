//! Open / Save As dialog
//!
//! A file name field over a listing of the current folder. Folders are
//! entered with Enter or by typing their name; choosing a file returns
//! its full path.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::input::InputEvent;
use crate::screen::Screen;
use crate::ui::layout::Rect;
use crate::ui::modal::{ModalAction, ModalDialog, ModalResult};
use crate::ui::textfield::TextField;
use crate::ui::theme::Theme;

use super::{button_at, cycle_focus, draw_buttons, draw_frame};

const LIST_ROWS: u16 = 10;
const FIELD: usize = 0;
const LIST: usize = 1;
const OK: usize = 2;
const CANCEL: usize = 3;

/// Whether the dialog picks a file to read or a destination to write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathDialogMode {
    Open,
    SaveAs,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    name: String,
    is_dir: bool,
}

impl Entry {
    fn label(&self) -> String {
        if self.is_dir {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// Folders first, then files, each sorted; hidden entries are skipped
fn list_dir(dir: &Path) -> Vec<Entry> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();
    match std::fs::read_dir(dir) {
        Ok(entries) => {
            for entry in entries.filter_map(|e| e.ok()) {
                let Ok(name) = entry.file_name().into_string() else {
                    continue;
                };
                if name.starts_with('.') {
                    continue;
                }
                if entry.path().is_dir() {
                    dirs.push(name);
                } else {
                    files.push(name);
                }
            }
        }
        Err(e) => debug!(dir = %dir.display(), error = %e, "cannot list folder"),
    }
    dirs.sort();
    files.sort();

    let mut listing = Vec::with_capacity(dirs.len() + files.len() + 1);
    if dir.parent().is_some() {
        listing.push(Entry { name: "..".to_string(), is_dir: true });
    }
    listing.extend(dirs.into_iter().map(|name| Entry { name, is_dir: true }));
    listing.extend(files.into_iter().map(|name| Entry { name, is_dir: false }));
    listing
}

/// Expand a leading `~` to the home directory
fn expand_home(input: &str) -> PathBuf {
    match input.strip_prefix("~/").or_else(|| (input == "~").then_some("")) {
        Some(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => PathBuf::from(input),
        },
        None => PathBuf::from(input),
    }
}

pub struct PathDialog {
    mode: PathDialogMode,
    dir: PathBuf,
    entries: Vec<Entry>,
    selected: usize,
    name: TextField,
    focus: usize,
}

impl PathDialog {
    pub fn new(mode: PathDialogMode, dir: PathBuf, file_name: &str) -> Self {
        let entries = list_dir(&dir);
        Self {
            mode,
            dir,
            entries,
            selected: 0,
            name: TextField::with_text(file_name),
            focus: FIELD,
        }
    }

    #[cfg(test)]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn ok_label(&self) -> &'static str {
        match self.mode {
            PathDialogMode::Open => "Open",
            PathDialogMode::SaveAs => "Save",
        }
    }

    fn navigate(&mut self, dir: PathBuf) {
        let dir = dir.canonicalize().unwrap_or(dir);
        debug!(dir = %dir.display(), "path dialog folder");
        self.entries = list_dir(&dir);
        self.dir = dir;
        self.selected = 0;
    }

    fn enter_selected(&mut self) -> ModalResult {
        let Some(entry) = self.entries.get(self.selected).cloned() else {
            return ModalResult::Continue;
        };
        if entry.is_dir {
            let target = if entry.name == ".." {
                self.dir.parent().map(Path::to_path_buf).unwrap_or_else(|| self.dir.clone())
            } else {
                self.dir.join(&entry.name)
            };
            self.navigate(target);
            ModalResult::Continue
        } else {
            self.name.set_text(entry.name);
            self.submit()
        }
    }

    fn submit(&mut self) -> ModalResult {
        let text = self.name.text().trim().to_string();
        if text.is_empty() {
            return ModalResult::Continue;
        }
        let mut path = self.dir.join(expand_home(&text));
        if path.is_dir() {
            self.name.set_text("");
            self.navigate(path);
            return ModalResult::Continue;
        }
        if self.mode == PathDialogMode::SaveAs && path.extension().is_none() {
            path.set_extension("txt");
        }
        ModalResult::Action(ModalAction::Path(path))
    }

    /// Keep the field in step with the highlighted file
    fn select(&mut self, index: usize) {
        self.selected = index.min(self.entries.len().saturating_sub(1));
        if let Some(entry) = self.entries.get(self.selected) {
            if !entry.is_dir {
                self.name.set_text(entry.name.clone());
            }
        }
    }

    fn top(&self) -> usize {
        (self.selected + 1).saturating_sub(LIST_ROWS as usize)
    }

    fn handle_list_key(&mut self, event: &InputEvent) -> ModalResult {
        let last = self.entries.len().saturating_sub(1);
        match event {
            InputEvent::CursorUp => self.select(self.selected.saturating_sub(1)),
            InputEvent::CursorDown => self.select((self.selected + 1).min(last)),
            InputEvent::PageUp => self.select(self.selected.saturating_sub(LIST_ROWS as usize)),
            InputEvent::PageDown => self.select(self.selected + LIST_ROWS as usize),
            InputEvent::Home => self.select(0),
            InputEvent::End => self.select(last),
            InputEvent::Backspace => {
                if let Some(parent) = self.dir.parent().map(Path::to_path_buf) {
                    self.navigate(parent);
                }
            }
            _ => {}
        }
        ModalResult::Continue
    }

    fn list_rect(area: Rect) -> Rect {
        Rect::new(area.x + 2, area.y + 4, area.width.saturating_sub(4), LIST_ROWS)
    }

    fn field_col(area: Rect) -> u16 {
        area.x + 13
    }

    fn buttons_row(area: Rect) -> u16 {
        area.y + 5 + LIST_ROWS
    }
}

impl ModalDialog for PathDialog {
    fn size(&self) -> (u16, u16) {
        (60, LIST_ROWS + 7)
    }

    fn draw(&self, screen: &mut Screen, theme: &Theme, area: Rect) {
        draw_frame(screen, theme, area, self.title());
        screen.set_cursor_visible(false);

        screen.write_str(area.y + 2, area.x + 2, "File name:", theme.dialog_fg, theme.dialog_bg);
        let field_width = area.width.saturating_sub(15);
        self.name.draw(screen, theme, area.y + 2, Self::field_col(area), field_width, self.focus == FIELD);

        // Keep the tail of long folder paths
        let folder = self.dir.display().to_string();
        let room = area.width.saturating_sub(12) as usize;
        let skip = folder.chars().count().saturating_sub(room);
        let folder: String = folder.chars().skip(skip).collect();
        screen.write_str(area.y + 3, area.x + 2, "Folder:", theme.dialog_fg, theme.dialog_bg);
        screen.write_str(area.y + 3, area.x + 10, &folder, theme.dialog_fg, theme.dialog_bg);

        let list = Self::list_rect(area);
        let top = self.top();
        for r in 0..list.height {
            let index = top + r as usize;
            let selected = index == self.selected;
            let (fg, bg) = match (selected, self.focus == LIST) {
                (true, true) => (theme.list_selected_fg, theme.list_selected_bg),
                (true, false) => (theme.field_selection_fg, theme.field_selection_bg),
                _ => (theme.field_fg, theme.field_bg),
            };
            screen.fill(list.y + r, list.x, list.width, 1, ' ', fg, bg);
            if let Some(entry) = self.entries.get(index) {
                let label: String = entry.label().chars().take(list.width as usize).collect();
                screen.write_str(list.y + r, list.x, &label, fg, bg);
            }
        }

        let labels = [self.ok_label(), "Cancel"];
        draw_buttons(screen, theme, area, Self::buttons_row(area), &labels, self.focus.checked_sub(OK));
    }

    fn handle_event(&mut self, event: &InputEvent, area: Rect) -> ModalResult {
        if let Some(focus) = cycle_focus(self.focus, 4, event) {
            self.focus = focus;
            return ModalResult::Continue;
        }

        match event {
            InputEvent::Escape => return ModalResult::Close,
            InputEvent::Enter => {
                return match self.focus {
                    LIST => self.enter_selected(),
                    CANCEL => ModalResult::Close,
                    _ => self.submit(),
                };
            }
            InputEvent::MouseClick { row, col } => {
                let list = Self::list_rect(area);
                if list.contains(*row, *col) {
                    let index = self.top() + (row - list.y) as usize;
                    if index < self.entries.len() {
                        let again = self.focus == LIST && index == self.selected;
                        self.focus = LIST;
                        self.select(index);
                        // A second click on the same row opens it
                        if again {
                            return self.enter_selected();
                        }
                    }
                    return ModalResult::Continue;
                }
                if *row == area.y + 2 && *col >= Self::field_col(area) {
                    self.focus = FIELD;
                    let width = area.width.saturating_sub(15) as usize;
                    self.name.click((col - Self::field_col(area)) as usize, width);
                    return ModalResult::Continue;
                }
                let labels = [self.ok_label(), "Cancel"];
                return match button_at(area, &labels, Self::buttons_row(area), *row, *col) {
                    Some(0) => self.submit(),
                    Some(_) => ModalResult::Close,
                    None => ModalResult::Continue,
                };
            }
            InputEvent::ScrollUp { .. } if self.focus == LIST => {
                return self.handle_list_key(&InputEvent::CursorUp);
            }
            InputEvent::ScrollDown { .. } if self.focus == LIST => {
                return self.handle_list_key(&InputEvent::CursorDown);
            }
            _ => {}
        }

        match self.focus {
            FIELD => {
                self.name.handle_event(event);
                ModalResult::Continue
            }
            LIST => self.handle_list_key(event),
            _ => ModalResult::Continue,
        }
    }

    fn title(&self) -> &str {
        match self.mode {
            PathDialogMode::Open => "Open",
            PathDialogMode::SaveAs => "Save As",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn area() -> Rect {
        Rect::new(1, 1, 60, 17)
    }

    fn folder() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join(".hidden"), "h").unwrap();
        dir
    }

    fn names(dialog: &PathDialog) -> Vec<String> {
        dialog.entries.iter().map(Entry::label).collect()
    }

    #[test]
    fn test_listing_order() {
        let dir = folder();
        let dialog = PathDialog::new(PathDialogMode::Open, dir.path().to_path_buf(), "");
        assert_eq!(names(&dialog), vec!["../", "sub/", "a.txt", "b.txt"]);
    }

    #[test]
    fn test_typed_name_joins_folder() {
        let dir = folder();
        let mut dialog = PathDialog::new(PathDialogMode::Open, dir.path().to_path_buf(), "b.txt");
        assert_eq!(
            dialog.handle_event(&InputEvent::Enter, area()),
            ModalResult::Action(ModalAction::Path(dir.path().join("b.txt")))
        );
    }

    #[test]
    fn test_save_as_adds_txt_extension() {
        let dir = folder();
        let mut dialog = PathDialog::new(PathDialogMode::SaveAs, dir.path().to_path_buf(), "notes");
        assert_eq!(
            dialog.handle_event(&InputEvent::Enter, area()),
            ModalResult::Action(ModalAction::Path(dir.path().join("notes.txt")))
        );
    }

    #[test]
    fn test_list_enters_folder_and_picks_file() {
        let dir = folder();
        fs::write(dir.path().join("sub").join("inner.txt"), "i").unwrap();
        let mut dialog = PathDialog::new(PathDialogMode::Open, dir.path().to_path_buf(), "");
        dialog.handle_event(&InputEvent::Tab, area());
        dialog.handle_event(&InputEvent::CursorDown, area());
        assert_eq!(dialog.handle_event(&InputEvent::Enter, area()), ModalResult::Continue);
        assert!(dialog.dir().ends_with("sub"));
        assert_eq!(names(&dialog), vec!["../", "inner.txt"]);

        dialog.handle_event(&InputEvent::CursorDown, area());
        assert_eq!(dialog.name.text(), "inner.txt");
        match dialog.handle_event(&InputEvent::Enter, area()) {
            ModalResult::Action(ModalAction::Path(path)) => assert!(path.ends_with("sub/inner.txt")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_typing_folder_name_navigates() {
        let dir = folder();
        let mut dialog = PathDialog::new(PathDialogMode::SaveAs, dir.path().to_path_buf(), "sub");
        assert_eq!(dialog.handle_event(&InputEvent::Enter, area()), ModalResult::Continue);
        assert!(dialog.dir().ends_with("sub"));
        assert_eq!(dialog.name.text(), "");
    }

    #[test]
    fn test_empty_name_stays_open() {
        let dir = folder();
        let mut dialog = PathDialog::new(PathDialogMode::Open, dir.path().to_path_buf(), "");
        assert_eq!(dialog.handle_event(&InputEvent::Enter, area()), ModalResult::Continue);
        assert_eq!(dialog.handle_event(&InputEvent::Escape, area()), ModalResult::Close);
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("plain.txt"), PathBuf::from("plain.txt"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/notes.txt"), home.join("notes.txt"));
        }
    }
}
