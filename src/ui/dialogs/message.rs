//! Message dialog, also used for About.

use crate::input::InputEvent;
use crate::screen::Screen;
use crate::ui::layout::Rect;
use crate::ui::modal::{ModalDialog, ModalResult};
use crate::ui::theme::Theme;

use super::{button_at, draw_buttons, draw_frame};

const BUTTONS: [&str; 1] = ["OK"];

pub struct MessageDialog {
    title: String,
    lines: Vec<String>,
}

impl MessageDialog {
    pub fn new(title: impl Into<String>, text: &str) -> Self {
        Self {
            title: title.into(),
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    pub fn about() -> Self {
        let text = format!(
            "Notepad {}\n\nA plain text editor for the terminal.\n\nFile, Edit, Format and View menus work\nthe way you expect from Notepad.",
            env!("CARGO_PKG_VERSION")
        );
        Self::new("About Notepad", &text)
    }

    fn buttons_row(&self, area: Rect) -> u16 {
        area.y + area.height - 2
    }
}

impl ModalDialog for MessageDialog {
    fn size(&self) -> (u16, u16) {
        let longest = self.lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u16;
        let width = (longest + 6).max(self.title.chars().count() as u16 + 8).max(30);
        (width, self.lines.len() as u16 + 6)
    }

    fn draw(&self, screen: &mut Screen, theme: &Theme, area: Rect) {
        draw_frame(screen, theme, area, &self.title);
        screen.set_cursor_visible(false);
        let inner_width = area.width.saturating_sub(6) as usize;
        for (i, line) in self.lines.iter().enumerate() {
            let row = area.y + 2 + i as u16;
            if row >= self.buttons_row(area) {
                break;
            }
            let text: String = line.chars().take(inner_width).collect();
            screen.write_str(row, area.x + 3, &text, theme.dialog_fg, theme.dialog_bg);
        }
        draw_buttons(screen, theme, area, self.buttons_row(area), &BUTTONS, Some(0));
    }

    fn handle_event(&mut self, event: &InputEvent, area: Rect) -> ModalResult {
        match event {
            InputEvent::Enter | InputEvent::Escape | InputEvent::Char(' ') => ModalResult::Close,
            InputEvent::MouseClick { row, col } => match button_at(area, &BUTTONS, self.buttons_row(area), *row, *col) {
                Some(_) => ModalResult::Close,
                None => ModalResult::Continue,
            },
            _ => ModalResult::Continue,
        }
    }

    fn title(&self) -> &str {
        &self.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_fits_text() {
        let dialog = MessageDialog::new("Notepad", "Cannot find \"cat\"");
        assert_eq!(dialog.size(), (30, 7));
        let long = MessageDialog::new("Notepad", &"x".repeat(40));
        assert_eq!(long.size().0, 46);
    }

    #[test]
    fn test_closes_on_enter() {
        let mut dialog = MessageDialog::about();
        let area = Rect::new(1, 1, 46, 11);
        assert_eq!(dialog.handle_event(&InputEvent::Char('x'), area), ModalResult::Continue);
        assert_eq!(dialog.handle_event(&InputEvent::Enter, area), ModalResult::Close);
    }
}
