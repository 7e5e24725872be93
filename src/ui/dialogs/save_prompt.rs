//! "Do you want to save changes?" prompt.

use crate::host::PromptChoice;
use crate::input::InputEvent;
use crate::screen::Screen;
use crate::ui::layout::Rect;
use crate::ui::modal::{ModalAction, ModalDialog, ModalResult};
use crate::ui::theme::Theme;

use super::{button_at, cycle_focus, draw_buttons, draw_frame};

const BUTTONS: [&str; 3] = ["Save", "Don't Save", "Cancel"];
const CHOICES: [PromptChoice; 3] = [PromptChoice::Save, PromptChoice::DontSave, PromptChoice::Cancel];

pub struct SavePromptDialog {
    message: String,
    focus: usize,
}

impl SavePromptDialog {
    pub fn new(display_name: &str) -> Self {
        Self {
            message: format!("Do you want to save changes to {}?", display_name),
            focus: 0,
        }
    }

    fn choose(index: usize) -> ModalResult {
        ModalResult::Action(ModalAction::Prompt(CHOICES[index]))
    }
}

impl ModalDialog for SavePromptDialog {
    fn size(&self) -> (u16, u16) {
        let width = (self.message.chars().count() as u16 + 6).max(40);
        (width, 7)
    }

    fn draw(&self, screen: &mut Screen, theme: &Theme, area: Rect) {
        draw_frame(screen, theme, area, "Notepad");
        screen.set_cursor_visible(false);
        let text: String = self.message.chars().take(area.width.saturating_sub(4) as usize).collect();
        screen.write_str(area.y + 2, area.x + 3, &text, theme.dialog_fg, theme.dialog_bg);
        draw_buttons(screen, theme, area, area.y + 4, &BUTTONS, Some(self.focus));
    }

    fn handle_event(&mut self, event: &InputEvent, area: Rect) -> ModalResult {
        if let Some(focus) = cycle_focus(self.focus, BUTTONS.len(), event) {
            self.focus = focus;
            return ModalResult::Continue;
        }
        match event {
            InputEvent::CursorLeft => {
                self.focus = self.focus.saturating_sub(1);
                ModalResult::Continue
            }
            InputEvent::CursorRight => {
                self.focus = (self.focus + 1).min(BUTTONS.len() - 1);
                ModalResult::Continue
            }
            InputEvent::Enter | InputEvent::Char(' ') => Self::choose(self.focus),
            InputEvent::Char('s') | InputEvent::Char('S') => Self::choose(0),
            InputEvent::Char('n') | InputEvent::Char('N') => Self::choose(1),
            InputEvent::Escape => ModalResult::Close,
            InputEvent::MouseClick { row, col } => match button_at(area, &BUTTONS, area.y + 4, *row, *col) {
                Some(index) => Self::choose(index),
                None => ModalResult::Continue,
            },
            _ => ModalResult::Continue,
        }
    }

    fn title(&self) -> &str {
        "Save changes"
    }
}
