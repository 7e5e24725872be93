//! Replace dialog.

use crate::input::InputEvent;
use crate::screen::Screen;
use crate::session::Direction;
use crate::ui::layout::Rect;
use crate::ui::modal::{ModalAction, ModalDialog, ModalResult};
use crate::ui::textfield::TextField;
use crate::ui::theme::Theme;

use super::{button_at, cycle_focus, draw_buttons, draw_check, draw_frame, toggle_hit};

const BUTTONS: [&str; 4] = ["Find Next", "Replace", "Replace All", "Cancel"];
const FIND_FIELD: usize = 0;
const REPLACE_FIELD: usize = 1;
const CASE: usize = 2;
const FIRST_BUTTON: usize = 3;
const CONTROLS: usize = 7;

pub struct ReplaceDialog {
    query: TextField,
    replacement: TextField,
    case_sensitive: bool,
    focus: usize,
}

impl ReplaceDialog {
    pub fn new(query: &str, replacement: &str, case_sensitive: bool) -> Self {
        Self {
            query: TextField::with_text(query),
            replacement: TextField::with_text(replacement),
            case_sensitive,
            focus: FIND_FIELD,
        }
    }

    fn field_col(area: Rect) -> u16 {
        area.x + 16
    }

    fn field_width(area: Rect) -> u16 {
        area.width.saturating_sub(18)
    }

    /// Run the button at `index`
    fn press(&self, index: usize) -> ModalResult {
        let query = self.query.text().to_string();
        if index == 3 {
            return ModalResult::Close;
        }
        if query.is_empty() {
            return ModalResult::Continue;
        }
        let replacement = self.replacement.text().to_string();
        let case_sensitive = self.case_sensitive;
        ModalResult::Apply(match index {
            0 => ModalAction::Find { query, case_sensitive, direction: Direction::Down },
            1 => ModalAction::Replace { query, replacement, case_sensitive },
            _ => ModalAction::ReplaceAll { query, replacement, case_sensitive },
        })
    }

    fn handle_click(&mut self, area: Rect, row: u16, col: u16) -> ModalResult {
        let field_col = Self::field_col(area);
        let width = Self::field_width(area) as usize;
        if row == area.y + 2 && col >= field_col {
            self.focus = FIND_FIELD;
            self.query.click((col - field_col) as usize, width);
        } else if row == area.y + 4 && col >= field_col {
            self.focus = REPLACE_FIELD;
            self.replacement.click((col - field_col) as usize, width);
        } else if row == area.y + 6 && toggle_hit(area.x + 2, "Match case", col) {
            self.focus = CASE;
            self.case_sensitive = !self.case_sensitive;
        } else if let Some(index) = button_at(area, &BUTTONS, area.y + 8, row, col) {
            self.focus = FIRST_BUTTON + index;
            return self.press(index);
        }
        ModalResult::Continue
    }
}

impl ModalDialog for ReplaceDialog {
    fn size(&self) -> (u16, u16) {
        (60, 11)
    }

    fn draw(&self, screen: &mut Screen, theme: &Theme, area: Rect) {
        draw_frame(screen, theme, area, "Replace");
        screen.set_cursor_visible(false);

        let field_col = Self::field_col(area);
        let width = Self::field_width(area);
        screen.write_str(area.y + 2, area.x + 2, "Find what:", theme.dialog_fg, theme.dialog_bg);
        self.query.draw(screen, theme, area.y + 2, field_col, width, self.focus == FIND_FIELD);
        screen.write_str(area.y + 4, area.x + 2, "Replace with:", theme.dialog_fg, theme.dialog_bg);
        self.replacement.draw(screen, theme, area.y + 4, field_col, width, self.focus == REPLACE_FIELD);

        draw_check(screen, theme, area.y + 6, area.x + 2, "Match case", self.case_sensitive, self.focus == CASE);

        draw_buttons(screen, theme, area, area.y + 8, &BUTTONS, self.focus.checked_sub(FIRST_BUTTON));
    }

    fn handle_event(&mut self, event: &InputEvent, area: Rect) -> ModalResult {
        if let Some(focus) = cycle_focus(self.focus, CONTROLS, event) {
            self.focus = focus;
            return ModalResult::Continue;
        }

        match event {
            InputEvent::Escape => return ModalResult::Close,
            InputEvent::Enter => {
                let index = self.focus.checked_sub(FIRST_BUTTON).unwrap_or(0);
                return self.press(index);
            }
            InputEvent::MouseClick { row, col } => return self.handle_click(area, *row, *col),
            _ => {}
        }

        match self.focus {
            FIND_FIELD => {
                self.query.handle_event(event);
            }
            REPLACE_FIELD => {
                self.replacement.handle_event(event);
            }
            CASE if *event == InputEvent::Char(' ') => self.case_sensitive = !self.case_sensitive,
            focus if focus >= FIRST_BUTTON && *event == InputEvent::Char(' ') => {
                return self.press(focus - FIRST_BUTTON);
            }
            _ => {}
        }
        ModalResult::Continue
    }

    fn title(&self) -> &str {
        "Replace"
    }
}
