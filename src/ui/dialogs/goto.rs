//! Go To Line dialog.

use std::num::IntErrorKind;

use crate::input::InputEvent;
use crate::screen::Screen;
use crate::ui::layout::Rect;
use crate::ui::modal::{ModalAction, ModalDialog, ModalResult};
use crate::ui::textfield::TextField;
use crate::ui::theme::Theme;

use super::{button_at, cycle_focus, draw_buttons, draw_frame};

const BUTTONS: [&str; 2] = ["Go To", "Cancel"];
const FIELD: usize = 0;
const GO: usize = 1;
const CANCEL: usize = 2;

pub struct GoToDialog {
    line: TextField,
    focus: usize,
}

impl GoToDialog {
    /// Dialog prefilled with the current line
    pub fn new(current_line: usize) -> Self {
        Self {
            line: TextField::with_text(current_line.to_string()).digits_only(),
            focus: FIELD,
        }
    }

    fn submit(&self) -> ModalResult {
        match self.line.text().parse::<usize>() {
            Ok(line) => ModalResult::Action(ModalAction::GoTo(line)),
            // Too many digits is still past the last line
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => ModalResult::Action(ModalAction::GoTo(usize::MAX)),
            Err(_) => ModalResult::Continue,
        }
    }
}

impl ModalDialog for GoToDialog {
    fn size(&self) -> (u16, u16) {
        (36, 8)
    }

    fn draw(&self, screen: &mut Screen, theme: &Theme, area: Rect) {
        draw_frame(screen, theme, area, "Go To Line");
        screen.set_cursor_visible(false);
        screen.write_str(area.y + 2, area.x + 2, "Line number:", theme.dialog_fg, theme.dialog_bg);
        self.line.draw(screen, theme, area.y + 3, area.x + 2, area.width.saturating_sub(4), self.focus == FIELD);
        draw_buttons(screen, theme, area, area.y + 5, &BUTTONS, self.focus.checked_sub(GO));
    }

    fn handle_event(&mut self, event: &InputEvent, area: Rect) -> ModalResult {
        if let Some(focus) = cycle_focus(self.focus, 3, event) {
            self.focus = focus;
            return ModalResult::Continue;
        }
        match event {
            InputEvent::Escape => ModalResult::Close,
            InputEvent::Enter if self.focus == CANCEL => ModalResult::Close,
            InputEvent::Enter => self.submit(),
            InputEvent::MouseClick { row, col } => {
                if *row == area.y + 3 {
                    self.focus = FIELD;
                    self.line.click(col.saturating_sub(area.x + 2) as usize, area.width.saturating_sub(4) as usize);
                    return ModalResult::Continue;
                }
                match button_at(area, &BUTTONS, area.y + 5, *row, *col) {
                    Some(0) => self.submit(),
                    Some(_) => ModalResult::Close,
                    None => ModalResult::Continue,
                }
            }
            _ => {
                if self.focus == FIELD {
                    self.line.handle_event(event);
                }
                ModalResult::Continue
            }
        }
    }

    fn title(&self) -> &str {
        "Go To Line"
    }
}
