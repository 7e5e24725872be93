//! Find dialog.

use crate::input::InputEvent;
use crate::screen::Screen;
use crate::session::Direction;
use crate::ui::layout::Rect;
use crate::ui::modal::{ModalAction, ModalDialog, ModalResult};
use crate::ui::textfield::TextField;
use crate::ui::theme::Theme;

use super::{button_at, cycle_focus, draw_buttons, draw_check, draw_frame, draw_radio, toggle_hit};

const BUTTONS: [&str; 2] = ["Find Next", "Cancel"];
const FIELD: usize = 0;
const CASE: usize = 1;
const DIRECTION: usize = 2;
const FIND_NEXT: usize = 3;
const CANCEL: usize = 4;
const CONTROLS: usize = 5;

pub struct FindDialog {
    query: TextField,
    case_sensitive: bool,
    direction: Direction,
    focus: usize,
}

impl FindDialog {
    pub fn new(query: &str, case_sensitive: bool, direction: Direction) -> Self {
        Self {
            query: TextField::with_text(query),
            case_sensitive,
            direction,
            focus: FIELD,
        }
    }

    fn submit(&self) -> ModalResult {
        if self.query.text().is_empty() {
            return ModalResult::Continue;
        }
        ModalResult::Apply(ModalAction::Find {
            query: self.query.text().to_string(),
            case_sensitive: self.case_sensitive,
            direction: self.direction,
        })
    }

    fn toggle_direction(&mut self) {
        self.direction = match self.direction {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        };
    }

    fn field_col(area: Rect) -> u16 {
        area.x + 13
    }

    fn field_width(area: Rect) -> u16 {
        area.width.saturating_sub(15)
    }

    fn handle_click(&mut self, area: Rect, row: u16, col: u16) -> ModalResult {
        if row == area.y + 2 && col >= Self::field_col(area) {
            self.focus = FIELD;
            self.query.click((col - Self::field_col(area)) as usize, Self::field_width(area) as usize);
        } else if row == area.y + 4 && toggle_hit(area.x + 2, "Match case", col) {
            self.focus = CASE;
            self.case_sensitive = !self.case_sensitive;
        } else if row == area.y + 4 && toggle_hit(area.x + 24, "Up", col) {
            self.focus = DIRECTION;
            self.direction = Direction::Up;
        } else if row == area.y + 4 && toggle_hit(area.x + 32, "Down", col) {
            self.focus = DIRECTION;
            self.direction = Direction::Down;
        } else {
            match button_at(area, &BUTTONS, area.y + 6, row, col) {
                Some(0) => return self.submit(),
                Some(_) => return ModalResult::Close,
                None => {}
            }
        }
        ModalResult::Continue
    }
}

impl ModalDialog for FindDialog {
    fn size(&self) -> (u16, u16) {
        (52, 9)
    }

    fn draw(&self, screen: &mut Screen, theme: &Theme, area: Rect) {
        draw_frame(screen, theme, area, "Find");
        screen.set_cursor_visible(false);

        screen.write_str(area.y + 2, area.x + 2, "Find what:", theme.dialog_fg, theme.dialog_bg);
        self.query.draw(
            screen,
            theme,
            area.y + 2,
            Self::field_col(area),
            Self::field_width(area),
            self.focus == FIELD,
        );

        draw_check(screen, theme, area.y + 4, area.x + 2, "Match case", self.case_sensitive, self.focus == CASE);
        screen.write_str(area.y + 4, area.x + 18, "Dir:", theme.dialog_fg, theme.dialog_bg);
        let dir_focused = self.focus == DIRECTION;
        draw_radio(screen, theme, area.y + 4, area.x + 24, "Up", self.direction == Direction::Up, dir_focused);
        draw_radio(screen, theme, area.y + 4, area.x + 32, "Down", self.direction == Direction::Down, dir_focused);

        let focused_button = self.focus.checked_sub(FIND_NEXT);
        draw_buttons(screen, theme, area, area.y + 6, &BUTTONS, focused_button);
    }

    fn handle_event(&mut self, event: &InputEvent, area: Rect) -> ModalResult {
        if let Some(focus) = cycle_focus(self.focus, CONTROLS, event) {
            self.focus = focus;
            return ModalResult::Continue;
        }

        match event {
            InputEvent::Escape => return ModalResult::Close,
            InputEvent::Enter if self.focus == CANCEL => return ModalResult::Close,
            InputEvent::Enter => return self.submit(),
            InputEvent::MouseClick { row, col } => return self.handle_click(area, *row, *col),
            _ => {}
        }

        match self.focus {
            FIELD => {
                self.query.handle_event(event);
            }
            CASE if *event == InputEvent::Char(' ') => self.case_sensitive = !self.case_sensitive,
            DIRECTION => match event {
                InputEvent::CursorUp | InputEvent::CursorLeft => self.direction = Direction::Up,
                InputEvent::CursorDown | InputEvent::CursorRight => self.direction = Direction::Down,
                InputEvent::Char(' ') => self.toggle_direction(),
                _ => {}
            },
            FIND_NEXT if *event == InputEvent::Char(' ') => return self.submit(),
            CANCEL if *event == InputEvent::Char(' ') => return ModalResult::Close,
            _ => {}
        }
        ModalResult::Continue
    }

    fn title(&self) -> &str {
        "Find"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> Rect {
        Rect::new(10, 5, 52, 9)
    }

    #[test]
    fn test_enter_applies_find_and_stays_open() {
        let mut dialog = FindDialog::new("", false, Direction::Down);
        for ch in "cat".chars() {
            dialog.handle_event(&InputEvent::Char(ch), area());
        }
        assert_eq!(
            dialog.handle_event(&InputEvent::Enter, area()),
            ModalResult::Apply(ModalAction::Find {
                query: "cat".into(),
                case_sensitive: false,
                direction: Direction::Down,
            })
        );
    }

    #[test]
    fn test_empty_query_does_nothing() {
        let mut dialog = FindDialog::new("", true, Direction::Up);
        assert_eq!(dialog.handle_event(&InputEvent::Enter, area()), ModalResult::Continue);
    }

    #[test]
    fn test_options_by_keyboard() {
        let mut dialog = FindDialog::new("x", false, Direction::Down);
        dialog.handle_event(&InputEvent::Tab, area());
        dialog.handle_event(&InputEvent::Char(' '), area());
        dialog.handle_event(&InputEvent::Tab, area());
        dialog.handle_event(&InputEvent::CursorUp, area());
        assert_eq!(
            dialog.handle_event(&InputEvent::Enter, area()),
            ModalResult::Apply(ModalAction::Find {
                query: "x".into(),
                case_sensitive: true,
                direction: Direction::Up,
            })
        );
    }

    #[test]
    fn test_escape_and_cancel_close() {
        let mut dialog = FindDialog::new("x", false, Direction::Down);
        assert_eq!(dialog.handle_event(&InputEvent::Escape, area()), ModalResult::Close);
        dialog.handle_event(&InputEvent::ShiftTab, area());
        assert_eq!(dialog.handle_event(&InputEvent::Enter, area()), ModalResult::Close);
    }

    #[test]
    fn test_click_toggles_case() {
        let mut dialog = FindDialog::new("x", false, Direction::Down);
        dialog.handle_event(&InputEvent::MouseClick { row: 9, col: 13 }, area());
        assert!(dialog.case_sensitive);
        assert_eq!(dialog.focus, CASE);
    }
}
