//! Dialog components
//!
//! Each dialog is a self-contained struct that owns its state and handles
//! its own drawing and event handling through `ModalDialog`. The helpers
//! here draw the shared chrome: frame, buttons, check boxes and radios.

mod find;
mod font;
mod goto;
mod message;
mod path;
mod replace;
mod save_prompt;

pub use find::FindDialog;
pub use font::FontDialog;
pub use goto::GoToDialog;
pub use message::MessageDialog;
pub use path::{PathDialog, PathDialogMode};
pub use replace::ReplaceDialog;
pub use save_prompt::SavePromptDialog;

use crate::input::InputEvent;
use crate::screen::Screen;
use super::layout::Rect;
use super::theme::Theme;

/// Frame with a centered title and drop shadow
pub(crate) fn draw_frame(screen: &mut Screen, theme: &Theme, area: Rect, title: &str) {
    screen.draw_box(area.y, area.x, area.width, area.height, theme.dialog_fg, theme.dialog_bg);
    if theme.dialog_shadow {
        screen.draw_shadow(area.y, area.x, area.width, area.height);
    }
    let title = format!(" {} ", title);
    let x = area.x + area.width.saturating_sub(title.chars().count() as u16) / 2;
    screen.write_str(area.y, x, &title, theme.dialog_title_fg, theme.dialog_title_bg);
}

fn button_text(label: &str) -> String {
    format!("< {} >", label)
}

/// Column and width of each button in a centered row
pub(crate) fn button_positions(area: Rect, labels: &[&str]) -> Vec<(u16, u16)> {
    let widths: Vec<u16> = labels.iter().map(|l| button_text(l).chars().count() as u16).collect();
    let total = widths.iter().sum::<u16>() + 2 * widths.len().saturating_sub(1) as u16;
    let mut col = area.x + area.width.saturating_sub(total) / 2;
    widths
        .into_iter()
        .map(|width| {
            let pos = (col, width);
            col += width + 2;
            pos
        })
        .collect()
}

/// Draw a row of buttons. `focused` is the index of the focused button, if any.
pub(crate) fn draw_buttons(screen: &mut Screen, theme: &Theme, area: Rect, row: u16, labels: &[&str], focused: Option<usize>) {
    for (i, (col, _)) in button_positions(area, labels).into_iter().enumerate() {
        let (fg, bg) = if focused == Some(i) {
            (theme.button_focused_fg, theme.button_focused_bg)
        } else {
            (theme.button_fg, theme.button_bg)
        };
        screen.write_str(row, col, &button_text(labels[i]), fg, bg);
    }
}

/// Which button of a row is under a click
pub(crate) fn button_at(area: Rect, labels: &[&str], buttons_row: u16, row: u16, col: u16) -> Option<usize> {
    if row != buttons_row {
        return None;
    }
    button_positions(area, labels)
        .into_iter()
        .position(|(start, width)| col >= start && col < start + width)
}

pub(crate) fn draw_check(screen: &mut Screen, theme: &Theme, row: u16, col: u16, label: &str, checked: bool, focused: bool) {
    let mark = if checked { 'X' } else { ' ' };
    let fg = if focused { theme.dialog_title_fg } else { theme.dialog_fg };
    let bg = if focused { theme.dialog_title_bg } else { theme.dialog_bg };
    screen.write_str(row, col, &format!("[{}] {}", mark, label), fg, bg);
}

pub(crate) fn draw_radio(screen: &mut Screen, theme: &Theme, row: u16, col: u16, label: &str, selected: bool, focused: bool) {
    let mark = if selected { '•' } else { ' ' };
    let fg = if focused { theme.dialog_title_fg } else { theme.dialog_fg };
    let bg = if focused { theme.dialog_title_bg } else { theme.dialog_bg };
    screen.write_str(row, col, &format!("({}) {}", mark, label), fg, bg);
}

/// Whether a click at `col` hits a check box or radio drawn at `start`
pub(crate) fn toggle_hit(start: u16, label: &str, col: u16) -> bool {
    col >= start && col < start + 4 + label.chars().count() as u16
}

/// Tab and Shift+Tab focus movement over `count` controls
pub(crate) fn cycle_focus(focus: usize, count: usize, event: &InputEvent) -> Option<usize> {
    match event {
        InputEvent::Tab => Some((focus + 1) % count),
        InputEvent::ShiftTab => Some((focus + count - 1) % count),
        _ => None,
    }
}
