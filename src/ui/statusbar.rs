//! Notepad status bar

use crate::screen::Screen;
use crate::state::AppState;
use super::layout::Rect;
use super::theme::Theme;

/// The status bar at the bottom of the screen (stateless)
pub struct StatusBar;

impl StatusBar {
    /// Status message on the left, cursor position and encoding on the right
    pub fn draw(screen: &mut Screen, state: &AppState, theme: &Theme, position: &str, bounds: Rect) {
        let (fg, bg) = (theme.statusbar_fg, theme.statusbar_bg);
        screen.fill(bounds.y, bounds.x, bounds.width, 1, ' ', fg, bg);

        let right_text = format!(" {}  │  UTF-8 ", position);
        let right_len = right_text.chars().count() as u16;
        let right_x = bounds.x + bounds.width.saturating_sub(right_len);

        if let Some(msg) = &state.status_message {
            let room = bounds.width.saturating_sub(right_len + 2) as usize;
            let msg: String = msg.chars().take(room).collect();
            screen.write_str(bounds.y, bounds.x + 1, &msg, fg, bg);
        }

        screen.set(bounds.y, right_x.saturating_sub(1), '│', fg, bg);
        screen.write_str(bounds.y, right_x, &right_text, fg, bg);
    }
}
