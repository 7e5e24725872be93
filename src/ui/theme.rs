//! Colors for the light and dark look
//!
//! Every component draws from one `Theme` so that Dark Mode is a single
//! switch in the view settings.

use crate::terminal::Color;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Theme {
    // Main window
    pub desktop_bg: Color,
    pub window_border_fg: Color,
    pub window_border_bg: Color,
    pub title_fg: Color,
    pub title_bg: Color,
    pub text_fg: Color,
    pub text_bg: Color,
    pub selection_fg: Color,
    pub selection_bg: Color,

    // Menu colors
    pub menu_fg: Color,
    pub menu_bg: Color,
    pub menu_highlight_fg: Color,
    pub menu_highlight_bg: Color,
    pub menu_hotkey_fg: Color,
    pub menu_disabled_fg: Color,

    // Dialog/window colors
    pub dialog_fg: Color,
    pub dialog_bg: Color,
    pub dialog_title_fg: Color,
    pub dialog_title_bg: Color,
    pub dialog_shadow: bool,

    // Button colors
    pub button_fg: Color,
    pub button_bg: Color,
    pub button_focused_fg: Color,
    pub button_focused_bg: Color,

    // TextField and list colors
    pub field_fg: Color,
    pub field_bg: Color,
    pub field_focused_bg: Color,
    pub field_selection_fg: Color,
    pub field_selection_bg: Color,
    pub list_selected_fg: Color,
    pub list_selected_bg: Color,

    // Status bar colors
    pub statusbar_fg: Color,
    pub statusbar_bg: Color,
}

impl Theme {
    /// Windows 95 look: white paper, silver chrome, navy title bars
    pub fn light() -> Self {
        Self {
            desktop_bg: Color::Cyan,
            window_border_fg: Color::Black,
            window_border_bg: Color::Silver,
            title_fg: Color::White,
            title_bg: Color::Navy,
            text_fg: Color::Black,
            text_bg: Color::White,
            selection_fg: Color::White,
            selection_bg: Color::Navy,

            menu_fg: Color::Black,
            menu_bg: Color::Silver,
            menu_highlight_fg: Color::White,
            menu_highlight_bg: Color::Navy,
            menu_hotkey_fg: Color::Blue,
            menu_disabled_fg: Color::DarkGray,

            dialog_fg: Color::Black,
            dialog_bg: Color::Silver,
            dialog_title_fg: Color::White,
            dialog_title_bg: Color::Navy,
            dialog_shadow: true,

            button_fg: Color::Black,
            button_bg: Color::Silver,
            button_focused_fg: Color::White,
            button_focused_bg: Color::Navy,

            field_fg: Color::Black,
            field_bg: Color::White,
            field_focused_bg: Color::White,
            field_selection_fg: Color::White,
            field_selection_bg: Color::Navy,
            list_selected_fg: Color::White,
            list_selected_bg: Color::Navy,

            statusbar_fg: Color::Black,
            statusbar_bg: Color::Silver,
        }
    }

    pub fn dark() -> Self {
        Self {
            desktop_bg: Color::Black,
            window_border_fg: Color::LightGray,
            window_border_bg: Color::Charcoal,
            title_fg: Color::White,
            title_bg: Color::DarkGray,
            text_fg: Color::LightGray,
            text_bg: Color::Charcoal,
            selection_fg: Color::Black,
            selection_bg: Color::LightCyan,

            menu_fg: Color::LightGray,
            menu_bg: Color::DarkGray,
            menu_highlight_fg: Color::Black,
            menu_highlight_bg: Color::LightGray,
            menu_hotkey_fg: Color::LightCyan,
            menu_disabled_fg: Color::Black,

            dialog_fg: Color::LightGray,
            dialog_bg: Color::DarkGray,
            dialog_title_fg: Color::White,
            dialog_title_bg: Color::Black,
            dialog_shadow: true,

            button_fg: Color::LightGray,
            button_bg: Color::DarkGray,
            button_focused_fg: Color::Black,
            button_focused_bg: Color::LightGray,

            field_fg: Color::White,
            field_bg: Color::Charcoal,
            field_focused_bg: Color::Black,
            field_selection_fg: Color::Black,
            field_selection_bg: Color::LightCyan,
            list_selected_fg: Color::Black,
            list_selected_bg: Color::LightCyan,

            statusbar_fg: Color::LightGray,
            statusbar_bg: Color::DarkGray,
        }
    }

    pub fn for_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Self::dark()
        } else {
            Self::light()
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
