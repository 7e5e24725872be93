//! Application state management

use crate::config::{Config, FontConfig};

/// Which component receives keyboard input
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Focus {
    Editor,
    Menu,
    Dialog,
}

/// Format and View menu settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewSettings {
    pub word_wrap: bool,
    pub dark_mode: bool,
    pub status_bar: bool,
    pub font: FontConfig,
}

impl ViewSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            word_wrap: config.view.word_wrap,
            dark_mode: config.view.dark_mode,
            status_bar: config.view.status_bar,
            font: config.font.clone(),
        }
    }
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Main application state
pub struct AppState {
    /// Currently focused component
    pub focus: Focus,

    /// Menu bar open
    pub menu_open: bool,

    /// Currently selected menu
    pub menu_index: usize,

    /// Currently selected menu item
    pub menu_item: usize,

    /// Format/View settings
    pub view: ViewSettings,

    /// Transient status message
    pub status_message: Option<String>,

    /// Title last pushed to the terminal
    pub terminal_title: String,

    /// Left button held inside the text area
    pub mouse_selecting: bool,

    /// Should the application quit
    pub should_quit: bool,
}

impl AppState {
    pub fn new(view: ViewSettings) -> Self {
        Self {
            focus: Focus::Editor,
            menu_open: false,
            menu_index: 0,
            menu_item: 0,
            view,
            status_message: None,
            terminal_title: String::new(),
            mouse_selecting: false,
            should_quit: false,
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn open_menu(&mut self, index: usize) {
        self.menu_open = true;
        self.menu_index = index;
        self.menu_item = 0;
        self.focus = Focus::Menu;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
        self.focus = Focus::Editor;
    }

    pub fn focus_dialog(&mut self) {
        self.menu_open = false;
        self.focus = Focus::Dialog;
    }

    pub fn focus_editor(&mut self) {
        self.focus = Focus::Editor;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ViewSettings::default())
    }
}
