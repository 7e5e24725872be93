//! Notepad menu bar

use crate::input::InputEvent;
use crate::screen::Screen;
use crate::state::{AppState, ViewSettings};
use super::layout::Rect;
use super::theme::Theme;

/// What a menu item (or its shortcut) does
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuCommand {
    New,
    Open,
    Save,
    SaveAs,
    PageSetup,
    Print,
    Exit,
    Undo,
    Cut,
    Copy,
    Paste,
    Delete,
    Find,
    FindNext,
    Replace,
    GoTo,
    SelectAll,
    TimeDate,
    WordWrap,
    Font,
    DarkMode,
    StatusBar,
    About,
}

impl MenuCommand {
    /// Keyboard accelerator for a command, as listed in the menus
    pub fn from_shortcut(event: &InputEvent) -> Option<Self> {
        let command = match event {
            InputEvent::CtrlN => MenuCommand::New,
            InputEvent::CtrlO => MenuCommand::Open,
            InputEvent::CtrlS => MenuCommand::Save,
            InputEvent::CtrlShiftS | InputEvent::F12 => MenuCommand::SaveAs,
            InputEvent::CtrlP => MenuCommand::Print,
            InputEvent::CtrlQ | InputEvent::AltX => MenuCommand::Exit,
            InputEvent::CtrlZ => MenuCommand::Undo,
            InputEvent::CtrlX => MenuCommand::Cut,
            InputEvent::CtrlC => MenuCommand::Copy,
            InputEvent::CtrlV => MenuCommand::Paste,
            InputEvent::CtrlF => MenuCommand::Find,
            InputEvent::F3 => MenuCommand::FindNext,
            InputEvent::CtrlH => MenuCommand::Replace,
            InputEvent::CtrlG => MenuCommand::GoTo,
            InputEvent::CtrlA => MenuCommand::SelectAll,
            InputEvent::F5 => MenuCommand::TimeDate,
            _ => return None,
        };
        Some(command)
    }

    /// Check mark state for toggle items
    pub fn checked(self, view: &ViewSettings) -> Option<bool> {
        match self {
            MenuCommand::WordWrap => Some(view.word_wrap),
            MenuCommand::DarkMode => Some(view.dark_mode),
            MenuCommand::StatusBar => Some(view.status_bar),
            _ => None,
        }
    }
}

/// Menu item definition
#[derive(Clone, Debug)]
pub struct MenuItem {
    pub label: String,
    /// Accelerator letter, marked with `&` in the definition
    pub hotkey: Option<char>,
    pub shortcut: Option<String>,
    pub command: Option<MenuCommand>,
    pub enabled: bool,
    pub separator: bool,
}

impl MenuItem {
    pub fn new(label: &str, shortcut: Option<&str>, command: MenuCommand) -> Self {
        let (label, hotkey) = parse_hotkey(label);
        Self {
            label,
            hotkey,
            shortcut: shortcut.map(|s| s.to_string()),
            command: Some(command),
            enabled: true,
            separator: false,
        }
    }

    pub fn separator() -> Self {
        Self {
            label: String::new(),
            hotkey: None,
            shortcut: None,
            command: None,
            enabled: false,
            separator: true,
        }
    }

    fn selectable(&self) -> bool {
        !self.separator && self.enabled
    }
}

/// Split `"&Open..."` into `("Open...", Some('o'))`
fn parse_hotkey(label: &str) -> (String, Option<char>) {
    let mut hotkey = None;
    let mut clean = String::with_capacity(label.len());
    let mut chars = label.chars();
    while let Some(c) = chars.next() {
        if c == '&' {
            if let Some(next) = chars.next() {
                hotkey.get_or_insert(next.to_ascii_lowercase());
                clean.push(next);
            }
        } else {
            clean.push(c);
        }
    }
    (clean, hotkey)
}

/// Menu definition
#[derive(Clone, Debug)]
pub struct Menu {
    pub title: String,
    pub hotkey: char,
    pub items: Vec<MenuItem>,
}

impl Menu {
    pub fn new(title: &str, hotkey: char) -> Self {
        Self {
            title: title.to_string(),
            hotkey,
            items: Vec::new(),
        }
    }

    pub fn item(mut self, label: &str, shortcut: Option<&str>, command: MenuCommand) -> Self {
        self.items.push(MenuItem::new(label, shortcut, command));
        self
    }

    pub fn disabled_item(mut self, label: &str, command: MenuCommand) -> Self {
        let mut item = MenuItem::new(label, None, command);
        item.enabled = false;
        self.items.push(item);
        self
    }

    pub fn separator(mut self) -> Self {
        self.items.push(MenuItem::separator());
        self
    }

    /// Dropdown width including border, check column and shortcut column
    pub fn width(&self) -> u16 {
        let max_label = self.items.iter().map(|i| i.label.chars().count()).max().unwrap_or(10);
        let max_shortcut = self
            .items
            .iter()
            .filter_map(|i| i.shortcut.as_ref())
            .map(|s| s.chars().count())
            .max()
            .unwrap_or(0);
        (max_label + max_shortcut + 8).max(self.title.len() + 4) as u16
    }

    fn first_selectable(&self) -> usize {
        self.items.iter().position(MenuItem::selectable).unwrap_or(0)
    }
}

/// The menu bar component
pub struct MenuBar {
    pub menus: Vec<Menu>,
}

impl MenuBar {
    pub fn new() -> Self {
        Self {
            menus: vec![
                Menu::new("File", 'f')
                    .item("&New", Some("Ctrl+N"), MenuCommand::New)
                    .item("&Open...", Some("Ctrl+O"), MenuCommand::Open)
                    .item("&Save", Some("Ctrl+S"), MenuCommand::Save)
                    .item("Save &As...", Some("Ctrl+Shift+S"), MenuCommand::SaveAs)
                    .separator()
                    .disabled_item("Page Set&up...", MenuCommand::PageSetup)
                    .item("&Print...", Some("Ctrl+P"), MenuCommand::Print)
                    .separator()
                    .item("E&xit", None, MenuCommand::Exit),
                Menu::new("Edit", 'e')
                    .item("&Undo", Some("Ctrl+Z"), MenuCommand::Undo)
                    .separator()
                    .item("Cu&t", Some("Ctrl+X"), MenuCommand::Cut)
                    .item("&Copy", Some("Ctrl+C"), MenuCommand::Copy)
                    .item("&Paste", Some("Ctrl+V"), MenuCommand::Paste)
                    .item("De&lete", Some("Del"), MenuCommand::Delete)
                    .separator()
                    .item("&Find...", Some("Ctrl+F"), MenuCommand::Find)
                    .item("Find &Next", Some("F3"), MenuCommand::FindNext)
                    .item("&Replace...", Some("Ctrl+H"), MenuCommand::Replace)
                    .item("&Go To...", Some("Ctrl+G"), MenuCommand::GoTo)
                    .separator()
                    .item("Select &All", Some("Ctrl+A"), MenuCommand::SelectAll)
                    .item("Time/&Date", Some("F5"), MenuCommand::TimeDate),
                Menu::new("Format", 'o')
                    .item("&Word Wrap", None, MenuCommand::WordWrap)
                    .item("&Font...", None, MenuCommand::Font)
                    .item("&Dark Mode", None, MenuCommand::DarkMode),
                Menu::new("View", 'v').item("&Status Bar", None, MenuCommand::StatusBar),
                Menu::new("Help", 'h').item("&About Notepad", None, MenuCommand::About),
            ],
        }
    }

    /// Column where a menu title starts
    fn title_col(&self, index: usize) -> u16 {
        2 + self.menus[..index].iter().map(|m| m.title.len() as u16 + 2).sum::<u16>()
    }

    pub fn draw(&self, screen: &mut Screen, state: &AppState, theme: &Theme, bounds: Rect) {
        screen.fill(bounds.y, bounds.x, bounds.width, 1, ' ', theme.menu_fg, theme.menu_bg);

        for (i, menu) in self.menus.iter().enumerate() {
            let x = self.title_col(i);
            let selected = state.menu_open && state.menu_index == i;
            let (fg, bg) = if selected {
                (theme.menu_highlight_fg, theme.menu_highlight_bg)
            } else {
                (theme.menu_fg, theme.menu_bg)
            };

            screen.set(bounds.y, x - 1, ' ', fg, bg);
            for (j, ch) in menu.title.chars().enumerate() {
                let ch_fg = if j == 0 && !selected { theme.menu_hotkey_fg } else { fg };
                screen.set(bounds.y, x + j as u16, ch, ch_fg, bg);
            }
            screen.set(bounds.y, x + menu.title.len() as u16, ' ', fg, bg);
        }
    }

    /// Draw the open dropdown (call after other UI elements)
    pub fn draw_dropdown(&self, screen: &mut Screen, state: &AppState, theme: &Theme) {
        if !state.menu_open {
            return;
        }
        let menu = &self.menus[state.menu_index];
        let rect = self.dropdown_rect(state.menu_index);
        let (x, y, width) = (rect.x, rect.y, rect.width);

        screen.draw_box(y, x, width, rect.height, theme.menu_fg, theme.menu_bg);
        screen.draw_shadow(y, x, width, rect.height);

        for (i, item) in menu.items.iter().enumerate() {
            let row = y + 1 + i as u16;

            if item.separator {
                screen.set(row, x, '├', theme.menu_fg, theme.menu_bg);
                for c in 1..width - 1 {
                    screen.set(row, x + c, '─', theme.menu_fg, theme.menu_bg);
                }
                screen.set(row, x + width - 1, '┤', theme.menu_fg, theme.menu_bg);
                continue;
            }

            let selected = state.menu_item == i;
            let (fg, bg) = if selected {
                (theme.menu_highlight_fg, theme.menu_highlight_bg)
            } else if item.enabled {
                (theme.menu_fg, theme.menu_bg)
            } else {
                (theme.menu_disabled_fg, theme.menu_bg)
            };

            for c in 1..width - 1 {
                screen.set(row, x + c, ' ', fg, bg);
            }

            if item.command.and_then(|cmd| cmd.checked(&state.view)) == Some(true) {
                screen.set(row, x + 1, '✓', fg, bg);
            }

            let mut hotkey_drawn = false;
            for (j, ch) in item.label.chars().enumerate() {
                let is_hotkey = !hotkey_drawn && item.enabled && Some(ch.to_ascii_lowercase()) == item.hotkey;
                hotkey_drawn |= is_hotkey;
                let ch_fg = if is_hotkey && !selected { theme.menu_hotkey_fg } else { fg };
                screen.set(row, x + 3 + j as u16, ch, ch_fg, bg);
            }

            if let Some(shortcut) = &item.shortcut {
                let shortcut_x = x + width - 2 - shortcut.chars().count() as u16;
                screen.write_str(row, shortcut_x, shortcut, fg, bg);
            }
        }
    }

    fn dropdown_rect(&self, index: usize) -> Rect {
        let menu = &self.menus[index];
        Rect::new(self.title_col(index) - 1, 2, menu.width(), menu.items.len() as u16 + 2)
    }

    /// Which menu title is under a click on the menu bar row
    pub fn title_at(&self, col: u16) -> Option<usize> {
        (0..self.menus.len()).find(|&i| {
            let start = self.title_col(i) - 1;
            col >= start && col <= start + self.menus[i].title.len() as u16 + 1
        })
    }

    /// Handle a click while the menu is open or on the bar
    pub fn handle_click(&self, state: &mut AppState, row: u16, col: u16) -> Option<MenuAction> {
        if row == 1 {
            return match self.title_at(col) {
                Some(i) if state.menu_open && state.menu_index == i => {
                    state.close_menu();
                    Some(MenuAction::Close)
                }
                Some(i) => {
                    state.open_menu(i);
                    state.menu_item = self.menus[i].first_selectable();
                    Some(MenuAction::Navigate)
                }
                None => {
                    state.close_menu();
                    Some(MenuAction::Close)
                }
            };
        }
        if !state.menu_open {
            return None;
        }
        let rect = self.dropdown_rect(state.menu_index).inner();
        if rect.contains(row, col) {
            let index = (row - rect.y) as usize;
            let item = &self.menus[state.menu_index].items[index];
            if let (true, Some(command)) = (item.selectable(), item.command) {
                state.close_menu();
                return Some(MenuAction::Execute(command));
            }
            return Some(MenuAction::Navigate);
        }
        state.close_menu();
        Some(MenuAction::Close)
    }

    /// Handle menu navigation keys
    pub fn handle_input(&self, state: &mut AppState, event: &InputEvent) -> Option<MenuAction> {
        let menu = &self.menus[state.menu_index];
        match event {
            InputEvent::Escape | InputEvent::F10 => {
                state.close_menu();
                Some(MenuAction::Close)
            }
            InputEvent::Enter => {
                let item = &menu.items[state.menu_item];
                match (item.selectable(), item.command) {
                    (true, Some(command)) => {
                        state.close_menu();
                        Some(MenuAction::Execute(command))
                    }
                    _ => None,
                }
            }
            InputEvent::CursorUp => {
                for _ in 0..menu.items.len() {
                    state.menu_item = (state.menu_item + menu.items.len() - 1) % menu.items.len();
                    if !menu.items[state.menu_item].separator {
                        break;
                    }
                }
                Some(MenuAction::Navigate)
            }
            InputEvent::CursorDown => {
                for _ in 0..menu.items.len() {
                    state.menu_item = (state.menu_item + 1) % menu.items.len();
                    if !menu.items[state.menu_item].separator {
                        break;
                    }
                }
                Some(MenuAction::Navigate)
            }
            InputEvent::CursorLeft => {
                let index = (state.menu_index + self.menus.len() - 1) % self.menus.len();
                state.open_menu(index);
                state.menu_item = self.menus[index].first_selectable();
                Some(MenuAction::Navigate)
            }
            InputEvent::CursorRight => {
                let index = (state.menu_index + 1) % self.menus.len();
                state.open_menu(index);
                state.menu_item = self.menus[index].first_selectable();
                Some(MenuAction::Navigate)
            }
            InputEvent::Char(c) => {
                let c = c.to_ascii_lowercase();
                let item = menu.items.iter().find(|i| i.selectable() && i.hotkey == Some(c))?;
                let command = item.command?;
                state.close_menu();
                Some(MenuAction::Execute(command))
            }
            _ => None,
        }
    }
}

impl Default for MenuBar {
    fn default() -> Self {
        Self::new()
    }
}

/// Action result from menu interaction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Close,
    Navigate,
    Execute(MenuCommand),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_state(menu: usize) -> AppState {
        let mut state = AppState::default();
        state.open_menu(menu);
        state
    }

    #[test]
    fn test_parse_hotkey() {
        assert_eq!(parse_hotkey("Save &As..."), ("Save As...".to_string(), Some('a')));
        assert_eq!(parse_hotkey("Plain"), ("Plain".to_string(), None));
    }

    #[test]
    fn test_navigation_skips_separators() {
        let bar = MenuBar::new();
        let mut state = open_state(1);
        assert_eq!(bar.menus[1].items[state.menu_item].label, "Undo");
        bar.handle_input(&mut state, &InputEvent::CursorDown);
        assert_eq!(bar.menus[1].items[state.menu_item].label, "Cut");
        bar.handle_input(&mut state, &InputEvent::CursorUp);
        bar.handle_input(&mut state, &InputEvent::CursorUp);
        assert_eq!(bar.menus[1].items[state.menu_item].label, "Time/Date");
    }

    #[test]
    fn test_enter_executes_and_closes() {
        let bar = MenuBar::new();
        let mut state = open_state(0);
        let action = bar.handle_input(&mut state, &InputEvent::Enter);
        assert_eq!(action, Some(MenuAction::Execute(MenuCommand::New)));
        assert!(!state.menu_open);
    }

    #[test]
    fn test_hotkey_letter_executes() {
        let bar = MenuBar::new();
        let mut state = open_state(0);
        let action = bar.handle_input(&mut state, &InputEvent::Char('a'));
        assert_eq!(action, Some(MenuAction::Execute(MenuCommand::SaveAs)));

        // Disabled items do not respond to their letter
        let mut state = open_state(0);
        assert_eq!(bar.handle_input(&mut state, &InputEvent::Char('u')), None);
        assert!(state.menu_open);
    }

    #[test]
    fn test_left_wraps_to_last_menu() {
        let bar = MenuBar::new();
        let mut state = open_state(0);
        bar.handle_input(&mut state, &InputEvent::CursorLeft);
        assert_eq!(state.menu_index, 4);
        assert!(state.menu_open);
    }

    #[test]
    fn test_click_title_and_item() {
        let bar = MenuBar::new();
        let mut state = AppState::default();
        let edit_col = bar.title_col(1);
        assert_eq!(bar.handle_click(&mut state, 1, edit_col), Some(MenuAction::Navigate));
        assert!(state.menu_open);
        assert_eq!(state.menu_index, 1);

        // Third row of the dropdown is "Cut"
        let rect = bar.dropdown_rect(1).inner();
        let action = bar.handle_click(&mut state, rect.y + 2, rect.x + 2);
        assert_eq!(action, Some(MenuAction::Execute(MenuCommand::Cut)));
    }

    #[test]
    fn test_toggle_items_report_check_state() {
        let mut view = ViewSettings::default();
        view.word_wrap = true;
        assert_eq!(MenuCommand::WordWrap.checked(&view), Some(true));
        assert_eq!(MenuCommand::StatusBar.checked(&view), Some(true));
        assert_eq!(MenuCommand::DarkMode.checked(&view), Some(false));
        assert_eq!(MenuCommand::Save.checked(&view), None);
    }

    #[test]
    fn test_shortcuts() {
        assert_eq!(MenuCommand::from_shortcut(&InputEvent::CtrlShiftS), Some(MenuCommand::SaveAs));
        assert_eq!(MenuCommand::from_shortcut(&InputEvent::F3), Some(MenuCommand::FindNext));
        assert_eq!(MenuCommand::from_shortcut(&InputEvent::Char('a')), None);
    }
}
