//! Input handling and key event processing

use crate::terminal::{Key, MouseButton, MouseEvent};

/// Processed input events for the application
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// Mouse click
    MouseClick { row: u16, col: u16 },
    /// Mouse release
    MouseRelease { row: u16, col: u16 },
    /// Mouse drag (move while button held)
    MouseDrag { row: u16, col: u16 },
    /// Mouse wheel scroll
    ScrollUp { row: u16, col: u16 },
    ScrollDown { row: u16, col: u16 },
    /// Regular character input
    Char(char),
    /// Navigation keys
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    Home,
    End,
    PageUp,
    PageDown,
    /// Shift+Navigation for selection
    ShiftUp,
    ShiftDown,
    ShiftLeft,
    ShiftRight,
    ShiftHome,
    ShiftEnd,
    ShiftPageUp,
    ShiftPageDown,
    /// Ctrl+Navigation
    CtrlLeft,
    CtrlRight,
    CtrlHome,
    CtrlEnd,
    CtrlShiftLeft,
    CtrlShiftRight,
    CtrlShiftHome,
    CtrlShiftEnd,
    /// Editing keys
    Enter,
    Backspace,
    Delete,
    Tab,
    ShiftTab,
    Escape,
    /// Function keys
    F3,  // Find next
    F5,  // Time/Date
    F10, // Menu
    F12, // Save as
    /// Menu shortcuts
    AltF, // File menu
    AltE, // Edit menu
    AltO, // Format menu
    AltV, // View menu
    AltH, // Help menu
    AltX, // Exit
    /// Ctrl shortcuts
    CtrlA, // Select all
    CtrlC, // Copy
    CtrlV, // Paste
    CtrlX, // Cut
    CtrlZ, // Undo
    CtrlN, // New
    CtrlO, // Open
    CtrlS, // Save
    CtrlShiftS, // Save as
    CtrlP, // Print
    CtrlF, // Find
    CtrlH, // Replace
    CtrlG, // Go to
    CtrlQ, // Quit
    /// Other
    Unknown,
}

impl From<Key> for InputEvent {
    fn from(key: Key) -> Self {
        match key {
            Key::Char(c) => InputEvent::Char(c),
            Key::Enter => InputEvent::Enter,
            Key::Escape => InputEvent::Escape,
            Key::Backspace => InputEvent::Backspace,
            Key::Delete => InputEvent::Delete,
            Key::Tab => InputEvent::Tab,
            Key::ShiftTab => InputEvent::ShiftTab,
            Key::Up => InputEvent::CursorUp,
            Key::Down => InputEvent::CursorDown,
            Key::Left => InputEvent::CursorLeft,
            Key::Right => InputEvent::CursorRight,
            Key::Home => InputEvent::Home,
            Key::End => InputEvent::End,
            Key::PageUp => InputEvent::PageUp,
            Key::PageDown => InputEvent::PageDown,
            Key::ShiftUp => InputEvent::ShiftUp,
            Key::ShiftDown => InputEvent::ShiftDown,
            Key::ShiftLeft => InputEvent::ShiftLeft,
            Key::ShiftRight => InputEvent::ShiftRight,
            Key::ShiftHome => InputEvent::ShiftHome,
            Key::ShiftEnd => InputEvent::ShiftEnd,
            Key::ShiftPageUp => InputEvent::ShiftPageUp,
            Key::ShiftPageDown => InputEvent::ShiftPageDown,
            Key::CtrlLeft => InputEvent::CtrlLeft,
            Key::CtrlRight => InputEvent::CtrlRight,
            Key::CtrlHome => InputEvent::CtrlHome,
            Key::CtrlEnd => InputEvent::CtrlEnd,
            Key::CtrlShiftLeft => InputEvent::CtrlShiftLeft,
            Key::CtrlShiftRight => InputEvent::CtrlShiftRight,
            Key::CtrlShiftHome => InputEvent::CtrlShiftHome,
            Key::CtrlShiftEnd => InputEvent::CtrlShiftEnd,
            Key::F(3) => InputEvent::F3,
            Key::F(5) => InputEvent::F5,
            Key::F(10) => InputEvent::F10,
            Key::F(12) => InputEvent::F12,
            Key::Alt('f') => InputEvent::AltF,
            Key::Alt('e') => InputEvent::AltE,
            Key::Alt('o') => InputEvent::AltO,
            Key::Alt('v') => InputEvent::AltV,
            Key::Alt('h') => InputEvent::AltH,
            Key::Alt('x') => InputEvent::AltX,
            Key::Ctrl('a') => InputEvent::CtrlA,
            Key::Ctrl('c') => InputEvent::CtrlC,
            Key::Ctrl('v') => InputEvent::CtrlV,
            Key::Ctrl('x') => InputEvent::CtrlX,
            Key::Ctrl('z') => InputEvent::CtrlZ,
            Key::Ctrl('n') => InputEvent::CtrlN,
            Key::Ctrl('o') => InputEvent::CtrlO,
            Key::Ctrl('s') => InputEvent::CtrlS,
            Key::CtrlShift('s') => InputEvent::CtrlShiftS,
            Key::Ctrl('p') => InputEvent::CtrlP,
            Key::Ctrl('f') => InputEvent::CtrlF,
            Key::Ctrl('h') => InputEvent::CtrlH,
            Key::Ctrl('g') => InputEvent::CtrlG,
            Key::Ctrl('q') => InputEvent::CtrlQ,
            Key::Ctrl('i') => InputEvent::Tab,
            Key::Ctrl('m') | Key::Ctrl('j') => InputEvent::Enter,
            Key::Mouse(MouseEvent { button: MouseButton::Left, row, col, pressed: true, motion: false }) => {
                InputEvent::MouseClick { row, col }
            }
            Key::Mouse(MouseEvent { button: MouseButton::Left, row, col, motion: true, .. }) => {
                InputEvent::MouseDrag { row, col }
            }
            Key::Mouse(MouseEvent { button: MouseButton::Left, row, col, pressed: false, .. }) => {
                InputEvent::MouseRelease { row, col }
            }
            Key::Mouse(MouseEvent { button: MouseButton::WheelUp, row, col, .. }) => InputEvent::ScrollUp { row, col },
            Key::Mouse(MouseEvent { button: MouseButton::WheelDown, row, col, .. }) => {
                InputEvent::ScrollDown { row, col }
            }
            _ => InputEvent::Unknown,
        }
    }
}

/// Get menu index from Alt key
pub fn menu_index_from_alt(event: &InputEvent) -> Option<usize> {
    match event {
        InputEvent::AltF => Some(0), // File
        InputEvent::AltE => Some(1), // Edit
        InputEvent::AltO => Some(2), // Format
        InputEvent::AltV => Some(3), // View
        InputEvent::AltH => Some(4), // Help
        _ => None,
    }
}
