//! Modal dialog system
//!
//! Modal dialogs capture all input events when open. The main loop
//! doesn't need to know what type of dialog is open - it just routes
//! events to the modal and handles the result.

use std::path::PathBuf;

use crate::config::FontConfig;
use crate::host::PromptChoice;
use crate::input::InputEvent;
use crate::screen::Screen;
use crate::session::Direction;
use super::layout::Rect;
use super::theme::Theme;

/// Result of handling an event in a modal dialog
#[derive(Debug, PartialEq, Eq)]
pub enum ModalResult {
    /// Event handled, keep dialog open
    Continue,
    /// Close dialog with no action
    Close,
    /// Close dialog with a typed result
    Action(ModalAction),
    /// Run an action but keep the dialog open (Find Next, Replace)
    Apply(ModalAction),
}

/// Actions that can be returned by modal dialogs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalAction {
    Find { query: String, case_sensitive: bool, direction: Direction },
    Replace { query: String, replacement: String, case_sensitive: bool },
    ReplaceAll { query: String, replacement: String, case_sensitive: bool },
    GoTo(usize),
    Font(FontConfig),
    /// Answer to the unsaved changes prompt
    Prompt(PromptChoice),
    /// Path chosen in the Open or Save As dialog
    Path(PathBuf),
}

/// A modal dialog that captures all events when open
pub trait ModalDialog {
    /// Preferred outer size, including the frame
    fn size(&self) -> (u16, u16);

    /// Draw the dialog into `area`
    fn draw(&self, screen: &mut Screen, theme: &Theme, area: Rect);

    /// Handle an input event. `area` is where the dialog was last drawn.
    fn handle_event(&mut self, event: &InputEvent, area: Rect) -> ModalResult;

    /// Get the dialog title (for logging)
    fn title(&self) -> &str;
}

/// Where a dialog goes on a screen of the given size
pub fn dialog_area(dialog: &dyn ModalDialog, screen_width: u16, screen_height: u16) -> Rect {
    let (width, height) = dialog.size();
    Rect::centered(width, height, screen_width, screen_height)
}
