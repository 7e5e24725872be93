//! Commands the host sends to the session
//!
//! Menu clicks, shortcuts and dialog buttons all end up as a `Command`.
//! `dispatch` applies what the session and view settings can handle on
//! their own and reports everything else back as an `Effect` for the host.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::config::FontConfig;
use crate::error::EditError;
use crate::lifecycle::Lifecycle;
use crate::session::{Direction, EditorSession};
use crate::state::ViewSettings;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    New,
    Open,
    Save,
    SaveAs,
    Print,
    Find { query: String, case_sensitive: bool, direction: Direction },
    FindNext,
    Replace { query: String, replacement: String, case_sensitive: bool },
    ReplaceAll { query: String, replacement: String, case_sensitive: bool },
    GoTo(usize),
    Undo,
    Cut,
    Copy,
    Paste,
    Delete,
    SelectAll,
    InsertTimestamp(NaiveDateTime),
    ToggleWordWrap,
    ToggleDarkMode,
    ToggleStatusBar,
    SetFont(FontConfig),
    About,
    Quit,
}

/// Editing handled by the text widget
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidgetAction {
    Undo,
    Cut,
    Copy,
    Paste,
    Delete,
    SelectAll,
}

/// What the host still has to do after `dispatch`
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Fully applied
    Done,
    /// Replace All finished with this many replacements
    Replaced(usize),
    /// Find Next without an earlier Find
    OpenFindDialog,
    /// Start a lifecycle workflow
    Lifecycle(Lifecycle),
    Widget(WidgetAction),
    Print,
    About,
}

/// Apply `command` to the session and view settings.
///
/// Errors are notices for the user (not found, bad line number); the
/// session is unchanged when one is returned.
pub fn dispatch(session: &mut EditorSession, view: &mut ViewSettings, command: Command) -> Result<Effect, EditError> {
    debug!(?command, "dispatch");
    let effect = match command {
        Command::New => Effect::Lifecycle(Lifecycle::New),
        Command::Open => Effect::Lifecycle(Lifecycle::Open),
        Command::Save => Effect::Lifecycle(Lifecycle::Save),
        Command::SaveAs => Effect::Lifecycle(Lifecycle::SaveAs),
        Command::Quit => Effect::Lifecycle(Lifecycle::Quit),
        Command::Print => Effect::Print,
        Command::About => Effect::About,
        Command::Find { query, case_sensitive, direction } => {
            session.find(&query, case_sensitive, direction)?;
            Effect::Done
        }
        Command::FindNext => match session.find_next()? {
            Some(_) => Effect::Done,
            None => Effect::OpenFindDialog,
        },
        Command::Replace { query, replacement, case_sensitive } => {
            session.replace(&query, &replacement, case_sensitive)?;
            Effect::Done
        }
        Command::ReplaceAll { query, replacement, case_sensitive } => {
            Effect::Replaced(session.replace_all(&query, &replacement, case_sensitive))
        }
        Command::GoTo(line) => {
            session.go_to_line(line)?;
            Effect::Done
        }
        Command::Undo => Effect::Widget(WidgetAction::Undo),
        Command::Cut => Effect::Widget(WidgetAction::Cut),
        Command::Copy => Effect::Widget(WidgetAction::Copy),
        Command::Paste => Effect::Widget(WidgetAction::Paste),
        Command::Delete => Effect::Widget(WidgetAction::Delete),
        Command::SelectAll => Effect::Widget(WidgetAction::SelectAll),
        Command::InsertTimestamp(now) => {
            session.insert_timestamp(now);
            Effect::Done
        }
        Command::ToggleWordWrap => {
            view.word_wrap = !view.word_wrap;
            Effect::Done
        }
        Command::ToggleDarkMode => {
            view.dark_mode = !view.dark_mode;
            Effect::Done
        }
        Command::ToggleStatusBar => {
            view.status_bar = !view.status_bar;
            Effect::Done
        }
        Command::SetFont(font) => {
            view.font = font;
            Effect::Done
        }
    };
    Ok(effect)
}

/// Whether `command` may change the buffer, so the widget can take an undo snapshot first
pub fn edits_buffer(command: &Command) -> bool {
    matches!(
        command,
        Command::Replace { .. } | Command::ReplaceAll { .. } | Command::InsertTimestamp(_)
    )
}
