//! Main application module
//!
//! Owns the terminal, the session and the widgets. Key presses become menu
//! commands or text edits; lifecycle operations run as workflows whose
//! requests are answered through modal dialogs.

use std::cell::RefCell;
use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use chrono::Local;
use tracing::{debug, info, warn};

use crate::command::{self, Command, Effect, WidgetAction};
use crate::config::Config;
use crate::error::FileError;
use crate::host::{self, FileStore, HostReply, HostRequest, PickedFile, PromptChoice, PromptService};
use crate::input::{self, InputEvent};
use crate::lifecycle::{Lifecycle, Outcome, Step, Workflow};
use crate::print::Printer;
use crate::screen::Screen;
use crate::session::{Direction, EditorSession, UNTITLED};
use crate::state::{AppState, Focus, ViewSettings};
use crate::terminal::{self, Terminal};
use crate::ui::dialogs::{
    FindDialog, FontDialog, GoToDialog, MessageDialog, PathDialog, PathDialogMode, ReplaceDialog, SavePromptDialog,
};
use crate::ui::modal::dialog_area;
use crate::ui::{
    main_layout, MainLayout, MenuAction, MenuBar, MenuCommand, ModalAction, ModalDialog, ModalResult, StatusBar,
    TextArea, Theme,
};

/// Find and Replace fields remembered between openings
#[derive(Debug, Default)]
struct SearchFields {
    query: String,
    replacement: String,
    case_sensitive: bool,
    direction: Direction,
}

/// A workflow request being answered by a dialog on the modal stack
#[derive(Debug)]
struct Awaiting {
    request: HostRequest,
    /// Stack index of the dialog serving the request
    depth: usize,
}

/// The dialog that answers a workflow request, if it needs one
fn dialog_for(request: &HostRequest, session: &EditorSession) -> Option<Box<dyn ModalDialog>> {
    match request {
        HostRequest::AskSaveDiscardCancel { display_name } => Some(Box::new(SavePromptDialog::new(display_name))),
        HostRequest::PickAndRead => Some(Box::new(PathDialog::new(PathDialogMode::Open, start_dir(session), ""))),
        HostRequest::PickPathAndWrite { .. } => {
            let suggested = match session.file_path() {
                Some(_) => session.display_name(),
                None => format!("{}.txt", UNTITLED),
            };
            Some(Box::new(PathDialog::new(PathDialogMode::SaveAs, start_dir(session), &suggested)))
        }
        HostRequest::Write { .. } => None,
    }
}

/// Folder a path dialog starts in: the document's own, else the working directory
fn start_dir(session: &EditorSession) -> PathBuf {
    session
        .file_path()
        .and_then(Path::parent)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// A dialog's answer, serving the request that opened the dialog
struct DialogAnswer(Option<ModalAction>);

impl DialogAnswer {
    fn path(&self) -> Result<&Path, FileError> {
        match &self.0 {
            Some(ModalAction::Path(path)) => Ok(path),
            other => {
                warn!(answer = ?other, "dialog answer is not a path");
                Err(FileError::Cancelled)
            }
        }
    }
}

impl FileStore for DialogAnswer {
    fn pick_and_read(&mut self) -> Result<PickedFile, FileError> {
        let path = self.path()?.to_path_buf();
        host::read_text(&path).map(|content| PickedFile { path, content })
    }

    fn write(&mut self, path: &Path, content: &str) -> Result<(), FileError> {
        host::write_text(path, content)
    }

    fn pick_path_and_write(&mut self, content: &str) -> Result<PathBuf, FileError> {
        let path = self.path()?.to_path_buf();
        host::write_text(&path, content).map(|()| path)
    }
}

impl PromptService for DialogAnswer {
    fn ask_save_discard_cancel(&mut self, _display_name: &str) -> PromptChoice {
        match self.0 {
            Some(ModalAction::Prompt(choice)) => choice,
            _ => PromptChoice::Cancel,
        }
    }
}

/// Turn a dialog's answer into the reply for `request`, doing the file I/O it implies
fn reply_for(request: HostRequest, action: Option<ModalAction>) -> HostReply {
    let mut files = DialogAnswer(action.clone());
    let mut prompt = DialogAnswer(action);
    host::answer(request, &mut files, &mut prompt)
}

/// The command behind a menu item, or `None` for items that open a dialog
fn menu_command(item: MenuCommand) -> Option<Command> {
    let command = match item {
        MenuCommand::New => Command::New,
        MenuCommand::Open => Command::Open,
        MenuCommand::Save => Command::Save,
        MenuCommand::SaveAs => Command::SaveAs,
        MenuCommand::Print => Command::Print,
        MenuCommand::Exit => Command::Quit,
        MenuCommand::Undo => Command::Undo,
        MenuCommand::Cut => Command::Cut,
        MenuCommand::Copy => Command::Copy,
        MenuCommand::Paste => Command::Paste,
        MenuCommand::Delete => Command::Delete,
        MenuCommand::FindNext => Command::FindNext,
        MenuCommand::SelectAll => Command::SelectAll,
        MenuCommand::TimeDate => Command::InsertTimestamp(Local::now().naive_local()),
        MenuCommand::WordWrap => Command::ToggleWordWrap,
        MenuCommand::DarkMode => Command::ToggleDarkMode,
        MenuCommand::StatusBar => Command::ToggleStatusBar,
        MenuCommand::About => Command::About,
        MenuCommand::Find
        | MenuCommand::Replace
        | MenuCommand::GoTo
        | MenuCommand::Font
        | MenuCommand::PageSetup => return None,
    };
    Some(command)
}

/// Main application
pub struct App {
    terminal: Terminal,
    screen: Screen,
    state: AppState,
    session: Rc<RefCell<EditorSession>>,
    menubar: MenuBar,
    textarea: TextArea,
    /// Open dialogs, topmost last. Only the top one receives events.
    modals: Vec<Box<dyn ModalDialog>>,
    /// Lifecycle operation in progress
    workflow: Option<Workflow>,
    awaiting: Option<Awaiting>,
    printer: Printer,
    search: SearchFields,
}

impl App {
    pub fn new(config: &Config, view: ViewSettings) -> io::Result<Self> {
        let terminal = Terminal::new()?;
        let (width, height) = terminal.size();
        let screen = Screen::new(width, height);

        Ok(Self {
            terminal,
            screen,
            state: AppState::new(view),
            session: Rc::new(RefCell::new(EditorSession::new())),
            menubar: MenuBar::new(),
            textarea: TextArea::new(),
            modals: Vec::new(),
            workflow: None,
            awaiting: None,
            printer: Printer::new(&config.print),
            search: SearchFields::default(),
        })
    }

    /// Load the file named on the command line. Failures leave an empty
    /// untitled session and are reported in a message box.
    pub fn open_startup_file(&mut self, path: PathBuf) {
        match host::read_text(&path) {
            Ok(content) => {
                info!(path = %path.display(), "opened startup file");
                self.session.borrow_mut().load(path, content);
                self.textarea.reset();
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "startup file not opened");
                self.show_message(&e.to_string());
            }
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        loop {
            if let Some(signal) = terminal::termination_signal() {
                warn!(signal, "terminated by signal, unsaved changes are discarded");
                break;
            }

            // Handle resize
            self.terminal.update_size();
            let (width, height) = self.terminal.size();
            if (width, height) != self.screen.size() {
                self.screen.resize(width, height);
                self.screen.invalidate();
                self.reveal_caret();
            }

            self.draw();
            self.update_title()?;
            self.screen.flush(&mut self.terminal)?;

            // Handle all available input events before the next draw
            let mut had_input = false;
            while let Some(key) = self.terminal.read_key()? {
                had_input = true;
                self.handle_input(InputEvent::from(key));
                if self.state.should_quit || terminal::termination_signal().is_some() {
                    break;
                }
            }

            if self.state.should_quit {
                break;
            }
            if !had_input {
                // Sleep briefly to avoid 100% CPU
                thread::sleep(Duration::from_millis(10));
            }
        }
        info!("exiting");
        Ok(())
    }

    fn layout(&self) -> MainLayout {
        let (width, height) = self.screen.size();
        main_layout(width, height, self.state.view.status_bar)
    }

    /// Push the session title to the terminal when it changes
    fn update_title(&mut self) -> io::Result<()> {
        let title = self.session.borrow().title();
        if title != self.state.terminal_title {
            self.terminal.set_title(&title)?;
            self.state.terminal_title = title;
        }
        Ok(())
    }

    fn draw(&mut self) {
        let layout = self.layout();
        let theme = Theme::for_mode(self.state.view.dark_mode);
        let session = self.session.borrow();

        self.screen.clear_with(theme.text_fg, theme.desktop_bg);
        self.screen.set_cursor_visible(false);

        self.menubar.draw(&mut self.screen, &self.state, &theme, layout.menu_bar);

        // Window frame with the document title in the top border
        let window = layout.window;
        self.screen.draw_box(
            window.y,
            window.x,
            window.width,
            window.height,
            theme.window_border_fg,
            theme.window_border_bg,
        );
        let title = format!(" {} ", session.title());
        let title_x = window.x + window.width.saturating_sub(title.chars().count() as u16) / 2;
        self.screen.write_str(window.y, title_x, &title, theme.title_fg, theme.title_bg);

        let editor_focused = self.modals.is_empty() && self.state.focus == Focus::Editor;
        self.textarea.draw(
            &mut self.screen,
            &session,
            &theme,
            layout.text,
            self.state.view.word_wrap,
            self.state.view.font.style,
            editor_focused,
        );

        if let Some(status_rect) = layout.status_bar {
            StatusBar::draw(&mut self.screen, &self.state, &theme, &session.status_text(), status_rect);
        }

        // Draw menu dropdown (must be after the text so it appears on top)
        self.menubar.draw_dropdown(&mut self.screen, &self.state, &theme);

        let (width, height) = self.screen.size();
        for modal in &self.modals {
            let area = dialog_area(modal.as_ref(), width, height);
            modal.draw(&mut self.screen, &theme, area);
        }
    }

    fn handle_input(&mut self, event: InputEvent) {
        if !matches!(
            event,
            InputEvent::MouseDrag { .. } | InputEvent::MouseRelease { .. } | InputEvent::Unknown
        ) {
            self.state.clear_status();
        }

        if !self.modals.is_empty() {
            self.handle_modal_event(&event);
            return;
        }

        if let Some(item) = MenuCommand::from_shortcut(&event) {
            self.state.close_menu();
            self.execute_menu(item);
            return;
        }

        if let Some(index) = input::menu_index_from_alt(&event) {
            self.state.open_menu(index);
            return;
        }

        if event == InputEvent::F10 {
            if self.state.menu_open {
                self.state.close_menu();
            } else {
                self.state.open_menu(0);
            }
            return;
        }

        if let InputEvent::MouseClick { row, col } = event {
            if row == 1 || self.state.menu_open {
                if let Some(MenuAction::Execute(item)) = self.menubar.handle_click(&mut self.state, row, col) {
                    self.execute_menu(item);
                }
                return;
            }
        }

        match self.state.focus {
            Focus::Menu => {
                if let Some(MenuAction::Execute(item)) = self.menubar.handle_input(&mut self.state, &event) {
                    self.execute_menu(item);
                }
            }
            Focus::Editor | Focus::Dialog => {
                let area = self.layout().text;
                let wrap = self.state.view.word_wrap;
                let mut session = self.session.borrow_mut();
                self.textarea.handle_event(&mut session, &event, area, wrap);
            }
        }
    }

    fn execute_menu(&mut self, item: MenuCommand) {
        debug!(?item, "menu command");
        match item {
            MenuCommand::Find => self.open_find(),
            MenuCommand::Replace => self.open_replace(),
            MenuCommand::GoTo => {
                let line = self.session.borrow().current_position().line;
                self.push_modal(Box::new(GoToDialog::new(line)));
            }
            MenuCommand::Font => {
                let dialog = FontDialog::new(&self.state.view.font);
                self.push_modal(Box::new(dialog));
            }
            MenuCommand::PageSetup => {}
            other => {
                if let Some(command) = menu_command(other) {
                    self.run_command(command);
                }
            }
        }
    }

    /// Text to prefill the Find field: a one-line selection, else the last query
    fn find_prefill(&self) -> String {
        let session = self.session.borrow();
        let selected = session.selected_text();
        if !selected.is_empty() && !selected.contains('\n') {
            selected.to_string()
        } else if let Some(last) = session.last_search() {
            last.query.clone()
        } else {
            self.search.query.clone()
        }
    }

    fn open_find(&mut self) {
        let query = self.find_prefill();
        let dialog = FindDialog::new(&query, self.search.case_sensitive, self.search.direction);
        self.push_modal(Box::new(dialog));
    }

    fn open_replace(&mut self) {
        let query = self.find_prefill();
        let dialog = ReplaceDialog::new(&query, &self.search.replacement, self.search.case_sensitive);
        self.push_modal(Box::new(dialog));
    }

    fn push_modal(&mut self, modal: Box<dyn ModalDialog>) {
        debug!(title = modal.title(), "dialog opened");
        self.state.focus_dialog();
        self.modals.push(modal);
    }

    fn show_message(&mut self, text: &str) {
        self.push_modal(Box::new(MessageDialog::new("Notepad", text)));
    }

    /// Route an event to the topmost dialog
    fn handle_modal_event(&mut self, event: &InputEvent) {
        let Some(mut modal) = self.modals.pop() else {
            return;
        };
        let (width, height) = self.screen.size();
        let area = dialog_area(modal.as_ref(), width, height);
        let depth = self.modals.len();

        match modal.handle_event(event, area) {
            ModalResult::Continue => self.modals.push(modal),
            ModalResult::Close => {
                debug!(title = modal.title(), "dialog closed");
                self.after_modal_closed();
                if self.awaiting.as_ref().is_some_and(|a| a.depth == depth) {
                    if let Some(awaiting) = self.awaiting.take() {
                        let reply = awaiting.request.cancelled();
                        self.resume_workflow(reply);
                    }
                }
            }
            ModalResult::Action(action) => {
                self.after_modal_closed();
                self.handle_modal_action(action);
            }
            ModalResult::Apply(action) => {
                self.modals.push(modal);
                self.handle_modal_action(action);
            }
        }
    }

    fn after_modal_closed(&mut self) {
        if self.modals.is_empty() {
            self.state.focus_editor();
        }
    }

    /// Handle actions returned by modal dialogs
    fn handle_modal_action(&mut self, action: ModalAction) {
        match action {
            ModalAction::Prompt(_) | ModalAction::Path(_) => match self.awaiting.take() {
                Some(awaiting) => {
                    let reply = reply_for(awaiting.request, Some(action));
                    self.resume_workflow(reply);
                }
                None => warn!(?action, "dialog answer with no workflow waiting"),
            },
            ModalAction::Find { query, case_sensitive, direction } => {
                self.search.query = query.clone();
                self.search.case_sensitive = case_sensitive;
                self.search.direction = direction;
                self.run_command(Command::Find { query, case_sensitive, direction });
            }
            ModalAction::Replace { query, replacement, case_sensitive } => {
                self.remember_replace(&query, &replacement, case_sensitive);
                self.run_command(Command::Replace { query, replacement, case_sensitive });
            }
            ModalAction::ReplaceAll { query, replacement, case_sensitive } => {
                self.remember_replace(&query, &replacement, case_sensitive);
                self.run_command(Command::ReplaceAll { query, replacement, case_sensitive });
            }
            ModalAction::GoTo(line) => self.run_command(Command::GoTo(line)),
            ModalAction::Font(font) => self.run_command(Command::SetFont(font)),
        }
    }

    fn remember_replace(&mut self, query: &str, replacement: &str, case_sensitive: bool) {
        self.search.query = query.to_string();
        self.search.replacement = replacement.to_string();
        self.search.case_sensitive = case_sensitive;
    }

    fn run_command(&mut self, command: Command) {
        let edits = command::edits_buffer(&command);
        let result = {
            let mut session = self.session.borrow_mut();
            if edits {
                self.textarea.checkpoint(&session);
            }
            let result = command::dispatch(&mut session, &mut self.state.view, command);
            if edits {
                self.textarea.discard_if_unchanged(&session);
            }
            result
        };

        match result {
            Ok(Effect::Done) => {}
            Ok(Effect::Replaced(count)) => {
                let noun = if count == 1 { "occurrence" } else { "occurrences" };
                self.state.set_status(format!("Replaced {} {}", count, noun));
            }
            Ok(Effect::OpenFindDialog) => self.open_find(),
            Ok(Effect::Lifecycle(operation)) => self.start_workflow(operation),
            Ok(Effect::Widget(WidgetAction::Undo)) if !self.textarea.can_undo() => {
                self.state.set_status("Nothing to undo");
            }
            Ok(Effect::Widget(action)) => {
                let mut session = self.session.borrow_mut();
                self.textarea.apply(&mut session, action);
            }
            Ok(Effect::Print) => self.print(),
            Ok(Effect::About) => self.push_modal(Box::new(MessageDialog::about())),
            Err(e) => self.show_message(&e.to_string()),
        }
        self.reveal_caret();
    }

    fn reveal_caret(&mut self) {
        let area = self.layout().text;
        let session = self.session.borrow();
        self.textarea.ensure_visible(&session, area, self.state.view.word_wrap);
    }

    fn print(&mut self) {
        let (title, content) = {
            let session = self.session.borrow();
            (session.display_name(), session.buffer().to_string())
        };
        match self.printer.print(&title, &content) {
            Ok(()) => self.state.set_status(format!("Sent {} to the printer", title)),
            Err(e) => self.show_message(&e.to_string()),
        }
    }

    fn start_workflow(&mut self, operation: Lifecycle) {
        if let Some(running) = &self.workflow {
            warn!(?operation, running = ?running.operation(), "workflow already running");
            return;
        }
        let mut workflow = Workflow::new(operation, Rc::clone(&self.session));
        let step = workflow.start();
        self.workflow = Some(workflow);
        self.advance(step);
    }

    fn resume_workflow(&mut self, reply: HostReply) {
        let step = match self.workflow.as_mut() {
            Some(workflow) => workflow.resume(reply),
            None => {
                warn!(?reply, "reply with no workflow running");
                return;
            }
        };
        self.advance(step);
    }

    /// Serve requests until the workflow finishes or waits on a dialog
    fn advance(&mut self, mut step: Step) {
        loop {
            match step {
                Step::Done(outcome) => {
                    let operation = self.workflow.take().map(|w| w.operation());
                    info!(?operation, completed = outcome.is_completed(), "workflow finished");
                    self.finish_workflow(operation, outcome);
                    return;
                }
                Step::Pending(request @ HostRequest::Write { .. }) => {
                    let reply = reply_for(request, None);
                    step = match self.workflow.as_mut() {
                        Some(workflow) => workflow.resume(reply),
                        None => return,
                    };
                }
                Step::Pending(request) => {
                    let dialog = dialog_for(&request, &self.session.borrow());
                    match dialog {
                        Some(dialog) => {
                            self.awaiting = Some(Awaiting { request, depth: self.modals.len() });
                            self.push_modal(dialog);
                        }
                        None => {
                            let reply = request.cancelled();
                            self.resume_workflow(reply);
                        }
                    }
                    return;
                }
            }
        }
    }

    fn finish_workflow(&mut self, operation: Option<Lifecycle>, outcome: Outcome) {
        match outcome {
            Outcome::Completed => match operation {
                Some(Lifecycle::Quit) => self.state.should_quit = true,
                Some(Lifecycle::New) | Some(Lifecycle::Open) => {
                    self.textarea.reset();
                    self.reveal_caret();
                }
                Some(Lifecycle::Save) | Some(Lifecycle::SaveAs) => {
                    let name = self.session.borrow().display_name();
                    self.state.set_status(format!("Saved {}", name));
                }
                None => {}
            },
            Outcome::Cancelled => debug!(?operation, "workflow cancelled"),
            Outcome::Failed(e) => self.show_message(&e.to_string()),
        }
    }
}
