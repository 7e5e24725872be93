//! New, Open, Save, Save As and Quit as resumable workflows
//!
//! Each operation runs inside a generator that shares the session through
//! `Rc<RefCell<_>>`. Whenever the user or the disk has to be consulted the
//! generator yields a `HostRequest` and is resumed with the `HostReply`,
//! so a modal dialog can sit between the two halves of an operation.

use std::cell::RefCell;
use std::fmt;
use std::future::Future;
use std::rc::Rc;

use genawaiter::rc::{Co, Gen};
use genawaiter::GeneratorState;
use tracing::{debug, info, warn};

use crate::error::FileError;
use crate::host::{HostReply, HostRequest, PickedFile, PromptChoice};
use crate::session::EditorSession;

/// Operations that may need the user or the disk
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    New,
    Open,
    Save,
    SaveAs,
    Quit,
}

/// How a workflow finished
#[derive(Debug)]
pub enum Outcome {
    /// The operation went through. For Quit this means the app may exit.
    Completed,
    /// The user backed out somewhere; nothing was changed
    Cancelled,
    /// A read or write failed; nothing was changed and the error should be shown
    Failed(FileError),
}

impl Outcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed)
    }
}

impl From<Result<(), FileError>> for Outcome {
    fn from(result: Result<(), FileError>) -> Self {
        match result {
            Ok(()) => Outcome::Completed,
            Err(e) if e.is_cancelled() => Outcome::Cancelled,
            Err(e) => Outcome::Failed(e),
        }
    }
}

/// Progress of a workflow after starting or resuming it
#[derive(Debug)]
pub enum Step {
    Pending(HostRequest),
    Done(Outcome),
}

/// `None` only for the first resume, whose value the generator never sees
type Reply = Option<HostReply>;
type Channel = Co<HostRequest, Reply>;

trait Resumable {
    fn resume_with(&mut self, reply: Reply) -> GeneratorState<HostRequest, Outcome>;
}

/// Wrapper to make Gen implement our Resumable trait
struct GenWrapper<F: Future<Output = Outcome>> {
    gen: Gen<HostRequest, Reply, F>,
}

impl<F: Future<Output = Outcome>> Resumable for GenWrapper<F> {
    fn resume_with(&mut self, reply: Reply) -> GeneratorState<HostRequest, Outcome> {
        self.gen.resume_with(reply)
    }
}

/// A lifecycle operation in progress
pub struct Workflow {
    operation: Lifecycle,
    gen: Box<dyn Resumable>,
    finished: bool,
}

impl fmt::Debug for Workflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Workflow")
            .field("operation", &self.operation)
            .field("finished", &self.finished)
            .finish()
    }
}

impl Workflow {
    pub fn new(operation: Lifecycle, session: Rc<RefCell<EditorSession>>) -> Self {
        let gen = Gen::new(move |co| async move { run(operation, &co, &session).await });
        Self {
            operation,
            gen: Box::new(GenWrapper { gen }),
            finished: false,
        }
    }

    pub fn operation(&self) -> Lifecycle {
        self.operation
    }

    /// Run until the first request or completion
    pub fn start(&mut self) -> Step {
        self.step(None)
    }

    /// Hand the host's answer to the suspended workflow
    pub fn resume(&mut self, reply: HostReply) -> Step {
        self.step(Some(reply))
    }

    fn step(&mut self, reply: Reply) -> Step {
        if self.finished {
            warn!(operation = ?self.operation, "resumed a finished workflow");
            return Step::Done(Outcome::Cancelled);
        }
        match self.gen.resume_with(reply) {
            GeneratorState::Yielded(request) => Step::Pending(request),
            GeneratorState::Complete(outcome) => {
                self.finished = true;
                Step::Done(outcome)
            }
        }
    }
}

async fn run(operation: Lifecycle, co: &Channel, session: &Rc<RefCell<EditorSession>>) -> Outcome {
    debug!(?operation, "lifecycle started");
    let result = match operation {
        Lifecycle::New => new_document(co, session).await,
        Lifecycle::Open => open(co, session).await,
        Lifecycle::Save => save(co, session).await,
        Lifecycle::SaveAs => save_as(co, session).await,
        Lifecycle::Quit => confirm_discard(co, session).await,
    };
    let outcome = Outcome::from(result);
    info!(?operation, ?outcome, "lifecycle finished");
    outcome
}

fn unexpected(request: &str, reply: Reply) -> FileError {
    warn!(request, ?reply, "unexpected host reply, treating as cancel");
    FileError::Cancelled
}

async fn ask(co: &Channel, display_name: String) -> PromptChoice {
    match co.yield_(HostRequest::AskSaveDiscardCancel { display_name }).await {
        Some(HostReply::Prompt(choice)) => choice,
        other => {
            unexpected("prompt", other);
            PromptChoice::Cancel
        }
    }
}

/// Unsaved-changes protocol. `Ok` means the caller may go on.
async fn confirm_discard(co: &Channel, session: &Rc<RefCell<EditorSession>>) -> Result<(), FileError> {
    let display_name = {
        let session = session.borrow();
        if !session.is_dirty() {
            return Ok(());
        }
        session.display_name()
    };
    match ask(co, display_name).await {
        PromptChoice::Cancel => Err(FileError::Cancelled),
        PromptChoice::DontSave => Ok(()),
        PromptChoice::Save => save(co, session).await,
    }
}

async fn new_document(co: &Channel, session: &Rc<RefCell<EditorSession>>) -> Result<(), FileError> {
    confirm_discard(co, session).await?;
    session.borrow_mut().reset();
    Ok(())
}

async fn open(co: &Channel, session: &Rc<RefCell<EditorSession>>) -> Result<(), FileError> {
    confirm_discard(co, session).await?;
    let PickedFile { path, content } = match co.yield_(HostRequest::PickAndRead).await {
        Some(HostReply::Read(result)) => result?,
        other => return Err(unexpected("open", other)),
    };
    session.borrow_mut().load(path, content);
    Ok(())
}

async fn save(co: &Channel, session: &Rc<RefCell<EditorSession>>) -> Result<(), FileError> {
    let target = {
        let session = session.borrow();
        session
            .file_path()
            .map(|path| (path.to_path_buf(), session.buffer().to_string()))
    };
    let Some((path, content)) = target else {
        return save_as(co, session).await;
    };
    match co.yield_(HostRequest::Write { path, content }).await {
        Some(HostReply::Written(result)) => result?,
        other => return Err(unexpected("save", other)),
    }
    session.borrow_mut().mark_saved();
    Ok(())
}

async fn save_as(co: &Channel, session: &Rc<RefCell<EditorSession>>) -> Result<(), FileError> {
    let content = session.borrow().buffer().to_string();
    let path = match co.yield_(HostRequest::PickPathAndWrite { content }).await {
        Some(HostReply::SavedAs(result)) => result?,
        other => return Err(unexpected("save as", other)),
    };
    session.borrow_mut().mark_saved_as(path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{answer, read_text, write_text, FileStore, PromptService};
    use pretty_assertions::assert_eq;
    use std::collections::VecDeque;
    use std::io;
    use std::path::{Path, PathBuf};

    /// FileStore answering from scripted results and recording writes
    #[derive(Default)]
    struct ScriptedFiles {
        reads: VecDeque<Result<PickedFile, FileError>>,
        save_as: VecDeque<Result<PathBuf, FileError>>,
        fail_writes: bool,
        written: Vec<(PathBuf, String)>,
    }

    impl FileStore for ScriptedFiles {
        fn pick_and_read(&mut self) -> Result<PickedFile, FileError> {
            self.reads.pop_front().unwrap_or(Err(FileError::Cancelled))
        }

        fn write(&mut self, path: &Path, content: &str) -> Result<(), FileError> {
            if self.fail_writes {
                return Err(FileError::io(path, io::Error::new(io::ErrorKind::PermissionDenied, "read-only")));
            }
            self.written.push((path.to_path_buf(), content.to_string()));
            Ok(())
        }

        fn pick_path_and_write(&mut self, content: &str) -> Result<PathBuf, FileError> {
            let path = self.save_as.pop_front().unwrap_or(Err(FileError::Cancelled))?;
            self.write(&path, content)?;
            Ok(path)
        }
    }

    /// PromptService answering from a script and counting questions
    #[derive(Default)]
    struct ScriptedPrompt {
        answers: VecDeque<PromptChoice>,
        asked: Vec<String>,
    }

    impl ScriptedPrompt {
        fn answering(choice: PromptChoice) -> Self {
            Self { answers: VecDeque::from([choice]), asked: Vec::new() }
        }
    }

    impl PromptService for ScriptedPrompt {
        fn ask_save_discard_cancel(&mut self, display_name: &str) -> PromptChoice {
            self.asked.push(display_name.to_string());
            self.answers.pop_front().unwrap_or(PromptChoice::Cancel)
        }
    }

    /// FileStore backed by a real directory
    struct DiskFiles {
        open: PathBuf,
        save_as: PathBuf,
    }

    impl FileStore for DiskFiles {
        fn pick_and_read(&mut self) -> Result<PickedFile, FileError> {
            let content = read_text(&self.open)?;
            Ok(PickedFile { path: self.open.clone(), content })
        }

        fn write(&mut self, path: &Path, content: &str) -> Result<(), FileError> {
            write_text(path, content)
        }

        fn pick_path_and_write(&mut self, content: &str) -> Result<PathBuf, FileError> {
            write_text(&self.save_as, content)?;
            Ok(self.save_as.clone())
        }
    }

    /// Run a workflow to completion, answering every request synchronously
    fn drive(mut workflow: Workflow, files: &mut dyn FileStore, prompt: &mut dyn PromptService) -> Outcome {
        let mut step = workflow.start();
        loop {
            match step {
                Step::Done(outcome) => return outcome,
                Step::Pending(request) => step = workflow.resume(answer(request, files, prompt)),
            }
        }
    }

    fn shared(text: &str) -> Rc<RefCell<EditorSession>> {
        let mut session = EditorSession::new();
        session.replace_selection(text);
        Rc::new(RefCell::new(session))
    }

    fn shared_file(path: &str, text: &str) -> Rc<RefCell<EditorSession>> {
        let mut session = EditorSession::new();
        session.load(PathBuf::from(path), text.to_string());
        Rc::new(RefCell::new(session))
    }

    fn run_op(op: Lifecycle, session: &Rc<RefCell<EditorSession>>, files: &mut ScriptedFiles, prompt: &mut ScriptedPrompt) -> Outcome {
        drive(Workflow::new(op, session.clone()), files, prompt)
    }

    #[test]
    fn test_new_on_clean_session_does_not_prompt() {
        let session = shared_file("/a.txt", "kept on disk");
        let mut files = ScriptedFiles::default();
        let mut prompt = ScriptedPrompt::default();

        let outcome = run_op(Lifecycle::New, &session, &mut files, &mut prompt);
        assert!(outcome.is_completed());
        assert!(prompt.asked.is_empty());
        assert_eq!(session.borrow().buffer(), "");
        assert_eq!(session.borrow().file_path(), None);
    }

    #[test]
    fn test_new_cancelled_leaves_everything() {
        let session = shared_file("/a.txt", "abc");
        session.borrow_mut().replace_selection("edit ");
        let mut files = ScriptedFiles::default();
        let mut prompt = ScriptedPrompt::answering(PromptChoice::Cancel);

        let outcome = run_op(Lifecycle::New, &session, &mut files, &mut prompt);
        assert!(matches!(outcome, Outcome::Cancelled));
        assert_eq!(prompt.asked, vec!["a.txt".to_string()]);
        let session = session.borrow();
        assert_eq!(session.buffer(), "edit abc");
        assert_eq!(session.file_path(), Some(Path::new("/a.txt")));
        assert!(session.is_dirty());
        assert!(files.written.is_empty());
    }

    #[test]
    fn test_new_dont_save_discards() {
        let session = shared("scratch");
        let mut files = ScriptedFiles::default();
        let mut prompt = ScriptedPrompt::answering(PromptChoice::DontSave);

        let outcome = run_op(Lifecycle::New, &session, &mut files, &mut prompt);
        assert!(outcome.is_completed());
        assert_eq!(prompt.asked, vec!["Untitled".to_string()]);
        assert_eq!(session.borrow().buffer(), "");
        assert!(files.written.is_empty());
    }

    #[test]
    fn test_new_save_writes_then_resets() {
        let session = shared_file("/notes.txt", "old");
        session.borrow_mut().select_all();
        session.borrow_mut().replace_selection("new text");
        let mut files = ScriptedFiles::default();
        let mut prompt = ScriptedPrompt::answering(PromptChoice::Save);

        let outcome = run_op(Lifecycle::New, &session, &mut files, &mut prompt);
        assert!(outcome.is_completed());
        assert_eq!(files.written, vec![(PathBuf::from("/notes.txt"), "new text".to_string())]);
        assert_eq!(session.borrow().buffer(), "");
    }

    #[test]
    fn test_save_as_cancel_during_prompt_aborts_new() {
        let session = shared("unsaved");
        let mut files = ScriptedFiles::default();
        let mut prompt = ScriptedPrompt::answering(PromptChoice::Save);

        let outcome = run_op(Lifecycle::New, &session, &mut files, &mut prompt);
        assert!(matches!(outcome, Outcome::Cancelled));
        assert_eq!(session.borrow().buffer(), "unsaved");
        assert!(session.borrow().is_dirty());
    }

    #[test]
    fn test_failed_save_during_prompt_aborts_quit() {
        let session = shared_file("/ro.txt", "x");
        session.borrow_mut().replace_selection("y");
        let mut files = ScriptedFiles { fail_writes: true, ..Default::default() };
        let mut prompt = ScriptedPrompt::answering(PromptChoice::Save);

        let outcome = run_op(Lifecycle::Quit, &session, &mut files, &mut prompt);
        assert!(matches!(outcome, Outcome::Failed(FileError::Io { .. })));
        assert!(session.borrow().is_dirty());
    }

    #[test]
    fn test_quit_clean_is_immediate() {
        let session = shared("");
        let mut files = ScriptedFiles::default();
        let mut prompt = ScriptedPrompt::default();
        assert!(run_op(Lifecycle::Quit, &session, &mut files, &mut prompt).is_completed());
        assert!(prompt.asked.is_empty());
    }

    #[test]
    fn test_quit_dirty_asks_first() {
        let session = shared("draft");
        let mut files = ScriptedFiles::default();

        let mut prompt = ScriptedPrompt::answering(PromptChoice::Cancel);
        assert!(matches!(run_op(Lifecycle::Quit, &session, &mut files, &mut prompt), Outcome::Cancelled));

        let mut prompt = ScriptedPrompt::answering(PromptChoice::DontSave);
        assert!(run_op(Lifecycle::Quit, &session, &mut files, &mut prompt).is_completed());
        assert_eq!(session.borrow().buffer(), "draft");
    }

    #[test]
    fn test_open_replaces_session() {
        let session = shared("");
        let mut files = ScriptedFiles::default();
        files.reads.push_back(Ok(PickedFile { path: PathBuf::from("/b.txt"), content: "bee".into() }));
        let mut prompt = ScriptedPrompt::default();

        let outcome = run_op(Lifecycle::Open, &session, &mut files, &mut prompt);
        assert!(outcome.is_completed());
        let session = session.borrow();
        assert_eq!(session.buffer(), "bee");
        assert_eq!(session.file_path(), Some(Path::new("/b.txt")));
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_open_cancel_and_failure_leave_state() {
        let session = shared_file("/a.txt", "keep");
        let mut files = ScriptedFiles::default();
        let mut prompt = ScriptedPrompt::default();
        assert!(matches!(run_op(Lifecycle::Open, &session, &mut files, &mut prompt), Outcome::Cancelled));

        files.reads.push_back(Err(FileError::io("/bad.txt", io::Error::new(io::ErrorKind::NotFound, "gone"))));
        let outcome = run_op(Lifecycle::Open, &session, &mut files, &mut prompt);
        assert!(matches!(outcome, Outcome::Failed(FileError::Io { .. })));
        assert_eq!(session.borrow().buffer(), "keep");
        assert_eq!(session.borrow().file_path(), Some(Path::new("/a.txt")));
    }

    #[test]
    fn test_save_without_path_delegates_to_save_as() {
        let session = shared("fresh");
        let mut files = ScriptedFiles::default();
        files.save_as.push_back(Ok(PathBuf::from("/fresh.txt")));
        let mut prompt = ScriptedPrompt::default();

        let outcome = run_op(Lifecycle::Save, &session, &mut files, &mut prompt);
        assert!(outcome.is_completed());
        assert_eq!(session.borrow().file_path(), Some(Path::new("/fresh.txt")));
        assert!(!session.borrow().is_dirty());
        assert_eq!(session.borrow().title(), "fresh.txt - Notepad");
    }

    #[test]
    fn test_failed_write_keeps_dirty() {
        let session = shared_file("/a.txt", "a");
        session.borrow_mut().replace_selection("b");
        let mut files = ScriptedFiles { fail_writes: true, ..Default::default() };
        let mut prompt = ScriptedPrompt::default();

        let outcome = run_op(Lifecycle::Save, &session, &mut files, &mut prompt);
        assert!(matches!(outcome, Outcome::Failed(_)));
        assert!(session.borrow().is_dirty());
    }

    #[test]
    fn test_save_as_cancel_changes_nothing() {
        let session = shared_file("/a.txt", "a");
        let mut files = ScriptedFiles::default();
        let mut prompt = ScriptedPrompt::default();
        assert!(matches!(run_op(Lifecycle::SaveAs, &session, &mut files, &mut prompt), Outcome::Cancelled));
        assert_eq!(session.borrow().file_path(), Some(Path::new("/a.txt")));
    }

    #[test]
    fn test_save_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("in.txt");
        let target = dir.path().join("out.txt");
        write_text(&source, "first line\nsecond").unwrap();

        let session = shared("");
        let mut files = DiskFiles { open: source, save_as: target.clone() };
        let mut prompt = ScriptedPrompt::default();
        assert!(drive(Workflow::new(Lifecycle::Open, session.clone()), &mut files, &mut prompt).is_completed());

        session.borrow_mut().set_selection(10, 10);
        session.borrow_mut().replace_selection(" edited");
        assert!(drive(Workflow::new(Lifecycle::SaveAs, session.clone()), &mut files, &mut prompt).is_completed());

        assert_eq!(read_text(&target).unwrap(), session.borrow().buffer());
        assert_eq!(session.borrow().buffer(), "first line edited\nsecond");
        assert!(!session.borrow().is_dirty());
    }

    #[test]
    fn test_workflow_yields_requests_in_order() {
        let session = shared("dirty");
        let mut workflow = Workflow::new(Lifecycle::Open, session.clone());

        let Step::Pending(request) = workflow.start() else { panic!("expected prompt") };
        assert_eq!(request, HostRequest::AskSaveDiscardCancel { display_name: "Untitled".into() });

        let Step::Pending(request) = workflow.resume(HostReply::Prompt(PromptChoice::DontSave)) else {
            panic!("expected picker")
        };
        assert_eq!(request, HostRequest::PickAndRead);

        // The session can be inspected while the workflow is suspended
        assert_eq!(session.borrow().buffer(), "dirty");

        let picked = PickedFile { path: PathBuf::from("/c.txt"), content: "sea".into() };
        let Step::Done(outcome) = workflow.resume(HostReply::Read(Ok(picked))) else { panic!("expected done") };
        assert!(outcome.is_completed());
        assert_eq!(session.borrow().buffer(), "sea");

        assert!(matches!(workflow.resume(HostReply::Prompt(PromptChoice::Save)), Step::Done(Outcome::Cancelled)));
    }

    #[test]
    fn test_mismatched_reply_cancels() {
        let session = shared_file("/a.txt", "a");
        let mut workflow = Workflow::new(Lifecycle::Save, session.clone());
        let Step::Pending(HostRequest::Write { path, content }) = workflow.start() else { panic!("expected write") };
        assert_eq!(path, PathBuf::from("/a.txt"));
        assert_eq!(content, "a");
        let step = workflow.resume(HostReply::Prompt(PromptChoice::Save));
        assert!(matches!(step, Step::Done(Outcome::Cancelled)));
    }
}
