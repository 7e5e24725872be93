//! Collaborators the session relies on: file storage and the save prompt
//!
//! Lifecycle workflows never call these directly. They yield a
//! `HostRequest` and wait for the matching `HostReply`, so the terminal
//! host can answer through modal dialogs, or through these traits with
//! `answer`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::FileError;

/// A file chosen by the user and its content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedFile {
    pub path: PathBuf,
    pub content: String,
}

/// Answer to "Do you want to save changes?"
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptChoice {
    Save,
    DontSave,
    Cancel,
}

pub trait FileStore {
    /// Let the user pick a file and read it
    fn pick_and_read(&mut self) -> Result<PickedFile, FileError>;

    /// Write to a known path
    fn write(&mut self, path: &Path, content: &str) -> Result<(), FileError>;

    /// Let the user pick a destination and write to it
    fn pick_path_and_write(&mut self, content: &str) -> Result<PathBuf, FileError>;
}

pub trait PromptService {
    fn ask_save_discard_cancel(&mut self, display_name: &str) -> PromptChoice;
}

/// What a suspended workflow needs from its host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostRequest {
    AskSaveDiscardCancel { display_name: String },
    PickAndRead,
    Write { path: PathBuf, content: String },
    PickPathAndWrite { content: String },
}

impl HostRequest {
    /// The reply given when the user dismisses whatever UI serves this request
    pub fn cancelled(&self) -> HostReply {
        match self {
            HostRequest::AskSaveDiscardCancel { .. } => HostReply::Prompt(PromptChoice::Cancel),
            HostRequest::PickAndRead => HostReply::Read(Err(FileError::Cancelled)),
            HostRequest::Write { .. } => HostReply::Written(Err(FileError::Cancelled)),
            HostRequest::PickPathAndWrite { .. } => HostReply::SavedAs(Err(FileError::Cancelled)),
        }
    }
}

/// The host's answer to a `HostRequest`
#[derive(Debug)]
pub enum HostReply {
    Prompt(PromptChoice),
    Read(Result<PickedFile, FileError>),
    Written(Result<(), FileError>),
    SavedAs(Result<PathBuf, FileError>),
}

/// Serve one request through the collaborator traits
pub fn answer(request: HostRequest, files: &mut dyn FileStore, prompt: &mut dyn PromptService) -> HostReply {
    match request {
        HostRequest::AskSaveDiscardCancel { display_name } => {
            let choice = prompt.ask_save_discard_cancel(&display_name);
            debug!(display_name, ?choice, "save prompt answered");
            HostReply::Prompt(choice)
        }
        HostRequest::PickAndRead => HostReply::Read(files.pick_and_read()),
        HostRequest::Write { path, content } => HostReply::Written(files.write(&path, &content)),
        HostRequest::PickPathAndWrite { content } => HostReply::SavedAs(files.pick_path_and_write(&content)),
    }
}

/// Read a text file. Invalid UTF-8 is replaced rather than rejected.
pub fn read_text(path: &Path) -> Result<String, FileError> {
    let bytes = fs::read(path).map_err(|e| {
        warn!(path = %path.display(), error = %e, "read failed");
        FileError::io(path, e)
    })?;
    let content = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            warn!(path = %path.display(), "file is not valid UTF-8, decoding lossily");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    };
    info!(path = %path.display(), bytes = content.len(), "read file");
    Ok(content)
}

/// Write text exactly as given, no newline is appended
pub fn write_text(path: &Path, content: &str) -> Result<(), FileError> {
    fs::write(path, content).map_err(|e| {
        warn!(path = %path.display(), error = %e, "write failed");
        FileError::io(path, e)
    })?;
    info!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(())
}
