//! Error types for the document session and its collaborators

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure of a file pick, read or write.
#[derive(Debug, Error)]
pub enum FileError {
    /// The user dismissed a picker or prompt. A normal outcome, never shown as a failure.
    #[error("cancelled by user")]
    Cancelled,

    #[error("{}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FileError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        FileError::Io { path: path.into(), source }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, FileError::Cancelled)
    }
}

/// Notices raised by editing commands. These leave the session unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("Cannot find \"{query}\"")]
    NotFound { query: String },

    #[error("The line number is beyond the total number of lines")]
    InvalidLineNumber { line: usize, total: usize },
}
