//! Printing by piping the buffer into a print command

use std::io::{self, Write};
use std::process::{Command, ExitStatus, Stdio};

use thiserror::Error;
use tracing::{info, warn};

use crate::config::PrintConfig;

#[derive(Debug, Error)]
pub enum PrintError {
    #[error("could not start \"{command}\": {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("could not send the document to \"{command}\": {source}")]
    Io {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("\"{command}\" failed ({status})")]
    Failed { command: String, status: ExitStatus },
}

/// Runs the configured print command
#[derive(Debug, Clone)]
pub struct Printer {
    command: String,
    args: Vec<String>,
}

impl Printer {
    pub fn new(config: &PrintConfig) -> Self {
        Self {
            command: config.command.clone(),
            args: config.args.clone(),
        }
    }

    /// Feed `content` to the command's stdin and wait for it.
    /// Its own output is discarded since the terminal belongs to the editor.
    pub fn print(&self, title: &str, content: &str) -> Result<(), PrintError> {
        let mut child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| PrintError::Spawn { command: self.command.clone(), source })?;

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(source) = stdin.write_all(content.as_bytes()) {
                // Reap the child before reporting
                drop(stdin);
                let _ = child.kill();
                let _ = child.wait();
                warn!(command = %self.command, error = %source, "print command stopped reading");
                return Err(PrintError::Io { command: self.command.clone(), source });
            }
        }

        let status = child
            .wait()
            .map_err(|source| PrintError::Io { command: self.command.clone(), source })?;
        if !status.success() {
            warn!(command = %self.command, %status, "print command failed");
            return Err(PrintError::Failed { command: self.command.clone(), status });
        }
        info!(command = %self.command, title, bytes = content.len(), "printed");
        Ok(())
    }
}
