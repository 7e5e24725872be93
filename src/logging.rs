//! File logging
//!
//! The terminal is in raw mode while the editor runs, so nothing may be
//! written to stdout or stderr. Events go to a log file instead.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Log file used when neither the command line nor the config names one
pub fn default_log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("notepad-rs")
        .join("notepad.log")
}

/// Filter directives when `RUST_LOG` is not set
fn default_directives(verbose: bool, level: Option<&str>) -> String {
    match (verbose, level) {
        (true, _) => "notepad=debug".to_string(),
        (false, Some(level)) => format!("notepad={}", level),
        (false, None) => "notepad=info".to_string(),
    }
}

/// Install the global subscriber writing to `path`
pub fn init(path: &Path, verbose: bool, level: Option<&str>) -> io::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose, level)));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    tracing::info!(path = %path.display(), "logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_directives() {
        assert_eq!(default_directives(false, None), "notepad=info");
        assert_eq!(default_directives(true, Some("warn")), "notepad=debug");
        assert_eq!(default_directives(false, Some("trace")), "notepad=trace");
    }

    #[test]
    fn test_default_log_path_is_under_app_dir() {
        let path = default_log_path();
        assert!(path.ends_with("notepad-rs/notepad.log"));
    }
}
