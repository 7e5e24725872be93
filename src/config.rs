//! User configuration loaded from TOML
//!
//! ```toml
//! [view]
//! word_wrap = true
//! dark_mode = false
//! status_bar = true
//!
//! [font]
//! family = "Lucida Console"
//! style = "Bold Italic"
//! size = 12
//!
//! [print]
//! command = "lpr"
//! args = ["-P", "office"]
//!
//! [log]
//! file = "/tmp/notepad.log"
//! level = "debug"
//! ```

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error reading {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {}: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub view: ViewConfig,
    pub font: FontConfig,
    pub print: PrintConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewConfig {
    pub word_wrap: bool,
    pub dark_mode: bool,
    pub status_bar: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            word_wrap: false,
            dark_mode: false,
            status_bar: true,
        }
    }
}

/// Font style choices of the Font dialog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum FontStyle {
    #[default]
    Regular,
    Italic,
    Bold,
    #[serde(rename = "Bold Italic")]
    BoldItalic,
}

impl FontStyle {
    pub const ALL: [FontStyle; 4] = [FontStyle::Regular, FontStyle::Italic, FontStyle::Bold, FontStyle::BoldItalic];

    pub fn is_bold(self) -> bool {
        matches!(self, FontStyle::Bold | FontStyle::BoldItalic)
    }

    pub fn is_italic(self) -> bool {
        matches!(self, FontStyle::Italic | FontStyle::BoldItalic)
    }
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FontStyle::Regular => "Regular",
            FontStyle::Italic => "Italic",
            FontStyle::Bold => "Bold",
            FontStyle::BoldItalic => "Bold Italic",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontConfig {
    pub family: String,
    pub style: FontStyle,
    pub size: u16,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "Lucida Console".to_string(),
            style: FontStyle::Regular,
            size: 12,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrintConfig {
    pub command: String,
    pub args: Vec<String>,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            command: "lpr".to_string(),
            args: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    pub file: Option<PathBuf>,
    pub level: Option<String>,
}

impl Config {
    /// `$CONFIG_DIR/notepad-rs/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("notepad-rs").join("config.toml"))
    }

    /// Load an explicitly named file, or the default file if it exists
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(!config.view.word_wrap);
        assert!(!config.view.dark_mode);
        assert!(config.view.status_bar);
        assert_eq!(config.font.family, "Lucida Console");
        assert_eq!(config.font.size, 12);
        assert_eq!(config.print.command, "lpr");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str("[view]\nword_wrap = true\n[font]\nstyle = \"Bold Italic\"\n").unwrap();
        assert!(config.view.word_wrap);
        assert!(config.view.status_bar);
        assert_eq!(config.font.style, FontStyle::BoldItalic);
        assert_eq!(config.font.family, "Lucida Console");
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(toml::from_str::<Config>("[view]\nline_numbers = true\n").is_err());
        assert!(toml::from_str::<Config>("[plugins]\n").is_err());
    }

    #[test]
    fn test_from_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[print]\ncommand = \"cat\"\nargs = [\"-n\"]\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.print, PrintConfig { command: "cat".into(), args: vec!["-n".into()] });

        fs::write(&path, "[view\n").unwrap();
        match Config::load(Some(&path)) {
            Err(ConfigError::Parse { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("expected parse error, got {:?}", other),
        }

        let missing = dir.path().join("missing.toml");
        assert!(matches!(Config::load(Some(&missing)), Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_font_style_names() {
        assert_eq!(FontStyle::BoldItalic.to_string(), "Bold Italic");
        assert!(FontStyle::BoldItalic.is_bold() && FontStyle::BoldItalic.is_italic());
        assert!(!FontStyle::Regular.is_bold());
    }
}
