//! Notepad for the terminal
//!
//! A Windows 95 style Notepad: one untitled or file-backed document with
//! menus, find/replace, go-to-line, font and view settings.

mod app;
mod command;
mod config;
mod error;
mod host;
mod input;
mod lifecycle;
mod logging;
mod print;
mod screen;
mod session;
mod state;
mod terminal;
mod ui;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use app::App;
use config::Config;
use state::ViewSettings;

#[derive(Parser, Debug)]
#[command(name = "notepad")]
#[command(about = "A Windows 95 style Notepad for the terminal")]
#[command(version)]
/// Command-line arguments.
struct Args {
    /// File to open (starts untitled if omitted)
    file: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Start with word wrap on
    #[arg(long)]
    word_wrap: bool,

    /// Start in dark mode
    #[arg(long)]
    dark: bool,

    /// Start with the status bar hidden
    #[arg(long)]
    no_status_bar: bool,
}

impl Args {
    /// Command-line switches win over the config file
    fn apply(&self, config: &mut Config) {
        if self.word_wrap {
            config.view.word_wrap = true;
        }
        if self.dark {
            config.view.dark_mode = true;
        }
        if self.no_status_bar {
            config.view.status_bar = false;
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref()).context("failed to load config")?;
    args.apply(&mut config);

    let log_path = args
        .log_file
        .clone()
        .or_else(|| config.log.file.clone())
        .unwrap_or_else(logging::default_log_path);
    logging::init(&log_path, args.verbose, config.log.level.as_deref())
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    let mut app = App::new(&config, ViewSettings::from_config(&config)).context("failed to set up terminal")?;
    if let Some(path) = args.file {
        app.open_startup_file(path);
    }
    app.run()?;
    Ok(())
}
