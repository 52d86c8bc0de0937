//! Boxmark replay host.
//!
//! Replays a recorded session (baseline annotations plus editor events)
//! through the core editor and prints the committed collection.

pub mod session;
pub mod settings;

pub use session::{ReplayOutput, Session, SessionEvent, replay};

use boxmark_core::{ConfigError, ShortcutRegistry};
use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

/// Host errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Session error: {0}")]
    Session(String),
    #[error("Usage: {0}")]
    Usage(String),
}

/// Result type for host operations.
pub type AppResult<T> = Result<T, AppError>;

/// Command-line arguments.
#[derive(Debug, Clone, PartialEq, Eq, Default, Parser)]
#[command(name = "boxmark", version, about = "Replay a recorded Boxmark session")]
pub struct Args {
    /// Configuration file, instead of the default location.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the keyboard shortcuts and exit.
    #[arg(long = "shortcuts")]
    pub list_shortcuts: bool,

    /// Recorded session to replay.
    #[arg(value_name = "SESSION", required_unless_present = "list_shortcuts")]
    pub session: Option<PathBuf>,
}

/// Execute the command described by `args` and return what to print.
pub fn run(args: &Args) -> AppResult<String> {
    if args.list_shortcuts {
        return Ok(ShortcutRegistry::describe());
    }
    let Some(path) = &args.session else {
        return Err(AppError::Usage("a session file is required".to_string()));
    };
    let config = settings::load_config(args.config.as_deref())?;
    let session = Session::load(path)?;
    let output = replay(&session, config);
    output
        .to_json()
        .map_err(|e| AppError::Session(format!("Failed to serialize output: {e}")))
}
