//! External editor sessions.
//!
//! Editing is one blocking call: write the initial text to a temp file, run
//! the editor on it with the terminal's stdio, wait, read the file back.
//! There is no timeout; the call returns when the editor exits.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::info;

/// Editor used when neither the config nor the environment names one.
pub const DEFAULT_EDITOR: &str = "nano";

/// Failure of an editing session.
#[derive(Debug, Error)]
pub enum EditorError {
    /// The temp file could not be written, read or removed.
    #[error("editor temp file {path}: {source}")]
    TempFile {
        /// Temp file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The editor process could not be started.
    #[error("failed to run editor `{command}`: {source}")]
    Spawn {
        /// Command line that was run.
        command: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The editor exited unsuccessfully.
    #[error("editor `{command}` exited with {status}")]
    Failed {
        /// Command line that was run.
        command: String,
        /// Exit status description.
        status: String,
    },

    /// Terminal could not be handed over to the editor or taken back.
    #[error("terminal handoff failed: {0}")]
    Terminal(#[source] std::io::Error),
}

/// A blocking "edit this text, give me the result" session.
pub trait Editor {
    /// Let the user edit `initial` and return the final text.
    fn edit(&mut self, initial: &str) -> Result<String, EditorError>;
}

/// Runs a shell command line on a temp file.
#[derive(Debug, Clone)]
pub struct ExternalEditor {
    command: String,
}

impl ExternalEditor {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

impl Editor for ExternalEditor {
    fn edit(&mut self, initial: &str) -> Result<String, EditorError> {
        let path = temp_path();
        fs::write(&path, initial).map_err(|source| EditorError::TempFile {
            path: path.clone(),
            source,
        })?;

        info!(command = %self.command, path = %path.display(), "Starting editor session");
        let launched = launch(&self.command, &path);
        let edited = launched.and_then(|()| {
            fs::read_to_string(&path).map_err(|source| EditorError::TempFile {
                path: path.clone(),
                source,
            })
        });
        let _ = fs::remove_file(&path);
        info!(ok = edited.is_ok(), "Editor session finished");
        edited
    }
}

/// `$VISUAL`, then `$EDITOR`, then [`DEFAULT_EDITOR`]. Blank values are skipped.
pub fn resolve_editor_command() -> String {
    env::var("VISUAL")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .or_else(|| env::var("EDITOR").ok().filter(|value| !value.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_EDITOR.to_owned())
}

/// Strip the trailing newlines editors append on save.
pub fn trim_trailing_newlines(text: &str) -> &str {
    text.trim_end_matches(['\n', '\r'])
}

fn temp_path() -> PathBuf {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_nanos())
        .unwrap_or(0);
    env::temp_dir().join(format!("gbb-{}-{ts}.txt", std::process::id()))
}

fn launch(command: &str, path: &Path) -> Result<(), EditorError> {
    let status = Command::new("sh")
        .arg("-c")
        .arg(format!("{command} {}", shell_single_quote(&path.to_string_lossy())))
        .status()
        .map_err(|source| EditorError::Spawn {
            command: command.to_owned(),
            source,
        })?;
    if !status.success() {
        return Err(EditorError::Failed {
            command: command.to_owned(),
            status: status.to_string(),
        });
    }
    Ok(())
}

fn shell_single_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}
