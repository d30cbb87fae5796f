//! Handing the terminal to a child process and taking it back.

use crate::backend::{Editor, EditorError};
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io;

/// Leaves raw mode and the alternate screen; restores both on drop.
///
/// The caller must repaint the whole screen afterwards (`Terminal::clear`).
pub struct TerminalSuspendGuard {
    _private: (),
}

impl TerminalSuspendGuard {
    pub fn new() -> io::Result<Self> {
        disable_raw_mode()?;

        if let Err(err) = execute!(io::stdout(), LeaveAlternateScreen, Show) {
            let _ = enable_raw_mode();
            let _ = execute!(io::stdout(), EnterAlternateScreen, Hide);
            return Err(err);
        }

        Ok(Self { _private: () })
    }
}

impl Drop for TerminalSuspendGuard {
    fn drop(&mut self) {
        let _ = enable_raw_mode();
        let _ = execute!(io::stdout(), EnterAlternateScreen, Hide);
    }
}

/// Runs `inner` with the terminal suspended around it.
#[derive(Debug, Clone)]
pub struct SuspendingEditor<E> {
    inner: E,
}

impl<E: Editor> SuspendingEditor<E> {
    pub fn new(inner: E) -> Self {
        Self { inner }
    }
}

impl<E: Editor> Editor for SuspendingEditor<E> {
    fn edit(&mut self, initial: &str) -> Result<String, EditorError> {
        let _suspend = TerminalSuspendGuard::new().map_err(EditorError::Terminal)?;
        self.inner.edit(initial)
    }
}
