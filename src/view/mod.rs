//! TUI rendering and terminal management (impure shell)

pub mod constants;
mod help;
mod layout;
pub mod styles;
pub mod suspend;

pub use help::render_help_overlay;
pub use layout::render_layout;
pub use styles::{BoardStyles, ColorConfig};
pub use suspend::{SuspendingEditor, TerminalSuspendGuard};

use crate::backend::{BoardService, Editor};
use crate::config::keybindings::KeyBindings;
use crate::model::{BoardError, Identity};
use crate::state::{AppState, ComposeRequest, Outcome, TextEdit};
use constants::POLL_INTERVAL_MS;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, backend::CrosstermBackend, layout::Rect, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that end the TUI session.
///
/// Board failures after startup never get here; they become status lines.
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// The board could not be loaded at startup.
    #[error("Could not load the board: {0}")]
    Board(#[from] BoardError),
}

/// Session settings resolved from configuration.
#[derive(Debug, Clone)]
pub struct TuiOptions {
    /// Who is posting.
    pub identity: Identity,
    /// Board window scroll step.
    pub page_jump: usize,
    /// Key map.
    pub key_bindings: KeyBindings,
    /// Colors and attributes.
    pub styles: BoardStyles,
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    state: AppState,
    service: Box<dyn BoardService>,
    editor: Box<dyn Editor>,
    key_bindings: KeyBindings,
    styles: BoardStyles,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen. If the board
    /// cannot be loaded the terminal is restored before returning.
    pub fn new(
        service: Box<dyn BoardService>,
        editor: Box<dyn Editor>,
        options: TuiOptions,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        Self::with_terminal(terminal, service, editor, options).inspect_err(|_| {
            let _ = restore_terminal();
        })
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Build the app over an already initialized terminal.
    pub fn with_terminal(
        terminal: Terminal<B>,
        service: Box<dyn BoardService>,
        editor: Box<dyn Editor>,
        options: TuiOptions,
    ) -> Result<Self, TuiError> {
        let area = frame_area(&terminal)?;
        let state = AppState::load(service.as_ref(), options.identity, area, options.page_jump)?;
        info!(
            threads = state.board().len(),
            user = %state.identity().user,
            "Board loaded"
        );

        Ok(Self {
            terminal,
            state,
            service,
            editor,
            key_bindings: options.key_bindings,
            styles: options.styles,
        })
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits (Esc on the board, or Ctrl+C anywhere).
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            if !event::poll(Duration::from_millis(POLL_INTERVAL_MS))? {
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if self.handle_key(key)? {
                        return Ok(());
                    }
                    self.draw()?;
                }
                Event::Resize(width, height) => {
                    debug!(width, height, "Terminal resized");
                    self.draw()?;
                }
                _ => {}
            }
        }
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> Result<bool, TuiError> {
        // Ctrl+C quits from every mode, including text entry
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(true);
        }

        if self.state.mode().accepts_text() {
            if let Some(edit) = text_edit(key) {
                self.state.handle_text(edit);
                return Ok(false);
            }
        }

        let Some(action) = self.key_bindings.get(key) else {
            self.state.handle_unbound_key();
            return Ok(false);
        };
        if !action.is_navigation() {
            debug!(?action, mode = self.state.mode().name(), "Key action");
        }

        match self.state.handle_action(action, self.service.as_mut()) {
            Outcome::Continue => Ok(false),
            Outcome::Quit => Ok(true),
            Outcome::Compose(request) => {
                self.compose(request)?;
                Ok(false)
            }
        }
    }

    /// Hand the terminal to the editor, then submit what came back.
    fn compose(&mut self, request: ComposeRequest) -> Result<(), TuiError> {
        info!(?request, "Editor session started");
        let edited = self.editor.edit(request.initial_text());
        info!(ok = edited.is_ok(), "Editor session ended");
        // Whatever the editor drew is still on screen
        self.terminal.clear()?;
        self.state
            .finish_compose(request, edited, self.service.as_mut());
        Ok(())
    }

    /// Render the current frame, relaying out first if the terminal was resized.
    fn draw(&mut self) -> Result<(), TuiError> {
        let area = frame_area(&self.terminal)?;
        self.state.resize(area);

        let state = &self.state;
        let styles = &self.styles;
        self.terminal.draw(|frame| {
            layout::render_layout(frame, state, styles);
        })?;

        Ok(())
    }
}

/// Line-editing keys in text-entry modes. Everything else goes through
/// the key bindings (Enter, Esc, ...).
fn text_edit(key: KeyEvent) -> Option<TextEdit> {
    match key.code {
        KeyCode::Char(ch)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(TextEdit::Insert(ch))
        }
        KeyCode::Backspace => Some(TextEdit::Backspace),
        KeyCode::Left => Some(TextEdit::Left),
        KeyCode::Right => Some(TextEdit::Right),
        _ => None,
    }
}

fn frame_area<B: Backend>(terminal: &Terminal<B>) -> Result<Rect, TuiError> {
    let size = terminal.size()?;
    Ok(Rect::new(0, 0, size.width, size.height))
}

// ===== Test Helpers =====
//
// The following methods are ONLY for testing within the crate.

#[cfg(test)]
impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Get reference to app state (test-only accessor)
    pub(crate) fn app_state(&self) -> &AppState {
        &self.state
    }

    /// Handle a single keyboard event (test-only accessor)
    ///
    /// Returns true if app should quit.
    pub(crate) fn handle_key_test(&mut self, key: KeyEvent) -> bool {
        self.handle_key(key).expect("key handling should not fail on TestBackend")
    }

    /// Render a single frame (test-only accessor)
    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    /// Get reference to terminal (test-only accessor)
    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Mutable terminal access, e.g. to resize the TestBackend.
    pub(crate) fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }
}

/// Initialize and run the TUI application
///
/// Handles terminal setup, runs the event loop, and restores the terminal
/// even when the loop fails.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run(
    service: Box<dyn BoardService>,
    editor: Box<dyn Editor>,
    options: TuiOptions,
) -> Result<(), TuiError> {
    let mut app = TuiApp::new(service, editor, options)?;

    let result = app.run();

    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}
