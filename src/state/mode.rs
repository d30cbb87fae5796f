//! Exclusive UI modes and what the event loop should do after a key.

use super::line_input::LineInput;
use crate::model::{MessageId, ThreadId};
use crate::view_state::ThreadView;

/// The active UI state. Exactly one is active at a time.
///
/// Each variant carries only the data its mode needs: the open thread's
/// layout, the line being typed, or the mode to return to from help.
#[derive(Debug, Clone)]
pub enum Mode {
    /// Thread list. Initial mode.
    Board,
    /// One open thread.
    Thread(Box<ThreadView>),
    /// Typing the title of a new thread.
    ComposeTitle(LineInput),
    /// Typing a search pattern.
    SearchInput(LineInput),
    /// Help panel over `previous`.
    Help {
        /// Mode restored when help closes.
        previous: Box<Mode>,
    },
}

impl Mode {
    /// Short name for logs and the status bar.
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Board => "board",
            Mode::Thread(_) => "thread",
            Mode::ComposeTitle(_) => "compose-title",
            Mode::SearchInput(_) => "search",
            Mode::Help { .. } => "help",
        }
    }

    /// Whether printable keys go to a [`LineInput`] instead of key bindings.
    pub fn accepts_text(&self) -> bool {
        matches!(self, Mode::ComposeTitle(_) | Mode::SearchInput(_))
    }

    /// The mode drawn underneath help (or `self` when help is closed).
    pub fn base(&self) -> &Mode {
        match self {
            Mode::Help { previous } => previous.base(),
            other => other,
        }
    }

    /// The line being typed in text-entry modes.
    pub fn line_input(&self) -> Option<&LineInput> {
        match self {
            Mode::ComposeTitle(input) | Mode::SearchInput(input) => Some(input),
            _ => None,
        }
    }
}

/// An edit to the line in a text-entry mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEdit {
    /// Insert a character at the cursor.
    Insert(char),
    /// Delete the character before the cursor.
    Backspace,
    /// Cursor one character left.
    Left,
    /// Cursor one character right.
    Right,
}

/// Text the event loop must collect from the editor before continuing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposeRequest {
    /// Opening message of a new thread titled `title`.
    NewThread {
        /// Title typed in `ComposeTitle`.
        title: String,
    },
    /// Reply to `thread`.
    Reply {
        /// Thread replied to.
        thread: ThreadId,
    },
    /// New text for an existing message, pre-filled with `original`.
    Edit {
        /// Thread the message belongs to.
        thread: ThreadId,
        /// Message being edited.
        message: MessageId,
        /// Current text.
        original: String,
    },
}

impl ComposeRequest {
    /// Text the editor starts with.
    pub fn initial_text(&self) -> &str {
        match self {
            ComposeRequest::Edit { original, .. } => original,
            _ => "",
        }
    }
}

/// What the event loop does after one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Redraw and wait for the next key.
    Continue,
    /// Leave the loop.
    Quit,
    /// Suspend the terminal, run the editor, then call
    /// [`AppState::finish_compose`](super::AppState::finish_compose).
    Compose(ComposeRequest),
}
