//! UI state machine.
//!
//! State transitions are plain method calls, testable without a terminal.
//! The only side effects are calls into the injected `BoardService`.

pub mod app_state;
pub mod line_input;
pub mod mode;

// Re-export for convenience
pub use app_state::{AppState, Status, StatusKind};
pub use line_input::LineInput;
pub use mode::{ComposeRequest, Mode, Outcome, TextEdit};
