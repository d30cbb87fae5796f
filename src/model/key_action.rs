//! Domain-level keyboard actions independent of key bindings.

/// User intent, decoupled from the physical key that produced it.
///
/// The mapping from `crossterm::event::KeyEvent` to `KeyAction` lives in
/// [`crate::config::KeyBindings`]. Text-entry modes bypass this mapping for
/// printable characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Navigation
    /// Move the cursor up one thread, or to the previous message. Default: ↑/k
    Up,
    /// Move the cursor down one thread, or to the next message. Default: ↓/j
    Down,
    /// Previous page of the selected message. Default: Page Up
    PageUp,
    /// Next page of the selected message. Default: Page Down
    PageDown,

    // Mode transitions
    /// Open the selected thread / submit the input line. Default: Enter
    Confirm,
    /// Leave the current mode; quits from the board. Default: Esc
    Back,
    /// Toggle the help panel. Default: ?
    Help,

    // Board commands
    /// New thread (board) or reply (thread). Default: a
    Add,
    /// Delete thread or message, requires pressing twice. Default: d
    Delete,
    /// Edit the selected message. Default: e
    Edit,
    /// Start a text search over the board. Default: b, /
    Search,
    /// Pin or unpin the selected thread (admin). Default: f
    TogglePin,
    /// Close or reopen the selected thread (admin). Default: c
    ToggleClosed,
    /// Refetch the board. Default: r
    Refresh,

    // Application
    /// Exit immediately. Default: Ctrl+C
    Quit,
}

impl KeyAction {
    /// Whether the action is a cursor/page movement.
    pub fn is_navigation(self) -> bool {
        matches!(
            self,
            KeyAction::Up | KeyAction::Down | KeyAction::PageUp | KeyAction::PageDown
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_actions_are_classified() {
        for action in [
            KeyAction::Up,
            KeyAction::Down,
            KeyAction::PageUp,
            KeyAction::PageDown,
        ] {
            assert!(action.is_navigation(), "{action:?}");
        }
    }

    #[test]
    fn commands_are_not_navigation() {
        for action in [
            KeyAction::Add,
            KeyAction::Delete,
            KeyAction::Confirm,
            KeyAction::Back,
            KeyAction::Quit,
        ] {
            assert!(!action.is_navigation(), "{action:?}");
        }
    }
}
