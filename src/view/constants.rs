//! Layout dimension constants for TUI rendering.

/// Height of the header row (title, thread count, user).
pub const HEADER_HEIGHT: u16 = 1;

/// Height of the status bar in lines.
///
/// Holds the status message, the line-input buffer, or key hints.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Width percentage for help overlay popup.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 60;

/// Height percentage for help overlay popup.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 80;

/// Poll interval of the event loop.
pub const POLL_INTERVAL_MS: u64 = 100;
