//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod board;
pub mod error;
pub mod identifiers;
pub mod identity;
pub mod key_action;
pub mod records;

// Re-export for convenience
pub use board::{board_order, Board, BoardEntry};
pub use error::BoardError;
pub use identifiers::{InvalidThreadId, MessageId, ThreadId};
pub use identity::Identity;
pub use key_action::KeyAction;
pub use records::{format_date, BoardRecord, MessageRecord, ThreadRecord, ThreadSummary};
