//! Layout engine: wrapping, pagination, navigation and the board/thread views.
//!
//! Everything here is pure apart from drawing into an in-memory
//! `ratatui::buffer::Buffer` through a [`Viewport`].
//!
//! # Module Structure
//!
//! - `wrap`: LineWrapper - raw text to width-bounded `DisplayLine`s
//! - `pagination`: Paginator - display lines to fixed-height `Page`s
//! - `viewport`: Viewport - clipped drawing region with border/fill primitives
//! - `list_navigator`: ListNavigator - window + cursor over a long list
//! - `message`: MessageView - one message's lines, pages and active page
//! - `thread`: ThreadView - selected-message anchored thread layout
//! - `board`: BoardView - the thread list panel
//! - `layout`: ScreenLayout - header / panel / status split

pub mod board;
pub mod layout;
pub mod list_navigator;
pub mod message;
pub mod pagination;
pub mod thread;
pub mod viewport;
pub mod wrap;

pub use board::{format_row, BoardView};
pub use layout::ScreenLayout;
pub use list_navigator::{ListNavigator, DEFAULT_PAGE_JUMP};
pub use message::MessageView;
pub use pagination::{paginate, Page};
pub use thread::{DrawStep, ThreadView};
pub use viewport::Viewport;
pub use wrap::{unwrap_lines, wrap, DisplayLine};
