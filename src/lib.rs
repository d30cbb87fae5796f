//! gbb - terminal client for a threaded bulletin board
//!
//! The crate is split into a pure core and an impure shell:
//! - [`model`]: board data, identities, key actions, errors
//! - [`view_state`]: layout engine (wrapping, pagination, scrolling, views)
//! - [`state`]: the mode state machine driven one key at a time
//! - [`backend`]: board service, local JSON store, external editor
//! - [`view`]: terminal setup, rendering and the event loop
//! - [`config`], [`logging`]: startup plumbing

pub mod backend;
pub mod config;
pub mod logging;
pub mod model;
pub mod state;
pub mod view;
pub mod view_state;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
