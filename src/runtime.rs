//! Runtime for interactive sessions
//!
//! Owns one session's state, applies transitions in arrival order and
//! executes their effects. The outstanding dispatch is the only work that
//! runs off the event loop.

mod controller;

#[cfg(test)]
pub mod testing;

pub use controller::{ConversationController, SessionHandle};
