//! Core conversation state machine
//!
//! Pure `(SessionState, Event) -> (SessionState, Effects)` transitions.
//! The runtime feeds dispatch completions back in as events.

mod effect;
pub mod event;
mod message;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::{DispatchFailure, Event};
pub use message::{Message, Role};
pub use state::{SessionContext, SessionState};
pub use transition::transition;
