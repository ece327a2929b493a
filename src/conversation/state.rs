//! Session state types

use super::message::Transcript;

/// Opening assistant turn of every session
pub const GREETING: &str = "Namaste. I have analyzed your chart. Ask me anything about your career, relationships, destiny and how to make it better.";

/// Reply appended for any transport failure, whatever its cause
pub const TRANSPORT_APOLOGY: &str =
    "I am having trouble connecting to the cosmos right now. Please try again.";

/// Reply appended when the responder does not answer in time
pub const TIMEOUT_APOLOGY: &str =
    "The stars are taking too long to answer. Please ask again in a moment.";

/// Reply appended when the user withdraws an outstanding question
pub const CANCELLED_NOTICE: &str = "The question was withdrawn before the stars could answer.";

/// Waiting line shown while an exchange is outstanding
pub const PENDING_INDICATOR: &str = "Consulting the stars...";

/// Context sent with each query when no chart context was supplied
pub const DEFAULT_CONTEXT: &str = "No context available.";

/// Immutable per-session inputs to the transition function
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub session_id: String,
    /// Chart context forwarded with every query
    pub context: String,
}

impl SessionContext {
    pub fn new(session_id: impl Into<String>, context: impl Into<String>) -> Self {
        let context = context.into();
        Self {
            session_id: session_id.into(),
            context: if context.trim().is_empty() {
                DEFAULT_CONTEXT.to_string()
            } else {
                context
            },
        }
    }
}

/// Renderable state of one conversation.
///
/// `pending` is true exactly while the dispatch identified by `ticket`
/// is outstanding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub transcript: Transcript,
    pub pending: bool,
    pub draft: String,
    /// Identifier of the most recently issued dispatch (0 = none yet)
    pub ticket: u64,
}

impl SessionState {
    /// Freshly mounted session: greeting only, nothing outstanding
    pub fn new() -> Self {
        Self {
            transcript: Transcript::seeded(GREETING),
            pending: false,
            draft: String::new(),
            ticket: 0,
        }
    }

    /// Ticket of the outstanding dispatch, if any
    pub fn outstanding(&self) -> Option<u64> {
        self.pending.then_some(self.ticket)
    }

    pub fn pending_indicator(&self) -> Option<&'static str> {
        self.pending.then_some(PENDING_INDICATOR)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
