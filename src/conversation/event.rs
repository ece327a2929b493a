//! Events that can occur in a conversation

use std::fmt;

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // User events
    Submit {
        text: String,
    },
    DraftChanged {
        text: String,
    },
    Cancel,

    // Dispatch completions
    DispatchSucceeded {
        ticket: u64,
        response: String,
    },
    DispatchFailed {
        ticket: u64,
        failure: DispatchFailure,
    },
}

/// Why an exchange produced no usable reply.
///
/// Only `TimedOut` changes what the user sees; every other cause is
/// rendered with the same apology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchFailure {
    /// Connection refused, reset, DNS failure
    Network,
    /// Responder answered with a non-success HTTP status
    Status(u16),
    /// Body was not JSON or lacked a string `response` field
    MalformedReply,
    /// No answer within the configured timeout
    TimedOut,
}

impl fmt::Display for DispatchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchFailure::Network => write!(f, "network error"),
            DispatchFailure::Status(code) => write!(f, "HTTP status {code}"),
            DispatchFailure::MalformedReply => write!(f, "malformed reply"),
            DispatchFailure::TimedOut => write!(f, "timed out"),
        }
    }
}
