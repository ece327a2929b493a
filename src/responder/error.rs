//! Responder error types

use crate::conversation::DispatchFailure;
use thiserror::Error;

/// Responder error with classification
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ResponderError {
    pub kind: ResponderErrorKind,
    pub message: String,
}

impl ResponderError {
    pub fn new(kind: ResponderErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ResponderErrorKind::Network, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ResponderErrorKind::Timeout, message)
    }

    pub fn status(code: u16, message: impl Into<String>) -> Self {
        Self::new(ResponderErrorKind::Status(code), message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ResponderErrorKind::MalformedReply, message)
    }

    /// Collapse into the detail-free failure signal the session sees
    pub fn to_failure(&self) -> DispatchFailure {
        match self.kind {
            ResponderErrorKind::Network => DispatchFailure::Network,
            ResponderErrorKind::Timeout => DispatchFailure::TimedOut,
            ResponderErrorKind::Status(code) => DispatchFailure::Status(code),
            ResponderErrorKind::MalformedReply => DispatchFailure::MalformedReply,
        }
    }
}

/// Error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponderErrorKind {
    /// Connection or transport failure
    Network,
    /// Transport-level timeout
    Timeout,
    /// Non-success HTTP status
    Status(u16),
    /// Body unreadable or missing a string `response`
    MalformedReply,
}
