//! Single-exchange request dispatcher
//!
//! Turns one responder call into a [`DispatchOutcome`]. Every failure,
//! including an exceeded timeout, comes back as a value; nothing escapes
//! as an error.

use crate::conversation::{DispatchFailure, Event};
use crate::responder::{ChatQuery, Responder};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// How an exchange ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Succeeded(String),
    Failed(DispatchFailure),
}

impl DispatchOutcome {
    /// Completion event for the dispatch identified by `ticket`
    pub fn into_event(self, ticket: u64) -> Event {
        match self {
            DispatchOutcome::Succeeded(response) => Event::DispatchSucceeded { ticket, response },
            DispatchOutcome::Failed(failure) => Event::DispatchFailed { ticket, failure },
        }
    }
}

/// Performs exchanges with the remote responder, bounded by a timeout.
///
/// Callers must not start a second exchange while one is outstanding;
/// the conversation state machine enforces that.
pub struct RequestDispatcher<R> {
    responder: Arc<R>,
    timeout: Duration,
}

impl<R> Clone for RequestDispatcher<R> {
    fn clone(&self) -> Self {
        Self {
            responder: Arc::clone(&self.responder),
            timeout: self.timeout,
        }
    }
}

impl<R: Responder> RequestDispatcher<R> {
    pub fn new(responder: R, timeout: Duration) -> Self {
        Self {
            responder: Arc::new(responder),
            timeout,
        }
    }

    #[cfg(test)]
    pub fn responder(&self) -> &Arc<R> {
        &self.responder
    }

    /// Run one exchange to completion, failure or timeout
    pub async fn send(&self, query: &str, context: &str) -> DispatchOutcome {
        let request = ChatQuery::new(query, context);
        match tokio::time::timeout(self.timeout, self.responder.respond(&request)).await {
            Ok(Ok(reply)) => DispatchOutcome::Succeeded(reply.response),
            Ok(Err(e)) => {
                tracing::debug!(error = %e, kind = ?e.kind, "Dispatch failed");
                DispatchOutcome::Failed(e.to_failure())
            }
            Err(_) => {
                tracing::warn!(timeout_ms = %self.timeout.as_millis(), "Dispatch timed out");
                DispatchOutcome::Failed(DispatchFailure::TimedOut)
            }
        }
    }

    /// Like [`send`](Self::send), but gives up silently once `cancel` fires.
    ///
    /// Returns `None` when cancelled; the session has already settled the
    /// turn in that case.
    pub async fn send_cancellable(
        &self,
        query: &str,
        context: &str,
        cancel: &CancellationToken,
    ) -> Option<DispatchOutcome> {
        tokio::select! {
            () = cancel.cancelled() => None,
            outcome = self.send(query, context) => Some(outcome),
        }
    }
}
