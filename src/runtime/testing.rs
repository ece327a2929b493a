//! Mock implementations for testing
//!
//! These mocks enable session tests without a real responder.

use crate::responder::{ChatQuery, ChatReply, Responder, ResponderError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

// ============================================================================
// Mock Responder
// ============================================================================

/// Mock responder that returns queued replies
pub struct MockResponder {
    replies: Mutex<VecDeque<Result<ChatReply, ResponderError>>>,
    /// Record of all queries made
    pub queries: Mutex<Vec<ChatQuery>>,
}

impl MockResponder {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful reply
    pub fn queue_reply(&self, response: impl Into<String>) {
        self.replies.lock().unwrap().push_back(Ok(ChatReply {
            response: response.into(),
        }));
    }

    /// Queue an error
    pub fn queue_error(&self, error: ResponderError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded queries
    pub fn recorded_queries(&self) -> Vec<ChatQuery> {
        self.queries.lock().unwrap().clone()
    }

    fn next_reply(&self) -> Result<ChatReply, ResponderError> {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ResponderError::network("No mock reply queued")))
    }
}

impl Default for MockResponder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Responder for MockResponder {
    async fn respond(&self, query: &ChatQuery) -> Result<ChatReply, ResponderError> {
        self.queries.lock().unwrap().push(query.clone());
        self.next_reply()
    }

    fn endpoint(&self) -> &str {
        "mock://chat"
    }
}

// ============================================================================
// Delayed Mock Responder (for pending/cancellation testing)
// ============================================================================

/// Mock responder that waits before answering
pub struct DelayedMockResponder {
    inner: MockResponder,
    delay: Duration,
    /// Notified when a query arrives (for test synchronization)
    pub request_started: Arc<Notify>,
    /// Released by tests to answer before `delay` elapses
    pub release: Arc<Notify>,
}

impl DelayedMockResponder {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: MockResponder::new(),
            delay,
            request_started: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
        }
    }

    pub fn queue_reply(&self, response: impl Into<String>) {
        self.inner.queue_reply(response);
    }

    pub fn recorded_queries(&self) -> Vec<ChatQuery> {
        self.inner.recorded_queries()
    }
}

#[async_trait]
impl Responder for DelayedMockResponder {
    async fn respond(&self, query: &ChatQuery) -> Result<ChatReply, ResponderError> {
        self.inner.queries.lock().unwrap().push(query.clone());
        // notify_one stores a permit, so a test that starts waiting late
        // still observes the start
        self.request_started.notify_one();
        tokio::select! {
            () = tokio::time::sleep(self.delay) => {}
            () = self.release.notified() => {}
        }
        self.inner.next_reply()
    }

    fn endpoint(&self) -> &str {
        "mock://delayed-chat"
    }
}
