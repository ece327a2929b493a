//! Remote responder abstraction
//!
//! One `POST /chat` exchange carrying `{query, context}` and answering
//! `{response}`.

mod error;
mod http;
mod types;

pub use error::{ResponderError, ResponderErrorKind};
pub use http::HttpResponder;
pub use types::{ChatQuery, ChatReply};

use async_trait::async_trait;
use std::sync::Arc;

/// Transport to the remote inference service
#[async_trait]
pub trait Responder: Send + Sync {
    /// Perform one exchange
    async fn respond(&self, query: &ChatQuery) -> Result<ChatReply, ResponderError>;

    /// Address the exchange is sent to
    fn endpoint(&self) -> &str;
}

#[async_trait]
impl<T: Responder + ?Sized> Responder for Arc<T> {
    async fn respond(&self, query: &ChatQuery) -> Result<ChatReply, ResponderError> {
        (**self).respond(query).await
    }

    fn endpoint(&self) -> &str {
        (**self).endpoint()
    }
}

/// Logging wrapper for responders
pub struct LoggingResponder<R> {
    inner: R,
}

impl<R: Responder> LoggingResponder<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<R: Responder> Responder for LoggingResponder<R> {
    async fn respond(&self, query: &ChatQuery) -> Result<ChatReply, ResponderError> {
        let start = std::time::Instant::now();
        let result = self.inner.respond(query).await;
        let duration = start.elapsed();

        match &result {
            Ok(reply) => {
                tracing::info!(
                    endpoint = %self.inner.endpoint(),
                    duration_ms = %duration.as_millis(),
                    query_chars = query.query.chars().count(),
                    response_chars = reply.response.chars().count(),
                    "Responder exchange completed"
                );
            }
            Err(e) => {
                tracing::warn!(
                    endpoint = %self.inner.endpoint(),
                    duration_ms = %duration.as_millis(),
                    kind = ?e.kind,
                    error = %e.message,
                    "Responder exchange failed"
                );
            }
        }

        result
    }

    fn endpoint(&self) -> &str {
        self.inner.endpoint()
    }
}
