//! HTTP responder over reqwest

use super::{ChatQuery, ChatReply, Responder, ResponderError};
use crate::config::ResponderConfig;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

const MAX_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Longest body excerpt kept in error messages
const BODY_EXCERPT_CHARS: usize = 200;

/// `POST <base>/chat` responder
pub struct HttpResponder {
    client: Client,
    url: String,
}

impl HttpResponder {
    pub fn new(config: &ResponderConfig) -> Result<Self, ResponderError> {
        let client = Client::builder()
            .connect_timeout(config.timeout.min(MAX_CONNECT_TIMEOUT))
            .build()
            .map_err(|e| ResponderError::network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: config.chat_url(),
        })
    }

    fn classify_send_error(e: &reqwest::Error) -> ResponderError {
        if e.is_timeout() {
            ResponderError::timeout(format!("Request timeout: {e}"))
        } else if e.is_connect() {
            ResponderError::network(format!("Connection failed: {e}"))
        } else {
            ResponderError::network(format!("Request failed: {e}"))
        }
    }
}

fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}

#[async_trait]
impl Responder for HttpResponder {
    async fn respond(&self, query: &ChatQuery) -> Result<ChatReply, ResponderError> {
        let response = self
            .client
            .post(&self.url)
            .json(query)
            .send()
            .await
            .map_err(|e| Self::classify_send_error(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ResponderError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(ResponderError::status(
                status.as_u16(),
                format!("HTTP {}: {}", status, excerpt(&body)),
            ));
        }

        serde_json::from_str::<ChatReply>(&body).map_err(|e| {
            ResponderError::malformed(format!(
                "Failed to parse response: {} - body: {}",
                e,
                excerpt(&body)
            ))
        })
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}
