//! Wire types for the `/chat` exchange

use serde::{Deserialize, Serialize};

/// Request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatQuery {
    pub query: String,
    pub context: String,
}

impl ChatQuery {
    pub fn new(query: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            context: context.into(),
        }
    }
}

/// Success response body. Any other shape is a malformed reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
}
