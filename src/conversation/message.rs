//! Conversation turns and the append-only transcript

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Author of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Label shown next to a turn when rendering the transcript
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Assistant => "PanditAI",
        }
    }
}

/// A single immutable conversation turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.role.label(), self.content)
    }
}

/// Ordered, append-only log of turns.
///
/// `append` never touches the receiver: it returns a new transcript and
/// leaves earlier snapshots valid, so a renderer holding an old clone
/// keeps seeing a consistent prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    messages: Arc<[Message]>,
}

impl Transcript {
    /// Transcript seeded with a single assistant greeting
    pub fn seeded(greeting: impl Into<String>) -> Self {
        Self {
            messages: Arc::from(vec![Message::assistant(greeting)]),
        }
    }

    #[must_use]
    pub fn append(&self, message: Message) -> Self {
        let mut messages = Vec::with_capacity(self.messages.len() + 1);
        messages.extend(self.messages.iter().cloned());
        messages.push(message);
        Self {
            messages: Arc::from(messages),
        }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn get(&self, index: usize) -> Option<&Message> {
        self.messages.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    /// Turns appended after the first `offset` entries
    pub fn since(&self, offset: usize) -> &[Message] {
        self.messages.get(offset..).unwrap_or(&[])
    }
}
