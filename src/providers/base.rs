use anyhow::Result;

use super::types::{message::Message, source::Source};
use crate::errors::AssistantResult;

/// What a successful exchange yields: the answer text and any citations.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub answer: String,
    pub sources: Option<Vec<Source>>,
}

impl Reply {
    pub fn new(answer: String, sources: Option<Vec<Source>>) -> Self {
        Self { answer, sources }
    }

    /// The assistant-role message the caller appends to the store.
    pub fn into_message(self) -> Message {
        Message::assistant(&self.answer).with_sources(self.sources)
    }
}

/// The two values a user has to enter before any exchange.
#[derive(Clone, Copy)]
pub struct Credentials<'a> {
    pub api_token: &'a str,
    pub assistant_id: &'a str,
}

impl std::fmt::Debug for Credentials<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_token", &"<redacted>")
            .field("assistant_id", &self.assistant_id)
            .finish()
    }
}

/// Base trait for assistant backends
pub trait Provider {
    /// Create a provider instance from environment variables
    fn from_env() -> Result<Self>
    where
        Self: Sized;

    /// Send the whole history and wait for the next assistant answer
    fn complete(&self, credentials: Credentials<'_>, messages: &[Message]) -> AssistantResult<Reply>;
}
