use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use super::objectid::create_object_id;
use super::source::Source;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One turn of the conversation. Never mutated once it is in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub created: i64,
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<Source>>,
}

impl Message {
    fn new(role: Role, content: String) -> Self {
        Self {
            id: create_object_id("msg"),
            created: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs() as i64)
                .unwrap_or_default(),
            role,
            content,
            sources: None,
        }
    }

    /// A prompt typed by the user. Blank prompts are refused.
    pub fn user(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Err(anyhow!("User message must include some text"));
        }
        Ok(Self::new(Role::User, text.to_string()))
    }

    pub fn assistant(text: &str) -> Self {
        Self::new(Role::Assistant, text.to_string())
    }

    /// Attach citations. An empty list leaves the message without sources.
    pub fn with_sources(mut self, sources: Option<Vec<Source>>) -> Self {
        self.sources = sources.filter(|s| !s.is_empty());
        self
    }

    pub fn sources(&self) -> &[Source] {
        self.sources.as_deref().unwrap_or_default()
    }

    pub fn has_sources(&self) -> bool {
        !self.sources().is_empty()
    }
}
