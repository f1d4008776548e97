use anyhow::Result;
use std::sync::{Arc, Mutex};

use super::base::{Credentials, Provider, Reply};
use super::types::message::Message;
use crate::errors::{AssistantError, AssistantResult};

/// A mock provider that returns pre-configured results and records every history it saw
pub struct MockProvider {
    responses: Arc<Mutex<Vec<AssistantResult<Reply>>>>,
    calls: Arc<Mutex<Vec<Vec<Message>>>>,
}

impl MockProvider {
    pub fn new(responses: Vec<AssistantResult<Reply>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<Vec<Message>> {
        self.calls.lock().unwrap().clone()
    }
}

impl Provider for MockProvider {
    fn from_env() -> Result<Self> {
        Ok(Self::new(Vec::new()))
    }

    fn complete(&self, _credentials: Credentials<'_>, messages: &[Message]) -> AssistantResult<Reply> {
        self.calls.lock().unwrap().push(messages.to_vec());
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Err(AssistantError::EmptyResponse)
        } else {
            responses.remove(0)
        }
    }
}
