use crate::errors::{AssistantError, AssistantResult};
use crate::providers::base::Credentials;

/// Token and assistant id entered by the user. Held in memory only.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    api_token: String,
    assistant_id: String,
}

impl SessionConfig {
    pub fn new(api_token: &str, assistant_id: &str) -> Self {
        let mut config = Self::default();
        config.set_api_token(api_token);
        config.set_assistant_id(assistant_id);
        config
    }

    pub fn set_api_token(&mut self, api_token: &str) {
        self.api_token = api_token.trim().to_string();
    }

    pub fn set_assistant_id(&mut self, assistant_id: &str) {
        self.assistant_id = assistant_id.trim().to_string();
    }

    pub fn api_token(&self) -> &str {
        &self.api_token
    }

    pub fn assistant_id(&self) -> &str {
        &self.assistant_id
    }

    pub fn is_complete(&self) -> bool {
        !self.api_token.is_empty() && !self.assistant_id.is_empty()
    }

    pub fn credentials(&self) -> AssistantResult<Credentials<'_>> {
        let missing: Vec<&str> = [
            (self.api_token.is_empty(), "API token"),
            (self.assistant_id.is_empty(), "assistant ID"),
        ]
        .into_iter()
        .filter_map(|(empty, name)| empty.then_some(name))
        .collect();

        if !missing.is_empty() {
            return Err(AssistantError::Configuration(format!(
                "{} not set",
                missing.join(" and ")
            )));
        }

        Ok(Credentials {
            api_token: &self.api_token,
            assistant_id: &self.assistant_id,
        })
    }

    pub fn clear(&mut self) {
        self.api_token.clear();
        self.assistant_id.clear();
    }
}

impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let token = if self.api_token.is_empty() { "" } else { "<redacted>" };
        f.debug_struct("SessionConfig")
            .field("api_token", &token)
            .field("assistant_id", &self.assistant_id)
            .finish()
    }
}
