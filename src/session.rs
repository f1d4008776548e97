pub mod settings;
pub mod store;

use tracing::{info, info_span, warn};

use crate::errors::{AssistantError, AssistantResult};
use crate::providers::base::Provider;
use crate::providers::types::message::Message;
use crate::providers::types::objectid::create_object_id;
use settings::SessionConfig;
use store::ConversationStore;

/// One interactive use of the client: its configuration and its transcript.
///
/// Handlers receive the session explicitly; nothing here is global.
#[derive(Debug)]
pub struct Session {
    id: String,
    pub config: SessionConfig,
    store: ConversationStore,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Session {
            id: create_object_id("session"),
            config,
            store: ConversationStore::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn messages(&self) -> &[Message] {
        self.store.snapshot()
    }

    /// Run one user turn against `provider` and return the answer that was
    /// appended.
    ///
    /// With incomplete configuration or a blank prompt nothing is appended.
    /// Any other failure appends an assistant notice in place of the answer
    /// and returns the error so the caller can surface it.
    pub fn submit<P: Provider>(&mut self, provider: &P, text: &str) -> AssistantResult<Message> {
        let _span = info_span!("turn", session = %self.id, turn = self.store.len()).entered();

        let credentials = self.config.credentials()?;
        let prompt =
            Message::user(text).map_err(|e| AssistantError::InvalidPrompt(e.to_string()))?;
        self.store.append(prompt);

        match provider.complete(credentials, self.store.snapshot()) {
            Ok(reply) => {
                info!(
                    sources = reply.sources.as_ref().map_or(0, Vec::len),
                    "assistant answered"
                );
                let answer = reply.into_message();
                self.store.append(answer.clone());
                Ok(answer)
            }
            Err(err) => {
                warn!(error = %err, "assistant exchange failed");
                self.store.append(Message::assistant(&format!(
                    "Sorry, I encountered an error: {}",
                    err
                )));
                Err(err)
            }
        }
    }

    /// Start over: forget the credentials and the transcript together.
    pub fn reset(&mut self) {
        info!(session = %self.id, "resetting session");
        self.store.clear();
        self.config.clear();
    }

    /// Hint shown while the transcript is empty.
    pub fn status(&self) -> Option<String> {
        if !self.store.is_empty() {
            return None;
        }
        if self.config.is_complete() {
            Some(format!(
                "Ready to chat with '{}'! Type your first message below.",
                self.config.assistant_id()
            ))
        } else {
            Some(
                "Please configure your API Token and Assistant Name to begin.".to_string(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::base::Reply;
    use crate::providers::mock::MockProvider;
    use crate::providers::types::message::Role;
    use crate::providers::types::source::Source;
    use crate::providers::utils::messages_to_assistant_spec;
    use anyhow::Result;
    use serde_json::json;

    fn configured() -> Session {
        Session::new(SessionConfig::new("tok", "helper"))
    }

    #[test]
    fn test_submit_appends_user_and_answer() -> Result<()> {
        let provider = MockProvider::new(vec![Ok(Reply::new(
            "Hi".to_string(),
            Some(vec![Source::new("doc1", "http://x")]),
        ))]);
        let mut session = configured();

        let answer = session.submit(&provider, "Hello").unwrap();
        assert_eq!(answer.role, Role::Assistant);
        assert_eq!(answer.content, "Hi");
        assert_eq!(answer.sources()[0].display_name(), "doc1");

        let messages = session.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, "Hello");
        assert_eq!(messages[1].content, "Hi");

        // The provider saw the history including the new prompt.
        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].len(), 1);
        assert_eq!(calls[0][0].content, "Hello");
        Ok(())
    }

    #[test]
    fn test_submit_without_config_appends_nothing() -> Result<()> {
        let provider = MockProvider::new(vec![]);
        let mut session = Session::new(SessionConfig::default());

        let err = session.submit(&provider, "Hello").unwrap_err();
        assert!(err.is_configuration());
        assert!(session.messages().is_empty());
        assert!(provider.calls().is_empty());
        Ok(())
    }

    #[test]
    fn test_blank_prompt_appends_nothing() {
        let provider = MockProvider::new(vec![]);
        let mut session = configured();

        let err = session.submit(&provider, "  \n").unwrap_err();
        assert!(matches!(err, AssistantError::InvalidPrompt(_)));
        assert!(session.messages().is_empty());
        assert!(provider.calls().is_empty());
    }

    #[test]
    fn test_failed_exchange_appends_notice() -> Result<()> {
        let provider = MockProvider::new(vec![Err(AssistantError::Http {
            status: 500,
            body: "boom".to_string(),
        })]);
        let mut session = configured();

        let err = session.submit(&provider, "Hello").unwrap_err();
        assert!(matches!(err, AssistantError::Http { status: 500, .. }));

        let messages = session.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].role, Role::Assistant);
        assert!(messages[1]
            .content
            .starts_with("Sorry, I encountered an error: HTTP error occurred: 500"));
        assert!(!messages[1].has_sources());
        Ok(())
    }

    #[test]
    fn test_sources_never_resent() -> Result<()> {
        let provider = MockProvider::new(vec![
            Ok(Reply::new(
                "Hi".to_string(),
                Some(vec![Source::new("doc1", "http://x")]),
            )),
            Ok(Reply::new("Sure".to_string(), None)),
        ]);
        let mut session = configured();

        session.submit(&provider, "Hello").unwrap();
        session.submit(&provider, "More?").unwrap();

        let calls = provider.calls();
        let second = messages_to_assistant_spec(&calls[1]);
        assert_eq!(
            serde_json::Value::Array(second),
            json!([
                {"role": "user", "content": "Hello"},
                {"role": "assistant", "content": "Hi"},
                {"role": "user", "content": "More?"}
            ])
        );
        Ok(())
    }

    #[test]
    fn test_reset_clears_config_and_transcript() -> Result<()> {
        let provider = MockProvider::new(vec![Ok(Reply::new("Hi".to_string(), None))]);
        let mut session = configured();
        session.submit(&provider, "Hello").unwrap();

        session.reset();

        assert!(session.messages().is_empty());
        assert!(!session.config.is_complete());
        let err = session.submit(&provider, "Again").unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(provider.calls().len(), 1);
        Ok(())
    }

    #[test]
    fn test_status_hint() -> Result<()> {
        let mut session = Session::new(SessionConfig::default());
        assert!(session.status().unwrap().starts_with("Please configure"));

        session.config = SessionConfig::new("tok", "helper");
        assert_eq!(
            session.status().unwrap(),
            "Ready to chat with 'helper'! Type your first message below."
        );

        let provider = MockProvider::new(vec![Ok(Reply::new("Hi".to_string(), None))]);
        session.submit(&provider, "Hello").unwrap();
        assert!(session.status().is_none());
        Ok(())
    }
}
