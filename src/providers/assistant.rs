use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client; // one synchronous call per user turn
use reqwest::Url;
use tracing::{debug, warn};

use super::{
    base::{Credentials, Provider, Reply},
    configs::assistant::AssistantProviderConfig,
    configs::base::ProviderConfig,
    types::message::Message,
    utils::{assistant_response_to_reply, completion_payload},
};
use crate::errors::{AssistantError, AssistantResult};

/// Client for the `agent/{assistant_id}/v1/chat/completions` endpoint.
pub struct AssistantProvider {
    client: Client,
    base_url: Url,
}

impl AssistantProvider {
    pub fn new(config: AssistantProviderConfig) -> Result<Self> {
        let base_url = Url::parse(&config.host)
            .with_context(|| format!("Invalid assistant host: {}", config.host))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("Assistant host must be an http(s) URL: {}", config.host));
        }

        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { client, base_url })
    }

    /// Endpoint for one assistant; the id is encoded as a single path segment.
    pub fn endpoint(&self, assistant_id: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["agent", assistant_id, "v1", "chat", "completions"]);
        }
        url
    }

    /// One request/response exchange. Never retried.
    pub fn send(
        &self,
        api_token: &str,
        assistant_id: &str,
        history: &[Message],
    ) -> AssistantResult<Reply> {
        if api_token.is_empty() || assistant_id.is_empty() {
            let missing = match (api_token.is_empty(), assistant_id.is_empty()) {
                (true, true) => "API token and assistant ID",
                (true, false) => "API token",
                _ => "assistant ID",
            };
            return Err(AssistantError::Configuration(format!("{} not set", missing)));
        }

        let url = self.endpoint(assistant_id);
        let payload = completion_payload(history);
        debug!(%url, messages = history.len(), "sending chat completion request");

        let response = self
            .client
            .post(url)
            .bearer_auth(api_token)
            .json(&payload)
            .send()?;

        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "assistant returned an error status");
            return Err(AssistantError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let reply = assistant_response_to_reply(&body)?;
        debug!(
            answer_len = reply.answer.len(),
            sources = reply.sources.as_ref().map_or(0, Vec::len),
            "received assistant reply"
        );
        Ok(reply)
    }
}

impl Provider for AssistantProvider {
    fn from_env() -> Result<Self> {
        let config = AssistantProviderConfig::from_env()?;
        Self::new(config)
    }

    fn complete(&self, credentials: Credentials<'_>, messages: &[Message]) -> AssistantResult<Reply> {
        self.send(credentials.api_token, credentials.assistant_id, messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn provider(host: &str) -> AssistantProvider {
        AssistantProvider::new(AssistantProviderConfig::new(
            host.to_string(),
            Duration::from_secs(120),
        ))
        .unwrap()
    }

    #[test]
    fn test_endpoint_template() {
        let url = provider("https://bot.insightstream.ru").endpoint("helper");
        assert_eq!(
            url.as_str(),
            "https://bot.insightstream.ru/agent/helper/v1/chat/completions"
        );
    }

    #[test]
    fn test_endpoint_keeps_host_prefix_and_encodes_id() {
        let url = provider("http://localhost:8080/proxy/").endpoint("my bot/2");
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/proxy/agent/my%20bot%2F2/v1/chat/completions"
        );
    }

    #[test]
    fn test_invalid_host_rejected() {
        let result = AssistantProvider::new(AssistantProviderConfig::new(
            "not a url".to_string(),
            Duration::from_secs(1),
        ));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_credentials_fail_before_request() {
        // Port 9 is discard; if a request were made it would fail with a transport error instead.
        let provider = provider("http://127.0.0.1:9");
        let history = vec![Message::user("Hello").unwrap()];

        let err = provider.send("", "helper", &history).unwrap_err();
        assert_eq!(
            err,
            AssistantError::Configuration("API token not set".to_string())
        );

        let err = provider.send("token", "", &history).unwrap_err();
        assert_eq!(
            err,
            AssistantError::Configuration("assistant ID not set".to_string())
        );
    }
}
