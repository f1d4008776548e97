use super::base::ProviderConfig;
use anyhow::{Context, Result};
use std::time::Duration;

pub const ASSISTANT_HOST: &str = "https://bot.insightstream.ru";
pub const ASSISTANT_TIMEOUT_SECS: u64 = 120;

pub struct AssistantProviderConfig {
    pub host: String,
    pub timeout: Duration,
}

impl AssistantProviderConfig {
    pub fn new(host: String, timeout: Duration) -> Self {
        Self { host, timeout }
    }
}

impl Default for AssistantProviderConfig {
    fn default() -> Self {
        Self::new(
            ASSISTANT_HOST.to_string(),
            Duration::from_secs(ASSISTANT_TIMEOUT_SECS),
        )
    }
}

impl ProviderConfig for AssistantProviderConfig {
    fn from_env() -> Result<Self> {
        let host = Self::get_env("RAGCHAT_HOST", false, Some(ASSISTANT_HOST.to_string()))?
            .unwrap_or_else(|| ASSISTANT_HOST.to_string());

        let timeout = match Self::get_env("RAGCHAT_TIMEOUT_SECS", false, None)? {
            Some(secs) => secs
                .trim()
                .parse::<u64>()
                .context("RAGCHAT_TIMEOUT_SECS must be a whole number of seconds")?,
            None => ASSISTANT_TIMEOUT_SECS,
        };

        Ok(Self::new(host, Duration::from_secs(timeout)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AssistantProviderConfig::default();
        assert_eq!(config.host, ASSISTANT_HOST);
        assert_eq!(config.timeout, Duration::from_secs(120));
    }
}
