use anyhow::{anyhow, Result};
use std::env;

pub trait ProviderConfig {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self>
    where
        Self: Sized;

    /// Read an environment variable, falling back to `default` when it is optional
    fn get_env(key: &str, required: bool, default: Option<String>) -> Result<Option<String>> {
        match env::var(key) {
            Ok(value) => Ok(Some(value)),
            Err(env::VarError::NotPresent) if !required => Ok(default),
            Err(env::VarError::NotPresent) => Err(anyhow!(
                "Environment variable '{}' is required but not set.",
                key
            )),
            Err(e) => Err(anyhow!("Environment variable '{}' is invalid: {}", key, e)),
        }
    }
}
