use thiserror::Error;

/// Everything that can go wrong during one exchange with the assistant.
///
/// All variants are local to a single turn: the session stays usable and the
/// user can retry right away.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssistantError {
    #[error("API Token or Assistant ID is missing: {0}")]
    Configuration(String),

    #[error("Invalid prompt: {0}")]
    InvalidPrompt(String),

    #[error("Request error: {0}")]
    Transport(String),

    #[error("HTTP error occurred: {status}. Response: {body}")]
    Http { status: u16, body: String },

    #[error("JSON decode error ({detail}). Response: {body}")]
    Protocol { detail: String, body: String },

    #[error("Unexpected API response structure: {0}")]
    Shape(String),

    #[error("Received an empty response from the assistant.")]
    EmptyResponse,
}

impl AssistantError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, AssistantError::Configuration(_))
    }
}

impl From<reqwest::Error> for AssistantError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AssistantError::Transport(format!("request timed out: {}", err))
        } else if err.is_connect() {
            AssistantError::Transport(format!("connection failed: {}", err))
        } else {
            AssistantError::Transport(err.to_string())
        }
    }
}

pub type AssistantResult<T> = Result<T, AssistantError>;
