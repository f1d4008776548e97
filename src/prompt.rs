use anyhow::Result;
use std::io;

use ragchat::providers::types::message::Message;
use ragchat::session::settings::SessionConfig;

pub mod cliclack;

pub trait Prompt {
    fn render(&mut self, message: &Message);
    fn get_input(&mut self) -> Result<Input>;
    /// `None` when the user aborted the prompt.
    fn ask_credentials(&mut self, current: &SessionConfig) -> Result<Option<SessionConfig>>;
    fn show_busy(&mut self);
    fn hide_busy(&mut self);
    fn show_status(&self, status: &str);
    fn show_error(&self, error: &str);
    fn close(&self);
}

pub struct Input {
    pub input_type: InputType,
    pub content: Option<String>, // Only set for InputType::Message
}

#[derive(Debug, PartialEq, Eq)]
pub enum InputType {
    AskAgain,  // Nothing to do, ask the user again.
    Message,   // User sent a message
    Configure, // Re-enter token and assistant id
    Reset,     // Clear configuration and transcript
    History,   // Re-render the transcript
    Exit,      // User wants to exit the session
}

/// Map a Ctrl-C / Esc abort of an interactive prompt to `None`.
pub fn interrupted_as_none<T>(result: io::Result<T>) -> io::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(e),
    }
}

/// Classify one line of user input.
pub fn parse_input(text: &str) -> Input {
    let text = text.trim();
    let command = |input_type| Input {
        input_type,
        content: None,
    };

    match text.to_ascii_lowercase().as_str() {
        "" => command(InputType::AskAgain),
        "/exit" | "/quit" => command(InputType::Exit),
        "/reset" => command(InputType::Reset),
        "/config" => command(InputType::Configure),
        "/history" => command(InputType::History),
        _ => Input {
            input_type: InputType::Message,
            content: Some(text.to_string()),
        },
    }
}
