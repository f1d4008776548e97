use std::io::{self, Write};

use anyhow::Result;
use bat::WrappingMode;
use cliclack::{input, password, spinner};
use console::style;
use tracing::warn;

use ragchat::providers::types::message::{Message, Role};
use ragchat::session::settings::SessionConfig;

use super::{interrupted_as_none, parse_input, Input, InputType, Prompt};

const THEME: &str = "zenburn";

pub struct CliclackPrompt {
    spinner: Option<cliclack::ProgressBar>,
}

impl CliclackPrompt {
    pub fn new() -> Self {
        CliclackPrompt { spinner: None }
    }
}

fn print_markdown(content: &str) {
    let printed = bat::PrettyPrinter::new()
        .input(bat::Input::from_bytes(content.as_bytes()))
        .theme(THEME)
        .language("Markdown")
        .wrapping_mode(WrappingMode::Character)
        .print();

    if let Err(e) = printed {
        warn!("markdown rendering failed: {}", e);
        println!("{}", content);
    }
}

fn print_help() {
    println!("Commands:");
    println!("/config - Enter API token and assistant name");
    println!("/reset - Clear configuration and chat history");
    println!("/history - Show the whole conversation again");
    println!("/exit - Exit the session");
    println!("/? - Display this help message");
}

impl Prompt for CliclackPrompt {
    fn render(&mut self, message: &Message) {
        let label = match message.role {
            Role::User => style("you").cyan().bold(),
            Role::Assistant => style("assistant").green().bold(),
        };
        println!("{}", label);
        print_markdown(&message.content);

        if message.has_sources() {
            println!("\n{}", style("📚 Sources").bold());
            let listing = message
                .sources()
                .iter()
                .enumerate()
                .map(|(i, source)| source.to_markdown(i))
                .collect::<Vec<_>>()
                .join("\n");
            print_markdown(&listing);
        }

        println!();
        if let Err(e) = io::stdout().flush() {
            warn!("failed to flush stdout: {}", e);
        }
    }

    fn get_input(&mut self) -> Result<Input> {
        loop {
            let Some(message_text) = interrupted_as_none(
                input("Ask your question...   [Help: /?]")
                    .placeholder("")
                    .multiline()
                    .interact::<String>(),
            )?
            else {
                return Ok(Input {
                    input_type: InputType::Exit,
                    content: None,
                });
            };

            if message_text.trim() == "/?" {
                print_help();
                continue;
            }
            return Ok(parse_input(&message_text));
        }
    }

    fn ask_credentials(&mut self, current: &SessionConfig) -> Result<Option<SessionConfig>> {
        let Some(api_token) = interrupted_as_none(password("API Token").mask('▪').interact())?
        else {
            return Ok(None);
        };

        let mut assistant = input("Assistant Name").placeholder("assistant identifier");
        if !current.assistant_id().is_empty() {
            assistant = assistant.default_input(current.assistant_id());
        }
        let Some(assistant_id) = interrupted_as_none(assistant.interact::<String>())? else {
            return Ok(None);
        };

        Ok(Some(SessionConfig::new(&api_token, &assistant_id)))
    }

    fn show_busy(&mut self) {
        let spin = spinner();
        spin.start("🧠 Thinking...");
        self.spinner = Some(spin);
    }

    fn hide_busy(&mut self) {
        if let Some(spin) = self.spinner.take() {
            spin.stop("");
        }
    }

    fn show_status(&self, status: &str) {
        println!("{}\n", style(status).dim());
    }

    fn show_error(&self, error: &str) {
        eprintln!("{} {}\n", style("Assistant Error:").red().bold(), error);
    }

    fn close(&self) {
        // No cleanup required
    }
}
