use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::env;
use std::time::Duration;
use tracing::{debug, Level};

use ragchat::providers::assistant::AssistantProvider;
use ragchat::providers::configs::assistant::AssistantProviderConfig;
use ragchat::providers::configs::base::ProviderConfig;
use ragchat::session::settings::SessionConfig;
use ragchat::session::Session;

mod prompt;

use prompt::cliclack::CliclackPrompt;
use prompt::{InputType, Prompt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// API token (can also be set via RAGCHAT_API_TOKEN environment variable)
    #[arg(long)]
    api_token: Option<String>,

    /// Assistant name (can also be set via RAGCHAT_ASSISTANT_ID environment variable)
    #[arg(short, long)]
    assistant: Option<String>,

    /// Assistant service host (can also be set via RAGCHAT_HOST environment variable)
    #[arg(long)]
    host: Option<String>,

    /// Request timeout in seconds (can also be set via RAGCHAT_TIMEOUT_SECS environment variable)
    #[arg(long)]
    timeout: Option<u64>,

    /// Log request details to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let mut config = AssistantProviderConfig::from_env()?;
    if let Some(host) = &cli.host {
        config.host = host.clone();
    }
    if let Some(secs) = cli.timeout {
        config.timeout = Duration::from_secs(secs);
    }
    debug!(host = %config.host, timeout = ?config.timeout, "assistant provider configured");
    let provider = AssistantProvider::new(config).context("Failed to create assistant client")?;

    let api_token = cli
        .api_token
        .clone()
        .or_else(|| env::var("RAGCHAT_API_TOKEN").ok())
        .unwrap_or_default();
    let assistant_id = cli
        .assistant
        .clone()
        .or_else(|| env::var("RAGCHAT_ASSISTANT_ID").ok())
        .unwrap_or_default();

    let mut session = Session::new(SessionConfig::new(&api_token, &assistant_id));
    let mut prompt = CliclackPrompt::new();

    println!(
        "💬 RAG assistant chat {}",
        style("- type \"/exit\" to end the session").dim()
    );
    println!();

    if !session.config.is_complete() {
        match prompt.ask_credentials(&session.config)? {
            Some(config) => session.config = config,
            None => {
                prompt.close();
                return Ok(());
            }
        }
    }

    run(&mut session, &provider, &mut prompt)?;
    prompt.close();
    Ok(())
}

fn run(session: &mut Session, provider: &AssistantProvider, prompt: &mut impl Prompt) -> Result<()> {
    loop {
        if let Some(status) = session.status() {
            prompt.show_status(&status);
        }

        let input = prompt.get_input()?;
        match input.input_type {
            InputType::Exit => break,
            InputType::AskAgain => continue,
            InputType::Reset => {
                session.reset();
                configure(session, prompt)?;
            }
            InputType::Configure => configure(session, prompt)?,
            InputType::History => {
                for message in session.messages() {
                    prompt.render(message);
                }
            }
            InputType::Message => {
                let Some(text) = input.content else { continue };

                let before = session.messages().len();
                prompt.show_busy();
                let result = session.submit(provider, &text);
                prompt.hide_busy();

                match result {
                    Err(e) if e.is_configuration() => {
                        prompt.show_error(
                            "⚠️ Please enter your API Token and Assistant Name first! (/config)",
                        );
                        continue;
                    }
                    Err(e) => prompt.show_error(&e.to_string()),
                    Ok(_) => {}
                }

                // The prompt and either the answer or the error notice.
                for message in &session.messages()[before..] {
                    prompt.render(message);
                }
            }
        }
    }
    Ok(())
}

/// Re-enter credentials; an aborted prompt keeps the current ones.
fn configure(session: &mut Session, prompt: &mut impl Prompt) -> Result<()> {
    if let Some(config) = prompt.ask_credentials(&session.config)? {
        session.config = config;
    }
    Ok(())
}
