//! A terminal chat front-end for hosted completion models.

#[macro_use]
extern crate tracing;

mod args;
mod command;

use std::io::Write as _;
use std::sync::Mutex;
use std::time::Duration;

use banter_core::{ChatSession, ChatSessionBuilder, Stage};
use banter_together_model::TogetherProvider;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tokio::io::{self, AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::args::Args;
use crate::command::{Command, HELP};

const BAR_CHAR: &str = "▎";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let provider = match TogetherProvider::new(args.provider_config()) {
        Ok(provider) => provider,
        Err(err) => {
            eprintln!("failed to set up the HTTP client: {err}");
            return;
        }
    };
    debug!("using {:?}", provider.config());

    let mut builder =
        ChatSessionBuilder::with_provider(provider).on_stage_change({
            let spinner = Mutex::new(None);
            move |stage| {
                let Ok(mut spinner) = spinner.lock() else {
                    return;
                };
                if stage == Stage::AwaitingResponse {
                    *spinner = Some(thinking_spinner());
                } else if let Some(spinner) = spinner.take() {
                    spinner.finish_and_clear();
                }
            }
        });
    match args.api_key() {
        Some(api_key) => builder = builder.with_api_key(api_key),
        None => warn!("no API key configured"),
    }
    let mut session = builder.build();

    println!("💬 {}", "AI Chatbot".bold());
    println!("What's on your mind? Type /help for commands.\n");

    let mut stdin = BufReader::new(io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush().ok();

        let Some(line) = read_line(&mut stdin).await else {
            break;
        };
        match Command::parse(&line) {
            Command::Empty => continue,
            Command::Quit => break,
            Command::Help => println!("{HELP}\n"),
            Command::Reset => {
                session.reset();
                println!("Conversation cleared.\n");
            }
            Command::Save => save(&session, &args),
            Command::Message(text) => submit(&mut session, text).await,
        }
    }
}

async fn submit(session: &mut ChatSession, text: &str) {
    match session.submit(text).await {
        Ok(reply) => {
            println!("{}🤖 {}\n", BAR_CHAR.bright_cyan(), reply.bright_white());
        }
        Err(err) => {
            println!("{}{}", BAR_CHAR.bright_red(), err.red());
            if err.is_configuration() {
                println!(
                    "{}Set TOGETHER_API_KEY or pass --api-key.",
                    BAR_CHAR.bright_red()
                );
            }
            println!();
        }
    }
}

fn save(session: &ChatSession, args: &Args) {
    match session.save(args.save_dir()) {
        Ok(Some(path)) => {
            let name = path.file_name().unwrap_or(path.as_os_str());
            println!(
                "{}Conversation saved to {}\n",
                BAR_CHAR.bright_green(),
                name.to_string_lossy()
            );
        }
        Ok(None) => println!("Nothing to save yet.\n"),
        Err(err) => {
            error!("error saving conversation: {err}");
            println!("{}Failed to save: {err}\n", BAR_CHAR.bright_red());
        }
    }
}

fn thinking_spinner() -> ProgressBar {
    let style = ProgressStyle::with_template("{spinner} {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(style);
    spinner.set_message("🤔 Thinking...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

async fn read_line(stdin: &mut Lines<BufReader<Stdin>>) -> Option<String> {
    match stdin.next_line().await {
        Ok(line) => line,
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}
