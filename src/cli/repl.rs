// Interactive REPL
//
// One user prompt is processed to completion (including any nested
// command-execution round trips) before the next is accepted.

use anyhow::Result;
use crossterm::style::Stylize;
use std::io::{self, IsTerminal, Write};

use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::ollama::OllamaClient;
use crate::shell::{SessionState, MARKER};
use crate::speech::Speaker;

use super::commands::{format_help, Command};

pub struct Repl {
    config: Config,
    client: OllamaClient,
    dispatcher: Dispatcher,
    speaker: Speaker,
    session: SessionState,
    is_interactive: bool,
}

impl Repl {
    pub fn new(
        config: Config,
        client: OllamaClient,
        dispatcher: Dispatcher,
        speaker: Speaker,
    ) -> Self {
        let is_interactive = io::stdout().is_terminal();

        Self {
            config,
            client,
            dispatcher,
            speaker,
            session: SessionState::new(),
            is_interactive,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Reachability check: an unreachable server at startup ends the
        // session with a warning instead of failing every turn
        if let Err(e) = self.client.health().await {
            eprintln!(
                "Warning: {}. Start it with 'ollama serve'.",
                e
            );
            return Ok(());
        }

        if self.is_interactive {
            println!("Magpie v{} online! Type 'quit' to exit.", env!("CARGO_PKG_VERSION"));
            println!(
                "Model: {} @ {}",
                self.config.generation.model, self.config.base_url
            );
            println!(
                "Shell commands via {} are executed directly with live output.",
                MARKER
            );
            if self.speaker.is_enabled() {
                println!("Text-to-speech: enabled ({})", self.config.speech.command);
            }
        } else {
            eprintln!("# Magpie v{} - non-interactive mode", env!("CARGO_PKG_VERSION"));
        }

        loop {
            if self.is_interactive {
                println!();
                print!("{}", "Enter your prompt: ".dark_grey());
            } else {
                print!("Enter your prompt: ");
            }
            io::stdout().flush()?;

            let mut input = String::new();
            let bytes = io::stdin().read_line(&mut input)?;
            if bytes == 0 {
                // EOF
                break;
            }
            let input = input.trim();

            if input.is_empty() {
                continue;
            }

            if let Some(command) = Command::parse(input) {
                match command {
                    Command::Quit => {
                        println!("Shutting down!");
                        break;
                    }
                    Command::Help => {
                        println!("{}", format_help());
                        continue;
                    }
                }
            }

            match self.process_turn(input).await {
                Ok(response) => {
                    println!("{}", response);
                    self.speaker.speak(&response).await;
                }
                Err(e) => {
                    let error_msg = format!("Error: {}", e);
                    eprintln!("{}", error_msg);
                    self.speaker.speak(&error_msg).await;
                }
            }
        }

        Ok(())
    }

    async fn process_turn(&mut self, input: &str) -> Result<String> {
        // Direct shell command typed at the prompt
        if input.starts_with(MARKER) {
            let output = self.dispatcher.run_direct(&mut self.session, input).await;
            return Ok(output);
        }

        let request = self.config.generation.request(input);
        let response = self.client.generate(&request).await?;

        Ok(self
            .dispatcher
            .process_response(&mut self.session, &response)
            .await)
    }
}
