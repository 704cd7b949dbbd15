// Magpie - local-model REPL with shell command dispatch
// Main entry point

use anyhow::Result;
use clap::Parser;

use magpie::cli::{Args, Repl};
use magpie::config::{load_config, load_config_from};
use magpie::diag;
use magpie::dispatch::Dispatcher;
use magpie::ollama::OllamaClient;
use magpie::shell::ShellExecutor;
use magpie::speech::Speaker;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    if args.debug {
        diag::print_diagnostics().await;
    }

    // Load configuration, then apply CLI overrides
    let mut config = match &args.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    if let Some(model) = args.model {
        config.generation.model = model;
    }
    if let Some(max_depth) = args.max_depth {
        config.shell.max_depth = max_depth;
    }

    let client = OllamaClient::new(&config.base_url)?;

    let executor = ShellExecutor::new(config.shell.timeout());
    let dispatcher = Dispatcher::new(
        client.clone(),
        config.generation.clone(),
        executor,
        config.shell.max_depth,
    );

    let speaker = Speaker::new(&config.speech.command, !args.no_tts);

    let mut repl = Repl::new(config, client, dispatcher, speaker);
    repl.run().await?;

    Ok(())
}
