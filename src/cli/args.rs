// Command-line arguments

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "magpie",
    version,
    about = "Interactive REPL for local models with shell command dispatch"
)]
pub struct Args {
    /// Disable text-to-speech output
    #[arg(long)]
    pub no_tts: bool,

    /// Enable diagnostic output, including a hardware acceleration check
    #[arg(long)]
    pub debug: bool,

    /// Override the configured model name
    #[arg(long)]
    pub model: Option<String>,

    /// Override the follow-up round-trip depth bound
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Path to an alternate config file (default: ~/.magpie/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,
}
