// CLI module

mod args;
mod commands;
mod repl;

pub use args::Args;
pub use commands::Command;
pub use repl::Repl;
