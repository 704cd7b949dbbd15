// Magpie - local-model REPL with shell command dispatch
// Library exports

pub mod cli;
pub mod config;
pub mod diag;
pub mod dispatch;
pub mod ollama;
pub mod shell;
pub mod speech;
