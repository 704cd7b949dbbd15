// Ollama model API client
// Public interface for the local generate endpoint

mod client;
mod types;

pub use client::OllamaClient;
pub use types::{GenerateChunk, GenerateRequest};
