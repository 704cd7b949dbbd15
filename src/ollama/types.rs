// Wire types for the Ollama generate API

use serde::{Deserialize, Serialize};

/// Body of a POST to `/api/generate`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
}

/// One line of the newline-delimited JSON response stream.
///
/// Fields the server sends that we don't read (timings, context) are
/// ignored by serde.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateChunk {
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub done: bool,
}
