// HTTP client for a locally running Ollama-compatible server
//
// The generate endpoint answers with a newline-delimited stream of JSON
// objects; each object carries a `response` text fragment. We accumulate
// fragments in arrival order and skip any line that fails to parse.

use anyhow::{Context, Result};
use futures::stream::StreamExt;
use reqwest::Client;
use std::time::Duration;

use super::types::{GenerateChunk, GenerateRequest};

const CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
}

impl OllamaClient {
    /// Create a client for `base_url` (e.g. `http://localhost:11434`).
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Reachability probe against the server root. Ollama answers a plain
    /// GET on `/` when it is up.
    pub async fn health(&self) -> Result<()> {
        self.client
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .with_context(|| format!("Model server not reachable at {}", self.base_url))?;
        Ok(())
    }

    /// Send a prompt and accumulate the streamed response into one string.
    pub async fn generate(&self, request: &GenerateRequest) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url);

        tracing::debug!(model = %request.model, "Sending generate request");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .context("Failed to send request to model API")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Model API request failed\n\nStatus: {}\nBody: {}", status, body);
        }

        let mut stream = response.bytes_stream();
        let mut buffer: Vec<u8> = Vec::new();
        let mut accumulated = String::new();
        let mut done = false;

        while let Some(chunk) = stream.next().await {
            if done {
                break;
            }
            let bytes = chunk.context("Error reading model API stream")?;
            buffer.extend_from_slice(&bytes);

            // Parse line by line; a line is one JSON object
            while let Some(newline_pos) = buffer.iter().position(|&b| b == b'\n') {
                let line_bytes: Vec<u8> = buffer.drain(..=newline_pos).collect();
                let line = String::from_utf8_lossy(&line_bytes);
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                match serde_json::from_str::<GenerateChunk>(line) {
                    Ok(chunk) => {
                        accumulated.push_str(&chunk.response);
                        if chunk.done {
                            done = true;
                            break;
                        }
                    }
                    Err(e) => {
                        // Malformed fragment: skip it, keep the stream going
                        tracing::warn!("Skipping malformed stream fragment: {}", e);
                    }
                }
            }
        }

        // Trailing data without a final newline
        if !done {
            let line = String::from_utf8_lossy(&buffer);
            let line = line.trim();
            if !line.is_empty() {
                match serde_json::from_str::<GenerateChunk>(line) {
                    Ok(chunk) => accumulated.push_str(&chunk.response),
                    Err(e) => tracing::warn!("Skipping malformed stream fragment: {}", e),
                }
            }
        }

        Ok(accumulated)
    }
}
