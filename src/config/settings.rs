// Configuration structs

use serde::{Deserialize, Serialize};

use crate::ollama::GenerateRequest;

/// Generation parameters sent with every model request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl GenerationConfig {
    pub fn request(&self, prompt: impl Into<String>) -> GenerateRequest {
        GenerateRequest {
            model: self.model.clone(),
            prompt: prompt.into(),
            temperature: self.temperature,
            top_p: self.top_p,
            max_tokens: self.max_tokens,
        }
    }
}

/// Shell command execution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Per-command timeout in seconds. `0` disables the timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum nested follow-up round trips per user turn. Bounds the
    /// recursion triggered by commands in follow-up responses.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_depth: default_max_depth(),
        }
    }
}

impl ShellConfig {
    pub fn timeout(&self) -> Option<std::time::Duration> {
        match self.timeout_secs {
            0 => None,
            secs => Some(std::time::Duration::from_secs(secs)),
        }
    }
}

/// Text-to-speech settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// External TTS command, invoked with the text as its argument.
    #[serde(default = "default_speech_command")]
    pub command: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            command: default_speech_command(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the Ollama-compatible server.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub generation: GenerationConfig,

    #[serde(default)]
    pub shell: ShellConfig,

    #[serde(default)]
    pub speech: SpeechConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            generation: GenerationConfig::default(),
            shell: ShellConfig::default(),
            speech: SpeechConfig::default(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "llama3".to_string()
}

fn default_temperature() -> f32 {
    1.5
}

fn default_top_p() -> f32 {
    0.95
}

fn default_max_tokens() -> u32 {
    10_000
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_depth() -> usize {
    4
}

fn default_speech_command() -> String {
    "spd-say".to_string()
}
