// Text-to-speech output
//
// Hands the final text of each turn to an external TTS command (spd-say
// by default). Speaking is best-effort: any failure is logged and
// otherwise ignored.

use tokio::process::Command;

pub struct Speaker {
    command: String,
    enabled: bool,
}

impl Speaker {
    pub fn new(command: impl Into<String>, enabled: bool) -> Self {
        Self {
            command: command.into(),
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Speak `text` aloud. Non-fatal on every failure path.
    pub async fn speak(&self, text: &str) {
        if !self.enabled || text.trim().is_empty() {
            return;
        }

        match Command::new(&self.command).arg(text).status().await {
            Ok(status) if status.success() => {}
            Ok(status) => {
                tracing::warn!("TTS command '{}' exited with {}", self.command, status);
            }
            Err(e) => {
                tracing::warn!("Failed to run TTS command '{}': {}", self.command, e);
            }
        }
    }
}
