// Response stitching - the loop driver between model output and the shell
//
// Scans a model-generated blob line by line, accumulates marker-delimited
// command blocks, runs each through the executor, and feeds the result
// back to the model as a follow-up prompt. Follow-up responses are
// processed recursively, bounded by a configurable round-trip depth.

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::config::GenerationConfig;
use crate::ollama::OllamaClient;
use crate::shell::{extract_block, extract_prefixed, SessionState, ShellExecutor, END_MARKER, MARKER};

pub struct Dispatcher {
    client: OllamaClient,
    generation: GenerationConfig,
    executor: ShellExecutor,
    max_depth: usize,
}

impl Dispatcher {
    pub fn new(
        client: OllamaClient,
        generation: GenerationConfig,
        executor: ShellExecutor,
        max_depth: usize,
    ) -> Self {
        Self {
            client,
            generation,
            executor,
            max_depth,
        }
    }

    /// Process one full model response: execute embedded command blocks and
    /// stitch command output plus follow-up model text into the final blob.
    pub async fn process_response(&self, session: &mut SessionState, text: &str) -> String {
        self.process_at_depth(session, text.to_string(), 0).await
    }

    /// Recursion is boxed: each nested follow-up response goes through the
    /// same scan, one level deeper.
    fn process_at_depth<'a>(
        &'a self,
        session: &'a mut SessionState,
        text: String,
        depth: usize,
    ) -> BoxFuture<'a, String> {
        async move {
            let mut final_response = String::new();
            let mut command_block = String::new();
            let mut in_command_block = false;

            for line in text.lines() {
                let line = line.trim();
                if !in_command_block && line.starts_with(MARKER) && line.ends_with(END_MARKER) {
                    // Open and close on the same line
                    let stitched = self.handle_block(session, line, depth).await;
                    final_response.push_str(&stitched);
                } else if line.starts_with(MARKER) && !in_command_block {
                    in_command_block = true;
                    command_block = format!("{}\n", line);
                } else if in_command_block && line.ends_with(END_MARKER) {
                    command_block.push_str(line);
                    let stitched = self
                        .handle_block(session, &command_block, depth)
                        .await;
                    final_response.push_str(&stitched);
                    in_command_block = false;
                    command_block.clear();
                } else if in_command_block {
                    command_block.push_str(line);
                    command_block.push('\n');
                } else {
                    final_response.push_str(line);
                    final_response.push('\n');
                }
            }

            if in_command_block {
                // Unterminated block: the model never emitted the closing
                // marker, so nothing is executed
                tracing::debug!("Dropping unterminated command block");
            }

            final_response.trim().to_string()
        }
        .boxed()
    }

    /// Execute one complete command block and build its stitched segment.
    async fn handle_block(
        &self,
        session: &mut SessionState,
        block: &str,
        depth: usize,
    ) -> String {
        let command = match extract_block(block) {
            Ok(command) => command,
            Err(reason) => {
                tracing::warn!("Rejected command block: {}", reason);
                return format!("Error: {}\n", reason);
            }
        };

        if !session.is_initialized() {
            let banner = session.initialize();
            println!("{}", banner);
        }

        let shell_response = match self.executor.run(&command).await {
            Ok(outcome) => outcome.display_string(),
            Err(e) => format!("Execution failed: {}", e),
        };

        let mut stitched = format!(
            "Command executed:\n{}\nOutput: {}\n",
            block.trim(),
            shell_response
        );

        // Feed the output back to the model, bounded by max_depth
        if depth + 1 > self.max_depth {
            tracing::warn!(
                "Follow-up depth limit ({}) reached, skipping model round trip",
                self.max_depth
            );
            stitched.push_str("(follow-up depth limit reached)\n");
            return stitched;
        }

        let prompt = format!(
            "Command '{}' returned: '{}'. Continue.",
            command,
            shell_response.trim()
        );
        let request = self.generation.request(prompt);

        match self.client.generate(&request).await {
            Ok(nested) => {
                let processed = self
                    .process_at_depth(session, nested, depth + 1)
                    .await;
                if !processed.is_empty() {
                    stitched.push_str(&format!("AI response: {}\n", processed));
                }
            }
            Err(e) => {
                tracing::warn!("Follow-up request failed: {}", e);
                stitched.push_str(&format!("Follow-up request failed: {}\n", e));
            }
        }

        stitched
    }

    /// Execute a command typed directly at the prompt with the bare marker
    /// prefix, then hand its output to the model for a follow-up turn.
    pub async fn run_direct(&self, session: &mut SessionState, line: &str) -> String {
        let command = match extract_prefixed(line) {
            Ok(command) => command,
            Err(reason) => return format!("Error: {}", reason),
        };

        if !session.is_initialized() {
            let banner = session.initialize();
            println!("{}", banner);
        }

        let shell_response = match self.executor.run(&command).await {
            Ok(outcome) => outcome.display_string(),
            Err(e) => format!("Execution failed: {}", e),
        };

        let mut output = shell_response.clone();

        let prompt = format!(
            "Command output: '{}'. Continue based on this.",
            shell_response.trim()
        );
        let request = self.generation.request(prompt);

        match self.client.generate(&request).await {
            Ok(nested) => {
                let processed = self.process_at_depth(session, nested, 1).await;
                if !processed.is_empty() {
                    output.push_str(&format!("\nAI response: {}", processed));
                }
            }
            Err(e) => {
                tracing::warn!("Follow-up request failed: {}", e);
                output.push_str(&format!("\nFollow-up request failed: {}", e));
            }
        }

        output
    }
}
