// Shell executor - runs extracted commands via the OS shell
//
// Commands are handed to `sh -c` as a raw script (multi-line blocks
// allowed), inheriting the parent environment. Execution is synchronous
// from the caller's point of view: we wait for completion, optionally
// bounded by a timeout.

use anyhow::Result;
use chrono::Local;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Normalized result of one shell invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecOutcome {
    /// Zero exit code. Carries stdout exactly as captured, no prefix.
    Success(String),
    /// Nonzero exit code. Carries the code and captured stderr.
    Failed { exit_code: i32, stderr: String },
    /// The configured timeout elapsed before the command finished.
    TimedOut,
    /// The command could not be run at all (interpreter missing, spawn
    /// failure, unreadable output).
    Fault(String),
}

impl ExecOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ExecOutcome::Success(_))
    }

    /// Reduce the outcome to the single display string fed back to the
    /// model and printed to the console.
    pub fn display_string(&self) -> String {
        match self {
            ExecOutcome::Success(stdout) => stdout.clone(),
            ExecOutcome::Failed { exit_code, stderr } => format!(
                "Command failed (exit code {}): {}",
                exit_code,
                stderr.trim()
            ),
            ExecOutcome::TimedOut => "Command timed out!".to_string(),
            ExecOutcome::Fault(msg) => format!("Execution failed: {}", msg),
        }
    }
}

/// Runs shell commands and logs every invocation.
#[derive(Debug, Clone)]
pub struct ShellExecutor {
    /// `None` disables the timeout entirely.
    timeout: Option<Duration>,
}

impl ShellExecutor {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    /// Run `command` via `sh -c` and wait for completion.
    ///
    /// Never returns `Err` for command-level failures — those are folded
    /// into the outcome. `Err` is reserved for faults in our own plumbing
    /// that have no meaningful outcome mapping (currently none).
    pub async fn run(&self, command: &str) -> Result<ExecOutcome> {
        tracing::debug!("Executing: {}", command);

        let child = Command::new("sh")
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // A timed-out command must not outlive its turn
            .kill_on_drop(true)
            .spawn();

        let child = match child {
            Ok(child) => child,
            Err(e) => {
                let outcome = ExecOutcome::Fault(e.to_string());
                self.log_invocation(command, &outcome);
                return Ok(outcome);
            }
        };

        let wait = child.wait_with_output();
        let output = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, wait).await {
                Ok(result) => result,
                Err(_elapsed) => {
                    let outcome = ExecOutcome::TimedOut;
                    self.log_invocation(command, &outcome);
                    return Ok(outcome);
                }
            },
            None => wait.await,
        };

        let output = match output {
            Ok(output) => output,
            Err(e) => {
                let outcome = ExecOutcome::Fault(e.to_string());
                self.log_invocation(command, &outcome);
                return Ok(outcome);
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        let outcome = if output.status.success() {
            ExecOutcome::Success(stdout)
        } else {
            ExecOutcome::Failed {
                exit_code: output.status.code().unwrap_or(-1),
                stderr,
            }
        };

        self.log_invocation(command, &outcome);
        Ok(outcome)
    }

    /// Timestamped console log of one invocation. Side effect only.
    fn log_invocation(&self, command: &str, outcome: &ExecOutcome) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let status = if outcome.is_success() {
            "Success"
        } else {
            "Failed"
        };
        println!("[{}] SHELL EXECUTION", timestamp);
        println!("  Command: {}", command);
        println!("  Status: {}", status);
        println!("  Output: {}", outcome.display_string().trim());
        println!("{}", "-".repeat(50));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn executor() -> ShellExecutor {
        ShellExecutor::new(Some(Duration::from_secs(10)))
    }

    #[tokio::test]
    async fn test_echo_returns_exact_stdout() {
        let outcome = executor().run("echo hello").await.unwrap();
        assert_eq!(outcome, ExecOutcome::Success("hello\n".to_string()));
        assert_eq!(outcome.display_string(), "hello\n");
    }

    #[tokio::test]
    async fn test_multi_line_script() {
        let outcome = executor().run("echo one\necho two").await.unwrap();
        assert_eq!(outcome, ExecOutcome::Success("one\ntwo\n".to_string()));
    }

    #[tokio::test]
    async fn test_nonzero_exit_embeds_stderr() {
        let outcome = executor()
            .run("echo oops >&2; exit 3")
            .await
            .unwrap();
        match &outcome {
            ExecOutcome::Failed { exit_code, stderr } => {
                assert_eq!(*exit_code, 3);
                assert!(stderr.contains("oops"));
            }
            other => panic!("expected Failed, got {:?}", other),
        }
        let display = outcome.display_string();
        assert!(display.contains("oops"));
        assert!(display.contains("exit code 3"));
    }

    #[tokio::test]
    async fn test_timeout() {
        let executor = ShellExecutor::new(Some(Duration::from_millis(100)));
        let outcome = executor.run("sleep 5").await.unwrap();
        assert_eq!(outcome, ExecOutcome::TimedOut);
        assert_eq!(outcome.display_string(), "Command timed out!");
    }

    #[tokio::test]
    async fn test_no_timeout_configured() {
        let executor = ShellExecutor::new(None);
        let outcome = executor.run("sleep 0.2; echo done").await.unwrap();
        assert_eq!(outcome, ExecOutcome::Success("done\n".to_string()));
    }

    #[tokio::test]
    async fn test_command_not_found_is_failed_not_fault() {
        // sh itself spawns fine; the missing binary surfaces as a nonzero
        // exit with a shell diagnostic on stderr.
        let outcome = executor()
            .run("definitely_not_a_real_binary_xyz")
            .await
            .unwrap();
        match outcome {
            ExecOutcome::Failed { stderr, .. } => {
                assert!(stderr.contains("not found") || !stderr.is_empty());
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }
}
