// Command extraction from model output
//
// Commands are delimited either by a bare MARKER prefix (single-line,
// user-typed form) or by a MARKER ... END_MARKER pair surrounding a
// possibly multi-line block in model-generated text.

use thiserror::Error;

/// Opening marker for a model-issued command.
pub const MARKER: &str = "BOT_REQUEST";

/// Closing marker for a multi-line command block.
pub const END_MARKER: &str = "ENDOF_BOTREQUEST";

/// Reasons a text block can fail command extraction.
///
/// All variants are non-fatal: the caller reports the message and moves on
/// without touching the shell.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("No valid {MARKER} command found.")]
    MarkerMissing,

    #[error("No command provided between {MARKER} and {END_MARKER}.")]
    Empty,

    /// The model echoed back a template placeholder instead of a command,
    /// e.g. `BOT_REQUEST <command> ENDOF_BOTREQUEST`.
    #[error("Invalid command placeholder: {0}")]
    Placeholder(String),
}

/// Extract the command between `BOT_REQUEST` and `ENDOF_BOTREQUEST`.
///
/// The block may span multiple lines. A stray `:` after the opening marker
/// is tolerated. Returns the trimmed command text.
pub fn extract_block(text: &str) -> Result<String, ExtractError> {
    let start = match text.find(MARKER) {
        Some(idx) => idx + MARKER.len(),
        None => return Err(ExtractError::MarkerMissing),
    };
    let end = match text.find(END_MARKER) {
        Some(idx) if idx >= start => idx,
        _ => return Err(ExtractError::MarkerMissing),
    };

    let command = text[start..end]
        .trim()
        .trim_start_matches(':')
        .trim()
        .to_string();

    validate(command)
}

/// Extract a command from a single line carrying only the `BOT_REQUEST`
/// prefix (no closing marker). Used for commands typed directly at the
/// prompt.
pub fn extract_prefixed(line: &str) -> Result<String, ExtractError> {
    let rest = line
        .trim_start()
        .strip_prefix(MARKER)
        .ok_or(ExtractError::MarkerMissing)?;

    validate(rest.trim().trim_start_matches(':').trim().to_string())
}

fn validate(command: String) -> Result<String, ExtractError> {
    if command.is_empty() {
        return Err(ExtractError::Empty);
    }
    if command.starts_with('<') && command.ends_with('>') {
        return Err(ExtractError::Placeholder(command));
    }
    Ok(command)
}
