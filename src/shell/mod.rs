// Shell access module
// Public interface for command extraction, execution, and session state

mod executor;
mod extractor;
mod session;

pub use extractor::{extract_block, extract_prefixed, ExtractError, END_MARKER, MARKER};
pub use executor::{ExecOutcome, ShellExecutor};
pub use session::SessionState;
