// Session state for shell access
//
// The one-time "initialized" flag lives in an explicit value owned by the
// REPL and threaded through dispatch, not in process-global state.

/// Per-session shell access state.
#[derive(Debug, Default, Clone)]
pub struct SessionState {
    initialized: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Flip the flag on first call. Returns the banner to show the user;
    /// subsequent calls return an already-initialized message.
    pub fn initialize(&mut self) -> &'static str {
        if self.initialized {
            return "Shell access already initialized.";
        }
        self.initialized = true;
        "Shell access unlocked. Commands delimited by BOT_REQUEST markers will be executed."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_once() {
        let mut state = SessionState::new();
        assert!(!state.is_initialized());

        let first = state.initialize();
        assert!(state.is_initialized());
        assert!(first.contains("unlocked"));

        let second = state.initialize();
        assert!(state.is_initialized());
        assert!(second.contains("already"));
    }
}
