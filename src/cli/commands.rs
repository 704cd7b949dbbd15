// Console command handling

pub enum Command {
    Help,
    Quit,
}

impl Command {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "quit" | "/quit" | "/exit" => Some(Command::Quit),
            "/help" => Some(Command::Help),
            _ => None,
        }
    }
}

pub fn format_help() -> String {
    r#"Available commands:
  quit       - Exit the session
  /help      - Show this help message

Anything else is sent to the model as a prompt.
Lines starting with BOT_REQUEST run directly in the shell,
and the output is fed back to the model."#
        .to_string()
}
