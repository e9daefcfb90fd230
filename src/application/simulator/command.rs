//! REPL command parsing.

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Quit,
    Status,
    Reset,
    /// Blank line, ignored.
    Empty,
    /// Anything else is what the scammer says.
    Say(String),
}

impl ReplCommand {
    /// Commands are matched case-insensitively after trimming.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line.to_lowercase().as_str() {
            "" => ReplCommand::Empty,
            "quit" | "exit" | "q" => ReplCommand::Quit,
            "status" => ReplCommand::Status,
            "reset" => ReplCommand::Reset,
            _ => ReplCommand::Say(line.to_string()),
        }
    }
}
