//! Interactive command parsing and rendering.

use reverie_memory::{EMPTY_LISTING, MemoryStore};
use std::fmt::Write;

/// Command list shown at startup and by `/help`.
pub const HELP_TEXT: &str = "Commands:
  /memories - Display all core memories
  /quit - Exit
  /help - Show this help message
";

/// Commands recognized by the interactive loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlashCommand {
    Memories,
    Quit,
    Help,
}

impl SlashCommand {
    /// Match a whole input line, ignoring case and surrounding whitespace.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "/memories" => Some(Self::Memories),
            "/quit" => Some(Self::Quit),
            "/help" => Some(Self::Help),
            _ => None,
        }
    }
}

/// One line of user input, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplInput {
    Empty,
    Command(SlashCommand),
    /// Anything else, forwarded to the agent as a turn.
    Message(String),
}

impl ReplInput {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }
        match SlashCommand::parse(trimmed) {
            Some(command) => Self::Command(command),
            None => Self::Message(trimmed.to_string()),
        }
    }
}

/// Render every stored memory for `/memories`.
pub fn render_memories(store: &MemoryStore) -> String {
    if store.is_empty() {
        return format!("{EMPTY_LISTING}\n");
    }
    let mut output = format!("\n=== CORE MEMORIES ({}) ===\n", store.len());
    for memory in store.all() {
        let _ = write!(output, "\n{memory}");
    }
    output
}

/// Await `work` unless `interrupt` resolves first, in which case `None`.
///
/// `work` is dropped on interruption.
pub async fn until_interrupted<T>(
    work: impl Future<Output = T>,
    interrupt: impl Future,
) -> Option<T> {
    tokio::select! {
        output = work => Some(output),
        _ = interrupt => None,
    }
}
