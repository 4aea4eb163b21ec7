//! Turn driver for the Reverie agent.
//!
//! This crate assembles the system prompt from the core memory store before
//! every turn, runs the model/tool loop, and keeps the running conversation.

pub mod agent;
pub mod error;
pub mod history;
pub mod prompt;
pub mod tools;
pub mod types;

pub use agent::MemoryAgent;
pub use error::CoreError;
pub use history::ConversationHistory;
pub use prompt::{FALLBACK_TEMPLATE, MEMORY_PLACEHOLDER, PromptBuilder};
pub use types::{NO_RESPONSE, ToolCallRecord, TurnOutcome};
