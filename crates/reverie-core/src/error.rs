//! Error types for the turn driver.

use autoagents_llm::error::LLMError;
use thiserror::Error;

/// Errors that end a single turn.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Model provider failed.
    #[error("model error: {0}")]
    Model(#[from] LLMError),
    /// The model produced a tool call that could not be parsed.
    #[error("invalid tool call: {0}")]
    InvalidToolCall(String),
    /// The model kept requesting tools past the configured limit.
    #[error("agent stopped after {0} tool iterations")]
    IterationLimit(usize),
}
