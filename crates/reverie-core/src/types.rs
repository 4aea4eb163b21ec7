//! Turn result types.

use uuid::Uuid;

/// Answer used when the model returns no text.
pub const NO_RESPONSE: &str = "No response generated.";

/// One tool invocation performed during a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCallRecord {
    /// Model-assigned call id.
    pub id: String,
    /// Requested tool name.
    pub name: String,
    /// Raw argument text as sent by the model.
    pub arguments: String,
    /// Text returned to the model.
    pub output: String,
}

/// Result of a completed turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub turn_id: Uuid,
    /// Final answer text.
    pub response: String,
    /// Tool calls in execution order.
    pub tool_calls: Vec<ToolCallRecord>,
    /// System prompt assembled for this turn.
    pub system_prompt: String,
}
