//! Error type shared by tools and the tool registry.

/// Errors returned by tools before they are rendered for the model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToolError {
    /// Tool name was not found in registry.
    #[error("tool not found: {0}")]
    ToolNotFound(String),
    /// Tool received invalid arguments.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
    /// Tool was constructed without a memory store.
    #[error("Memory storage not available")]
    StorageUnavailable,
    /// Tool execution failed.
    #[error("execution failed: {0}")]
    ExecutionFailed(String),
}
