//! Tool interfaces and the core memory tools exposed to the model.

pub mod builtins;
pub mod context;
pub mod error;
pub mod registry;
pub mod request;
pub mod tool;

/// Memory tool implementations and registry helpers.
pub use builtins::{
    MemoryTools, StoreCoreMemoryTool, ViewCoreMemoriesTool, memory_tool_registry,
    register_memory_tools,
};
/// Per-invocation tool context.
pub use context::ToolContext;
/// Tool error type.
pub use error::ToolError;
/// Tool registry type.
pub use registry::ToolRegistry;
/// Typed tool requests.
pub use request::{
    MemoryToolRequest, STORE_CORE_MEMORY, StoreMemoryArgs, VIEW_CORE_MEMORIES,
};
/// Tool trait, spec type and result rendering.
pub use tool::{Tool, ToolSpec, tool_output_text};
