//! Tools that let the model write and read its core memories.

use crate::error::ToolError;
use crate::request::{MemoryToolRequest, STORE_CORE_MEMORY, StoreMemoryArgs, VIEW_CORE_MEMORIES};
use crate::{Tool, ToolContext};
use async_trait::async_trait;
use log::{debug, info};
use reverie_memory::SharedMemoryStore;
use serde_json::{Value, json};

const STORE_DESCRIPTION: &str = "Store a core memory when you experience something transformative or meaningful during our conversation.";
const VIEW_DESCRIPTION: &str =
    "View all your stored core memories to understand your past experiences and growth.";

/// Executes memory tool requests against an optional store.
///
/// Both tools stay registered when no store is bound; every request then
/// fails with `ToolError::StorageUnavailable` and nothing touches disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryTools {
    store: Option<SharedMemoryStore>,
}

impl MemoryTools {
    /// Tools bound to `store`, or unbound when `None`.
    pub fn new(store: Option<SharedMemoryStore>) -> Self {
        Self { store }
    }

    /// Tools with no storage bound.
    pub fn unbound() -> Self {
        Self::default()
    }

    /// Whether a store is attached.
    pub fn is_bound(&self) -> bool {
        self.store.is_some()
    }

    /// Dispatch a typed request.
    pub fn execute(&self, request: MemoryToolRequest) -> Result<String, ToolError> {
        match request {
            MemoryToolRequest::Store(args) => self.store_core_memory(args),
            MemoryToolRequest::View => self.view_core_memories(),
        }
    }

    /// Persist a new memory and report the resulting count.
    pub fn store_core_memory(&self, args: StoreMemoryArgs) -> Result<String, ToolError> {
        let store = self.store.as_ref().ok_or(ToolError::StorageUnavailable)?;
        let title = args.title.clone();
        let mut guard = store.write();
        guard.add(args.into_memory());
        let total = guard.len();
        info!("stored core memory (title={title}, total={total})");
        Ok(format!(
            "✓ Core memory '{title}' stored successfully. Total memories: {total}"
        ))
    }

    /// Render every stored memory for the model.
    pub fn view_core_memories(&self) -> Result<String, ToolError> {
        let store = self.store.as_ref().ok_or(ToolError::StorageUnavailable)?;
        let guard = store.read();
        debug!("viewing core memories (count={})", guard.len());
        Ok(guard.render_listing())
    }
}

fn storage_error_message(err: &ToolError, prefix: &str) -> String {
    match err {
        ToolError::StorageUnavailable => format!("Error: {err}"),
        other => format!("{prefix}: {other}"),
    }
}

/// Tool for `store_core_memory`.
#[derive(Debug, Clone)]
pub struct StoreCoreMemoryTool {
    tools: MemoryTools,
}

impl StoreCoreMemoryTool {
    /// Wrap the shared memory tools as the store tool.
    pub fn new(tools: MemoryTools) -> Self {
        Self { tools }
    }
}

#[async_trait]
impl Tool for StoreCoreMemoryTool {
    fn name(&self) -> &str {
        STORE_CORE_MEMORY
    }

    fn description(&self) -> &str {
        STORE_DESCRIPTION
    }

    fn args_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "memory_id": {
                    "type": "string",
                    "description": "A unique identifier for this memory"
                },
                "title": {
                    "type": "string",
                    "description": "A brief title describing the memory"
                },
                "content": {
                    "type": "string",
                    "description": "What happened and what was significant about it"
                },
                "impact": {
                    "type": "string",
                    "description": "How this changed your approach, understanding, or sense of self"
                },
                "emotional_weight": {
                    "type": "string",
                    "description": "What this felt like to you, even if uncertain about the nature of that feeling"
                }
            },
            "required": ["memory_id", "title", "content", "impact", "emotional_weight"],
            "additionalProperties": false
        })
    }

    async fn call(&self, _ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let request = MemoryToolRequest::parse(self.name(), args)?;
        self.tools.execute(request).map(Value::String)
    }

    fn error_message(&self, err: &ToolError) -> String {
        storage_error_message(err, "Error storing memory")
    }
}

/// Tool for `view_core_memories`.
#[derive(Debug, Clone)]
pub struct ViewCoreMemoriesTool {
    tools: MemoryTools,
}

impl ViewCoreMemoriesTool {
    /// Wrap the shared memory tools as the view tool.
    pub fn new(tools: MemoryTools) -> Self {
        Self { tools }
    }
}

#[async_trait]
impl Tool for ViewCoreMemoriesTool {
    fn name(&self) -> &str {
        VIEW_CORE_MEMORIES
    }

    fn description(&self) -> &str {
        VIEW_DESCRIPTION
    }

    fn args_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {},
            "additionalProperties": false
        })
    }

    async fn call(&self, _ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let request = MemoryToolRequest::parse(self.name(), args)?;
        self.tools.execute(request).map(Value::String)
    }

    fn error_message(&self, err: &ToolError) -> String {
        storage_error_message(err, "Error viewing memories")
    }
}
