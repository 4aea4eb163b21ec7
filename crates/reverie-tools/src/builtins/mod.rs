//! Memory tools bundled with the agent.

mod memory;

use crate::ToolRegistry;
use log::info;
use reverie_memory::SharedMemoryStore;
use std::sync::Arc;

pub use memory::{MemoryTools, StoreCoreMemoryTool, ViewCoreMemoriesTool};

/// Register both memory tools, bound to `store` when one is available.
pub fn register_memory_tools(registry: &ToolRegistry, store: Option<SharedMemoryStore>) {
    let tools = MemoryTools::new(store);
    if !tools.is_bound() {
        info!("registering memory tools without storage");
    }
    registry.register(Arc::new(StoreCoreMemoryTool::new(tools.clone())));
    registry.register(Arc::new(ViewCoreMemoriesTool::new(tools)));
    info!("registered memory tools");
}

/// Build a registry pre-populated with the memory tools.
pub fn memory_tool_registry(store: Option<SharedMemoryStore>) -> ToolRegistry {
    let registry = ToolRegistry::new();
    register_memory_tools(&registry, store);
    registry
}
