//! Conversion of registered tools into model tool definitions.

use autoagents_llm::chat::{FunctionTool, Tool};
use reverie_tools::{ToolRegistry, ToolSpec};

/// Convert a tool spec into a function tool definition.
pub fn spec_to_llm_tool(spec: ToolSpec) -> Tool {
    Tool {
        tool_type: "function".to_string(),
        function: FunctionTool {
            name: spec.name,
            description: spec.description,
            parameters: spec.args_schema,
        },
    }
}

/// Function tool definitions for every registered tool, sorted by name.
pub fn llm_tools(registry: &ToolRegistry) -> Vec<Tool> {
    registry.specs().into_iter().map(spec_to_llm_tool).collect()
}

#[cfg(test)]
mod tests {
    use super::llm_tools;
    use pretty_assertions::assert_eq;
    use reverie_tools::memory_tool_registry;

    #[test]
    fn memory_tools_become_function_tools() {
        let tools = llm_tools(&memory_tool_registry(None));
        let names = tools
            .iter()
            .map(|tool| tool.function.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["store_core_memory", "view_core_memories"]);
        assert!(tools.iter().all(|tool| tool.tool_type == "function"));
        assert_eq!(
            tools[0].function.parameters["required"][0],
            serde_json::json!("memory_id")
        );
    }
}
