//! Tool trait definition and metadata spec.

use crate::context::ToolContext;
use crate::error::ToolError;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

/// Tool metadata spec for discovery and schema presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSpec {
    /// Tool name.
    pub name: String,
    /// Tool description.
    pub description: String,
    /// JSON schema for tool arguments.
    pub args_schema: Value,
}

/// Interface for executable tools.
#[async_trait]
pub trait Tool: Send + Sync + Debug {
    /// Return the tool name.
    fn name(&self) -> &str;
    /// Return the tool description.
    fn description(&self) -> &str;
    /// Return the JSON schema for tool arguments.
    fn args_schema(&self) -> Value;

    /// Invoke the tool with a context and arguments.
    async fn call(&self, ctx: &ToolContext, args: Value) -> Result<Value, ToolError>;

    /// Render a failure as the text handed back to the model.
    fn error_message(&self, err: &ToolError) -> String {
        format!("Error: {err}")
    }

    /// Build a `ToolSpec` describing this tool.
    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name().to_string(),
            description: self.description().to_string(),
            args_schema: self.args_schema(),
        }
    }
}

/// Convert a tool result into the string the model receives.
pub fn tool_output_text(tool: &dyn Tool, result: Result<Value, ToolError>) -> String {
    match result {
        Ok(Value::String(text)) => text,
        Ok(value) => value.to_string(),
        Err(err) => tool.error_message(&err),
    }
}

#[cfg(test)]
mod tests {
    use super::{Tool, tool_output_text};
    use crate::{ToolContext, ToolError};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    #[derive(Debug)]
    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "echoes"
        }

        fn args_schema(&self) -> Value {
            json!({ "type": "object" })
        }

        async fn call(&self, _ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
            Ok(args)
        }
    }

    #[test]
    fn spec_reflects_tool_metadata() {
        let spec = EchoTool.spec();
        assert_eq!(spec.name, "echo");
        assert_eq!(spec.description, "echoes");
        assert_eq!(spec.args_schema, json!({ "type": "object" }));
    }

    #[test]
    fn output_text_unwraps_strings_and_serializes_values() {
        assert_eq!(tool_output_text(&EchoTool, Ok(json!("plain"))), "plain");
        assert_eq!(
            tool_output_text(&EchoTool, Ok(json!({ "ok": true }))),
            "{\"ok\":true}"
        );
    }

    #[test]
    fn output_text_uses_default_error_message() {
        assert_eq!(
            tool_output_text(&EchoTool, Err(ToolError::StorageUnavailable)),
            "Error: Memory storage not available"
        );
        assert_eq!(
            tool_output_text(&EchoTool, Err(ToolError::ToolNotFound("x".to_string()))),
            "Error: tool not found: x"
        );
    }
}
