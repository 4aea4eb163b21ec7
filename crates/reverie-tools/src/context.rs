//! Tool execution context.

use crate::Tool;
use crate::error::ToolError;
use log::{debug, warn};
use serde_json::Value;
use uuid::Uuid;

/// Identity of a single tool invocation, passed to tools during execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolContext {
    /// Session id associated with the tool call.
    pub session_id: Uuid,
    /// Turn that requested the tool.
    pub turn_id: Option<Uuid>,
    /// Model-assigned id of this tool call.
    pub tool_call_id: Option<String>,
    /// Tool name for the current invocation.
    pub tool_name: Option<String>,
}

impl ToolContext {
    /// Create a context for a session outside any turn.
    pub fn new(session_id: Uuid) -> Self {
        Self {
            session_id,
            turn_id: None,
            tool_call_id: None,
            tool_name: None,
        }
    }

    /// Derive a context for one tool call within a turn.
    pub fn for_call(&self, turn_id: Uuid, tool_call_id: impl Into<String>) -> Self {
        Self {
            session_id: self.session_id,
            turn_id: Some(turn_id),
            tool_call_id: Some(tool_call_id.into()),
            tool_name: None,
        }
    }

    /// Execute a tool, recording its name on the context and logging the outcome.
    pub async fn execute_tool(&mut self, tool: &dyn Tool, args: Value) -> Result<Value, ToolError> {
        self.tool_name = Some(tool.name().to_string());
        debug!(
            "executing tool (tool_name={}, session_id={}, tool_call_id={})",
            tool.name(),
            self.session_id,
            self.tool_call_id.as_deref().unwrap_or("-")
        );
        let result = tool.call(self, args).await;
        if let Err(err) = &result {
            warn!(
                "tool failed (tool_name={}, session_id={}): {}",
                tool.name(),
                self.session_id,
                err
            );
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::ToolContext;
    use crate::{Tool, ToolError};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use uuid::Uuid;

    #[derive(Debug)]
    struct NameTool;

    #[async_trait]
    impl Tool for NameTool {
        fn name(&self) -> &str {
            "Name"
        }

        fn description(&self) -> &str {
            "returns the tool name seen on the context"
        }

        fn args_schema(&self) -> Value {
            json!({})
        }

        async fn call(&self, ctx: &ToolContext, _args: Value) -> Result<Value, ToolError> {
            Ok(json!(ctx.tool_name))
        }
    }

    #[derive(Debug)]
    struct FailingTool;

    #[async_trait]
    impl Tool for FailingTool {
        fn name(&self) -> &str {
            "Failing"
        }

        fn description(&self) -> &str {
            "fails"
        }

        fn args_schema(&self) -> Value {
            json!({})
        }

        async fn call(&self, _ctx: &ToolContext, _args: Value) -> Result<Value, ToolError> {
            Err(ToolError::ExecutionFailed("boom".to_string()))
        }
    }

    #[test]
    fn for_call_keeps_session_and_sets_call_identity() {
        let session_id = Uuid::new_v4();
        let turn_id = Uuid::new_v4();
        let ctx = ToolContext::new(session_id).for_call(turn_id, "call_1");
        assert_eq!(ctx.session_id, session_id);
        assert_eq!(ctx.turn_id, Some(turn_id));
        assert_eq!(ctx.tool_call_id.as_deref(), Some("call_1"));
        assert_eq!(ctx.tool_name, None);
    }

    #[tokio::test]
    async fn execute_tool_records_tool_name() {
        let mut ctx = ToolContext::new(Uuid::nil());
        let result = ctx.execute_tool(&NameTool, json!({})).await.expect("call");
        assert_eq!(result, json!("Name"));
        assert_eq!(ctx.tool_name.as_deref(), Some("Name"));
    }

    #[tokio::test]
    async fn execute_tool_propagates_errors() {
        let mut ctx = ToolContext::new(Uuid::nil());
        let err = ctx
            .execute_tool(&FailingTool, json!({}))
            .await
            .expect_err("failure");
        assert_eq!(err, ToolError::ExecutionFailed("boom".to_string()));
    }
}
