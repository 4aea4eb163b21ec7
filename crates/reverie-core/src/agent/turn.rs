//! Model/tool loop for a single turn.

use super::MemoryAgent;
use crate::error::CoreError;
use crate::history::text_message;
use crate::tools::llm_tools;
use crate::types::{NO_RESPONSE, ToolCallRecord};
use autoagents_llm::chat::{ChatMessage, ChatProvider, ChatResponse, ChatRole, MessageType};
use autoagents_llm::{FunctionCall, ToolCall};
use log::{debug, warn};
use reverie_tools::{ToolError, tool_output_text};
use serde_json::Value;
use uuid::Uuid;

impl MemoryAgent {
    /// Call the model until it answers without requesting tools.
    pub(super) async fn drive(
        &self,
        turn_id: Uuid,
        system_prompt: &str,
        input: &str,
    ) -> Result<(String, Vec<ToolCallRecord>), CoreError> {
        let tools = llm_tools(&self.tools);
        let mut messages = Vec::with_capacity(self.history.len() + 2);
        messages.push(text_message(ChatRole::System, system_prompt));
        messages.extend(self.history.messages().iter().cloned());
        messages.push(text_message(ChatRole::User, input));

        let max_iterations = self.policy.max_tool_iterations;
        let mut records = Vec::new();
        let mut iterations = 0;
        while iterations < max_iterations {
            let response = self
                .llm
                .chat_with_tools(&messages, Some(&tools), None)
                .await?;
            let calls = response.tool_calls().unwrap_or_default();
            let text = response.text().unwrap_or_default();
            if calls.is_empty() {
                if text.trim().is_empty() {
                    return Ok((NO_RESPONSE.to_string(), records));
                }
                return Ok((text, records));
            }

            debug!(
                "model requested tools (turn_id={}, iteration={}, calls={})",
                turn_id,
                iterations + 1,
                calls.len()
            );
            let mut results = Vec::with_capacity(calls.len());
            for call in &calls {
                let output = self.execute_call(turn_id, call).await?;
                records.push(ToolCallRecord {
                    id: call.id.clone(),
                    name: call.function.name.clone(),
                    arguments: call.function.arguments.clone(),
                    output: output.clone(),
                });
                results.push(ToolCall {
                    id: call.id.clone(),
                    call_type: call.call_type.clone(),
                    function: FunctionCall {
                        name: call.function.name.clone(),
                        arguments: output,
                    },
                });
            }
            messages.push(ChatMessage {
                role: ChatRole::Assistant,
                message_type: MessageType::ToolUse(calls),
                content: text,
            });
            messages.push(ChatMessage {
                role: ChatRole::Tool,
                message_type: MessageType::ToolResult(results),
                content: String::new(),
            });
            iterations += 1;
        }

        warn!("tool iteration limit reached (turn_id={turn_id}, limit={max_iterations})");
        Err(CoreError::IterationLimit(max_iterations))
    }

    /// Execute one requested tool call and return the text fed back to the model.
    async fn execute_call(&self, turn_id: Uuid, call: &ToolCall) -> Result<String, CoreError> {
        let name = &call.function.name;
        let recover = self.policy.handle_parsing_errors;
        let args = match parse_tool_arguments(&call.function.arguments) {
            Ok(args) => args,
            Err(err) if recover => {
                warn!("malformed tool arguments (tool_name={name}): {err}");
                return Ok(format!("Invalid tool arguments: {err}"));
            }
            Err(err) => return Err(CoreError::InvalidToolCall(format!("{name}: {err}"))),
        };

        let Some(tool) = self.tools.get(name) else {
            warn!("model requested unknown tool (tool_name={name})");
            return Ok(format!("Error: {}", ToolError::ToolNotFound(name.clone())));
        };

        let mut ctx = self.tool_context.for_call(turn_id, call.id.clone());
        let result = ctx.execute_tool(tool.as_ref(), args).await;
        Ok(tool_output_text(tool.as_ref(), result))
    }
}

/// Parse raw argument text; blank arguments mean an empty object.
fn parse_tool_arguments(raw: &str) -> Result<Value, serde_json::Error> {
    if raw.trim().is_empty() {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    serde_json::from_str(raw)
}

#[cfg(test)]
mod tests {
    use super::parse_tool_arguments;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn blank_arguments_are_an_empty_object() {
        assert_eq!(parse_tool_arguments("").expect("blank"), json!({}));
        assert_eq!(parse_tool_arguments("  ").expect("spaces"), json!({}));
    }

    #[test]
    fn arguments_are_parsed_as_json() {
        assert_eq!(
            parse_tool_arguments("{\"a\":1}").expect("json"),
            json!({ "a": 1 })
        );
        assert!(parse_tool_arguments("{not json").is_err());
    }
}
