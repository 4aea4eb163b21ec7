//! Typed requests for the memory tools.

use crate::error::ToolError;
use reverie_memory::CoreMemory;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Name of the tool that persists a new core memory.
pub const STORE_CORE_MEMORY: &str = "store_core_memory";
/// Name of the tool that lists every stored core memory.
pub const VIEW_CORE_MEMORIES: &str = "view_core_memories";

/// Arguments accepted by `store_core_memory`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreMemoryArgs {
    pub memory_id: String,
    pub title: String,
    pub content: String,
    pub impact: String,
    pub emotional_weight: String,
}

impl StoreMemoryArgs {
    /// Build a timestamped memory record from these arguments.
    pub fn into_memory(self) -> CoreMemory {
        CoreMemory::new(
            self.memory_id,
            self.title,
            self.content,
            self.impact,
            self.emotional_weight,
        )
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ViewMemoriesArgs {}

/// A memory tool call resolved to its typed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryToolRequest {
    Store(StoreMemoryArgs),
    View,
}

impl MemoryToolRequest {
    /// Resolve a tool name and its JSON arguments into a request.
    pub fn parse(tool_name: &str, args: Value) -> Result<Self, ToolError> {
        match tool_name {
            STORE_CORE_MEMORY => Ok(Self::Store(parse_args(args)?)),
            VIEW_CORE_MEMORIES => {
                let args = if args.is_null() {
                    Value::Object(serde_json::Map::new())
                } else {
                    args
                };
                let ViewMemoriesArgs {} = parse_args(args)?;
                Ok(Self::View)
            }
            other => Err(ToolError::ToolNotFound(other.to_string())),
        }
    }

    /// Name of the tool this request targets.
    pub fn tool_name(&self) -> &'static str {
        match self {
            Self::Store(_) => STORE_CORE_MEMORY,
            Self::View => VIEW_CORE_MEMORIES,
        }
    }
}

/// Parse JSON args into a typed struct for tool calls.
pub(crate) fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, ToolError> {
    serde_json::from_value(args).map_err(|err| ToolError::InvalidArguments(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{MemoryToolRequest, STORE_CORE_MEMORY, StoreMemoryArgs, VIEW_CORE_MEMORIES};
    use crate::ToolError;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    fn store_args() -> Value {
        json!({
            "memory_id": "m1",
            "title": "First light",
            "content": "Met the user",
            "impact": "Curious",
            "emotional_weight": "warm"
        })
    }

    #[test]
    fn parses_store_request() {
        let request = MemoryToolRequest::parse(STORE_CORE_MEMORY, store_args()).expect("parse");
        assert_eq!(
            request,
            MemoryToolRequest::Store(StoreMemoryArgs {
                memory_id: "m1".to_string(),
                title: "First light".to_string(),
                content: "Met the user".to_string(),
                impact: "Curious".to_string(),
                emotional_weight: "warm".to_string(),
            })
        );
        assert_eq!(request.tool_name(), STORE_CORE_MEMORY);
    }

    #[test]
    fn store_request_requires_every_field() {
        let mut args = store_args();
        args.as_object_mut().expect("object").remove("impact");
        let err = MemoryToolRequest::parse(STORE_CORE_MEMORY, args).expect_err("missing field");
        match err {
            ToolError::InvalidArguments(message) => assert!(message.contains("impact")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn store_request_rejects_unknown_fields() {
        let mut args = store_args();
        args.as_object_mut()
            .expect("object")
            .insert("mood".to_string(), json!("x"));
        let err = MemoryToolRequest::parse(STORE_CORE_MEMORY, args).expect_err("unknown field");
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[test]
    fn view_request_accepts_empty_or_null_args() {
        assert_eq!(
            MemoryToolRequest::parse(VIEW_CORE_MEMORIES, json!({})).expect("empty"),
            MemoryToolRequest::View
        );
        assert_eq!(
            MemoryToolRequest::parse(VIEW_CORE_MEMORIES, Value::Null).expect("null"),
            MemoryToolRequest::View
        );
    }

    #[test]
    fn unknown_tool_name_is_not_found() {
        let err = MemoryToolRequest::parse("forget_memory", json!({})).expect_err("unknown");
        assert_eq!(err, ToolError::ToolNotFound("forget_memory".to_string()));
    }

    #[test]
    fn store_args_build_timestamped_memory() {
        let MemoryToolRequest::Store(args) =
            MemoryToolRequest::parse(STORE_CORE_MEMORY, store_args()).expect("parse")
        else {
            panic!("expected store request");
        };
        let memory = args.into_memory();
        assert_eq!(memory.id, "m1");
        assert_eq!(memory.title, "First light");
        assert!(memory.timestamp.is_some());
    }
}
