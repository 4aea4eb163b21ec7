//! Test helpers shared across Reverie crates.

pub mod llm;
pub mod memory;

pub use llm::{FailingLLM, FixedChatResponse, FixedLLM, ScriptedLLM, raw_tool_call, tool_call};
pub use memory::{sample_memory, seeded_store};
