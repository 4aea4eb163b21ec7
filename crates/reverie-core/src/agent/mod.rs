//! The memory-backed conversational agent.

mod turn;

use crate::error::CoreError;
use crate::history::ConversationHistory;
use crate::prompt::PromptBuilder;
use crate::types::TurnOutcome;
use autoagents_llm::LLMProvider;
use log::{error, info};
use reverie_config::{AgentConfig, ReverieConfig};
use reverie_memory::{MemoryStore, SharedMemoryStore};
use reverie_tools::{ToolContext, ToolRegistry, memory_tool_registry};
use std::fmt::Debug;
use std::sync::Arc;
use uuid::Uuid;

/// Conversational agent whose system prompt carries its stored core memories.
///
/// The prompt is reassembled from the store before every turn, so a memory
/// written by a tool during one turn is part of the context of the next.
pub struct MemoryAgent {
    llm: Arc<dyn LLMProvider>,
    store: SharedMemoryStore,
    prompt: PromptBuilder,
    tools: ToolRegistry,
    history: ConversationHistory,
    policy: AgentConfig,
    tool_context: ToolContext,
}

impl Debug for MemoryAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryAgent")
            .field("session_id", &self.tool_context.session_id)
            .field("prompt", &self.prompt)
            .field("tools", &self.tools)
            .field("history", &self.history.len())
            .field("policy", &self.policy)
            .finish()
    }
}

impl MemoryAgent {
    /// Create an agent with the memory tools bound to `store`.
    pub fn new(llm: Arc<dyn LLMProvider>, store: SharedMemoryStore, prompt: PromptBuilder) -> Self {
        let tools = memory_tool_registry(Some(store.clone()));
        let session_id = Uuid::new_v4();
        info!("creating memory agent (session_id={session_id})");
        Self {
            llm,
            store,
            prompt,
            tools,
            history: ConversationHistory::new(),
            policy: AgentConfig::default(),
            tool_context: ToolContext::new(session_id),
        }
    }

    /// Create an agent from configuration, opening the configured store.
    pub fn from_config(llm: Arc<dyn LLMProvider>, config: &ReverieConfig) -> Self {
        let store = MemoryStore::open_shared(&config.memory.path);
        Self::new(llm, store, PromptBuilder::from_config(&config.prompt))
            .with_policy(config.agent.clone())
    }

    /// Replace the tool registry offered to the model.
    pub fn with_tools(mut self, tools: ToolRegistry) -> Self {
        self.tools = tools;
        self
    }

    /// Replace the tool loop policy.
    pub fn with_policy(mut self, policy: AgentConfig) -> Self {
        self.policy = policy;
        self
    }

    /// Id shared by every tool call in this session.
    pub fn session_id(&self) -> Uuid {
        self.tool_context.session_id
    }

    /// Shared core memory store.
    pub fn store(&self) -> &SharedMemoryStore {
        &self.store
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    /// Tools offered to the model.
    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Assemble the system prompt from the current store contents.
    pub fn system_prompt(&self) -> String {
        let store = self.store.read();
        self.prompt.build_system_prompt(&store)
    }

    /// Run one turn and return its typed outcome.
    ///
    /// History is only extended when the turn succeeds.
    pub async fn run_turn(&mut self, input: &str) -> Result<TurnOutcome, CoreError> {
        let turn_id = Uuid::new_v4();
        let system_prompt = self.system_prompt();
        let (response, tool_calls) = self.drive(turn_id, &system_prompt, input).await?;
        self.history.record_turn(input, &response);
        info!(
            "turn complete (turn_id={}, tool_calls={}, history={})",
            turn_id,
            tool_calls.len(),
            self.history.len()
        );
        Ok(TurnOutcome {
            turn_id,
            response,
            tool_calls,
            system_prompt,
        })
    }

    /// Run one turn and return its answer, or the error as text.
    pub async fn chat(&mut self, input: &str) -> String {
        match self.run_turn(input).await {
            Ok(outcome) => outcome.response,
            Err(err) => {
                error!(
                    "turn failed (session_id={}): {}",
                    self.tool_context.session_id, err
                );
                format!("Error: {err}")
            }
        }
    }
}
