//! Configuration schema for Reverie.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default backing file for core memories.
pub const DEFAULT_MEMORY_PATH: &str = "core_memories.json";
/// Default system prompt template file.
pub const DEFAULT_PROMPT_TEMPLATE_PATH: &str = "prompt.txt";
/// Default chat model.
pub const DEFAULT_MODEL_NAME: &str = "gpt-4o-mini";
/// Default environment variable holding the provider credential.
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Root config for the Reverie agent.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ReverieConfig {
    #[serde(default, rename = "$schema")]
    pub schema: Option<String>,
    #[serde(default)]
    pub memory: MemoryConfig,
    #[serde(default)]
    pub prompt: PromptConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub agent: AgentConfig,
}

impl ReverieConfig {
    /// Start building a config programmatically with defaults applied.
    pub fn builder() -> ReverieConfigBuilder {
        ReverieConfigBuilder::new()
    }
}

/// Builder for assembling a `ReverieConfig` in code.
#[derive(Debug, Default, Clone)]
pub struct ReverieConfigBuilder {
    config: ReverieConfig,
}

impl ReverieConfigBuilder {
    /// Create a new builder seeded with default config values.
    pub fn new() -> Self {
        Self {
            config: ReverieConfig::default(),
        }
    }

    /// Replace the memory storage configuration.
    pub fn memory(mut self, memory: MemoryConfig) -> Self {
        self.config.memory = memory;
        self
    }

    /// Replace the prompt template configuration.
    pub fn prompt(mut self, prompt: PromptConfig) -> Self {
        self.config.prompt = prompt;
        self
    }

    /// Replace the model configuration.
    pub fn model(mut self, model: ModelConfig) -> Self {
        self.config.model = model;
        self
    }

    /// Replace the turn loop configuration.
    pub fn agent(mut self, agent: AgentConfig) -> Self {
        self.config.agent = agent;
        self
    }

    /// Finalize and return the built `ReverieConfig`.
    pub fn build(self) -> ReverieConfig {
        self.config
    }
}

/// Where core memories are persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemoryConfig {
    #[serde(default = "default_memory_path")]
    pub path: PathBuf,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            path: default_memory_path(),
        }
    }
}

fn default_memory_path() -> PathBuf {
    PathBuf::from(DEFAULT_MEMORY_PATH)
}

/// System prompt template source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromptConfig {
    /// Template file; `None` always uses the built-in template.
    #[serde(default = "default_template_path")]
    pub template_path: Option<PathBuf>,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            template_path: default_template_path(),
        }
    }
}

fn default_template_path() -> Option<PathBuf> {
    Some(PathBuf::from(DEFAULT_PROMPT_TEMPLATE_PATH))
}

/// Chat model settings passed to the provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelConfig {
    #[serde(default = "default_model_name")]
    pub name: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model_name(),
            temperature: default_temperature(),
            api_key_env: default_api_key_env(),
        }
    }
}

fn default_model_name() -> String {
    DEFAULT_MODEL_NAME.to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

/// Tool-calling loop limits for a single turn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentConfig {
    /// Maximum model calls that may request tools within one turn.
    #[serde(default = "default_max_tool_iterations")]
    pub max_tool_iterations: usize,
    /// Feed malformed tool calls back to the model instead of failing the turn.
    #[serde(default = "default_handle_parsing_errors")]
    pub handle_parsing_errors: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_tool_iterations: default_max_tool_iterations(),
            handle_parsing_errors: default_handle_parsing_errors(),
        }
    }
}

fn default_max_tool_iterations() -> usize {
    15
}

fn default_handle_parsing_errors() -> bool {
    true
}
