//! System prompt assembly from a template and the rendered memory context.

use log::{debug, warn};
use reverie_config::PromptConfig;
use reverie_memory::MemoryStore;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Substitution point for the rendered memory context.
pub const MEMORY_PLACEHOLDER: &str = "{core_memories}";

/// Template used when no template file is configured or readable.
pub const FALLBACK_TEMPLATE: &str = "You are a learning AI agent with persistent memory capabilities.

{core_memories}

Use the store_core_memory tool whenever you experience something transformative or meaningful.
Use the view_core_memories tool to understand your past experiences and growth.";

/// Builds the system prompt for each turn.
///
/// The template file is read on every call so edits take effect on the next turn.
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    template_path: Option<PathBuf>,
}

impl PromptBuilder {
    /// Builder reading `template_path`, or always using the fallback when `None`.
    pub fn new(template_path: Option<PathBuf>) -> Self {
        Self { template_path }
    }

    /// Builder for the configured template file.
    pub fn from_config(config: &PromptConfig) -> Self {
        Self::new(config.template_path.clone())
    }

    /// Configured template file, if any.
    pub fn template_path(&self) -> Option<&Path> {
        self.template_path.as_deref()
    }

    /// Load the template text, falling back to the built-in template.
    pub fn load_template(&self) -> String {
        let Some(path) = self.template_path.as_deref() else {
            return FALLBACK_TEMPLATE.to_string();
        };
        match fs::read_to_string(path) {
            Ok(template) => {
                debug!("loaded prompt template (path={})", path.display());
                template
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                warn!(
                    "prompt template not found, using fallback (path={})",
                    path.display()
                );
                FALLBACK_TEMPLATE.to_string()
            }
            Err(err) => {
                warn!(
                    "failed to read prompt template, using fallback (path={}): {}",
                    path.display(),
                    err
                );
                FALLBACK_TEMPLATE.to_string()
            }
        }
    }

    /// Assemble the system prompt from the current store contents.
    pub fn build_system_prompt(&self, store: &MemoryStore) -> String {
        render_template(&self.load_template(), &store.render_context())
    }
}

/// Substitute the memory context into a template.
pub fn render_template(template: &str, context: &str) -> String {
    if template.contains(MEMORY_PLACEHOLDER) {
        return template.replace(MEMORY_PLACEHOLDER, context);
    }
    warn!("prompt template has no {MEMORY_PLACEHOLDER} placeholder, appending memories");
    format!("{}\n\n{}", template.trim_end(), context)
}
