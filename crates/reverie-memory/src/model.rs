//! Core memory record model.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// A single stored experience the agent treats as identity-shaping.
///
/// Records are created once by the store tool and never mutated afterwards.
/// The serialized form is the JSON object persisted in the backing file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CoreMemory {
    /// Caller-supplied identifier.
    pub id: String,
    /// Short label.
    pub title: String,
    /// What happened.
    pub content: String,
    /// How it changed the agent.
    pub impact: String,
    /// Subjective valence of the experience.
    pub emotional_weight: String,
    /// ISO-8601 creation time; absent in files written without one.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<String>,
}

impl CoreMemory {
    /// Create a record stamped with the current time.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        impact: impl Into<String>,
        emotional_weight: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            impact: impact.into(),
            emotional_weight: emotional_weight.into(),
            timestamp: Some(now_timestamp()),
        }
    }

    /// Replace the creation timestamp.
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Timestamp for display, `unknown` when the record has none.
    pub fn timestamp_label(&self) -> &str {
        self.timestamp.as_deref().unwrap_or("unknown")
    }
}

/// Renders the block embedded in the prompt context.
impl fmt::Display for CoreMemory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MEMORY [{}]: {}", self.id, self.title)?;
        writeln!(f, "CONTENT: {}", self.content)?;
        writeln!(f, "IMPACT: {}", self.impact)?;
        writeln!(f, "EMOTIONAL WEIGHT: {}", self.emotional_weight)
    }
}

/// Accept any JSON value for the timestamp; non-strings keep their JSON text.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    })
}

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
