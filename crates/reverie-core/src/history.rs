//! Running conversation kept in process memory.

use autoagents_llm::chat::{ChatMessage, ChatRole, MessageType};

/// Ordered user/assistant turns of the current session.
#[derive(Debug, Clone, Default)]
pub struct ConversationHistory {
    messages: Vec<ChatMessage>,
}

impl ConversationHistory {
    /// Empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed exchange.
    pub fn record_turn(&mut self, user: &str, assistant: &str) {
        self.messages.push(text_message(ChatRole::User, user));
        self.messages.push(text_message(ChatRole::Assistant, assistant));
    }

    /// Messages in send order, oldest first.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Number of messages, two per recorded turn.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether no turn has been recorded.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Forget every recorded turn.
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

/// Build a plain text chat message.
pub(crate) fn text_message(role: ChatRole, content: &str) -> ChatMessage {
    ChatMessage {
        role,
        message_type: MessageType::Text,
        content: content.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::ConversationHistory;
    use autoagents_llm::chat::ChatRole;
    use pretty_assertions::assert_eq;

    #[test]
    fn records_turns_in_order() {
        let mut history = ConversationHistory::new();
        assert!(history.is_empty());
        history.record_turn("hi", "hello");
        history.record_turn("again", "sure");

        let messages = history.messages();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, ChatRole::User);
        assert_eq!(messages[0].content, "hi");
        assert_eq!(messages[1].role, ChatRole::Assistant);
        assert_eq!(messages[3].content, "sure");

        history.clear();
        assert_eq!(history.len(), 0);
    }
}
