//! Chat messages handed to the presentation layer.
//!
//! A [`ClassifiedMessage`] carries raw content plus a rendering hint. The
//! bridge never decodes images or builds tables itself; it only says what
//! the content is.

use serde::{Deserialize, Serialize};

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

/// How the content should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// Plain text with lightweight markup.
    Text,
    /// A `data:image/...;base64,...` URI.
    Image,
    /// JSON that forms a rectangular table.
    Table,
    /// Other JSON, or text that only looked like JSON.
    Json,
}

/// One rendered unit of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedMessage {
    pub role: Role,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub content: String,
}

impl ClassifiedMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            kind: MessageKind::Text,
            content: content.into(),
        }
    }

    pub fn bot(kind: MessageKind, content: impl Into<String>) -> Self {
        Self {
            role: Role::Bot,
            kind,
            content: content.into(),
        }
    }

    /// A bot text message, used for error replies.
    pub fn bot_text(content: impl Into<String>) -> Self {
        Self::bot(MessageKind::Text, content)
    }
}

/// Caller-owned, append-only conversation log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatLog {
    messages: Vec<ClassifiedMessage>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ClassifiedMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ClassifiedMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_kind_under_type_key() {
        let msg = ClassifiedMessage::bot(MessageKind::Table, "[]");
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value, serde_json::json!({"role": "bot", "type": "table", "content": "[]"}));
    }

    #[test]
    fn chat_log_keeps_insertion_order() {
        let mut log = ChatLog::new();
        log.push(ClassifiedMessage::user("hi"));
        log.push(ClassifiedMessage::bot_text("hello"));
        assert_eq!(log.len(), 2);
        assert_eq!(log.messages()[0].role, Role::User);
        assert_eq!(log.messages().last().map(|m| m.content.as_str()), Some("hello"));
    }

    #[test]
    fn chat_log_deserializes_from_plain_array() {
        let json = r#"[{"role":"user","type":"text","content":"q"}]"#;
        let log: ChatLog = serde_json::from_str(json).unwrap();
        assert_eq!(log.messages(), &[ClassifiedMessage::user("q")]);
    }
}
