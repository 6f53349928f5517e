//! Content-kind classification of a job's textual result.
//!
//! Rules are prefix based and evaluated in order; the first match wins:
//!
//! 1. `data:image` prefix: [`MessageKind::Image`].
//! 2. `{` or `[` prefix: [`MessageKind::Table`] if the JSON is tabular (see
//!    [`Table`]), otherwise [`MessageKind::Json`]. Text that fails to parse
//!    is still `Json`; the renderer deals with it.
//! 3. Anything else: [`MessageKind::Text`].
//!
//! The content of the returned message is always the input, unchanged.

use serde_json::Value;

use crate::message::{ClassifiedMessage, MessageKind};
use crate::output::SubtaskOutput;
use crate::table::Table;

const IMAGE_PREFIX: &str = "data:image";

/// Decide how `text` should be rendered.
pub fn classify_kind(text: &str) -> MessageKind {
    if text.starts_with(IMAGE_PREFIX) {
        return MessageKind::Image;
    }
    if text.starts_with('{') || text.starts_with('[') {
        return match serde_json::from_str::<Value>(text) {
            Ok(value) if Table::from_value(&value).is_some() => MessageKind::Table,
            // Valid non-tabular JSON and unparseable text alike.
            _ => MessageKind::Json,
        };
    }
    MessageKind::Text
}

/// Classify `text` into a bot message carrying the raw text.
pub fn classify(text: &str) -> ClassifiedMessage {
    ClassifiedMessage::bot(classify_kind(text), text)
}

/// Classify an aggregated job result.
///
/// Only the first subtask's output is displayed. No outputs yields an empty
/// text message; a first output that could not be fetched yields a text
/// message naming the failed task; a missing `result` field counts as empty
/// text.
pub fn classify_outputs(outputs: &[SubtaskOutput]) -> ClassifiedMessage {
    match outputs.first() {
        None => ClassifiedMessage::bot_text(""),
        Some(first) => match first.failure_summary() {
            Some(summary) => ClassifiedMessage::bot_text(summary),
            None => classify(first.result_text().unwrap_or_default()),
        },
    }
}
