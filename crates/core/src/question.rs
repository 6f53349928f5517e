//! Caller-supplied question text.

use std::fmt;

use crate::error::CoreError;

/// A validated, non-empty question.
///
/// Surrounding whitespace is trimmed; the inner text is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question(String);

impl Question {
    /// Validate raw caller input.
    ///
    /// Rejects `None`, the empty string and whitespace-only strings.
    pub fn parse(raw: Option<&str>) -> Result<Self, CoreError> {
        let trimmed = raw.map(str::trim).unwrap_or_default();
        if trimmed.is_empty() {
            return Err(CoreError::Validation("No question provided".to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for Question {
    type Error = CoreError;

    fn try_from(raw: &str) -> Result<Self, Self::Error> {
        Self::parse(Some(raw))
    }
}
