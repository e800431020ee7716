use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::question::QuestionError;

/// Unique identifier for a Question, as authored in the bank (e.g. `"s1-l2-03"`).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QuestionId(String);

impl QuestionId {
    /// Creates a new `QuestionId` from a trimmed, non-empty string.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyId` if the value is blank.
    pub fn new(id: impl Into<String>) -> Result<Self, QuestionError> {
        let raw = id.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(QuestionError::EmptyId);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the underlying string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for QuestionId {
    type Error = QuestionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<QuestionId> for String {
    fn from(id: QuestionId) -> Self {
        id.0
    }
}

impl fmt::Debug for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionId({})", self.0)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
