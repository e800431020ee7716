use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::model::question::Question;

/// Record of the first wrong answer given to a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MistakeRecord {
    pub question: Arc<Question>,
    pub recorded_at: DateTime<Utc>,
    pub wrong_answer_index: Option<usize>,
}

impl MistakeRecord {
    #[must_use]
    pub fn new(
        question: Arc<Question>,
        recorded_at: DateTime<Utc>,
        wrong_answer_index: Option<usize>,
    ) -> Self {
        Self {
            question,
            recorded_at,
            wrong_answer_index,
        }
    }

    /// Text of the option the learner picked, if it is known and in range.
    #[must_use]
    pub fn wrong_answer_text(&self) -> Option<&str> {
        self.wrong_answer_index
            .and_then(|i| self.question.options().get(i))
            .map(String::as_str)
    }

    /// Text of the correct option.
    #[must_use]
    pub fn correct_answer_text(&self) -> &str {
        &self.question.options()[self.question.correct_option_index()]
    }
}
