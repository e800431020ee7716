use thiserror::Error;

use crate::model::competency::Competency;
use crate::model::ids::QuestionId;
use crate::model::level::DifficultyLevel;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Authoring defects detected while validating a question.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question id cannot be empty")]
    EmptyId,

    #[error("question text cannot be empty")]
    EmptyText,

    #[error("question needs at least 2 options, got {len}")]
    TooFewOptions { len: usize },

    #[error("option {index} is blank")]
    BlankOption { index: usize },

    #[error("correct option index {index} is out of bounds for {len} options")]
    CorrectIndexOutOfBounds { index: usize, len: usize },

    #[error("explanation cannot be empty")]
    EmptyExplanation,

    #[error("topic tag cannot be empty")]
    EmptyTopic,
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Unvalidated question as authored in a content source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub id: String,
    pub scenario: String,
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_option_index: usize,
    pub explanation: String,
    pub difficulty: DifficultyLevel,
    pub topic: String,
    pub competency: Competency,
    pub misconception: Option<String>,
    pub learning_tip: Option<String>,
    pub resource: Option<String>,
}

impl QuestionDraft {
    /// Validate the draft into an immutable `Question`.
    ///
    /// The scenario may be empty (some recall questions have no lead-in).
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` for any authoring defect, most importantly a
    /// `correct_option_index` that does not point into `options`.
    pub fn validate(self) -> Result<Question, QuestionError> {
        let id = QuestionId::new(self.id)?;

        let question_text = self.question_text.trim().to_string();
        if question_text.is_empty() {
            return Err(QuestionError::EmptyText);
        }

        if self.options.len() < 2 {
            return Err(QuestionError::TooFewOptions {
                len: self.options.len(),
            });
        }
        if let Some(index) = self.options.iter().position(|o| o.trim().is_empty()) {
            return Err(QuestionError::BlankOption { index });
        }
        if self.correct_option_index >= self.options.len() {
            return Err(QuestionError::CorrectIndexOutOfBounds {
                index: self.correct_option_index,
                len: self.options.len(),
            });
        }

        let explanation = self.explanation.trim().to_string();
        if explanation.is_empty() {
            return Err(QuestionError::EmptyExplanation);
        }
        let topic = self.topic.trim().to_string();
        if topic.is_empty() {
            return Err(QuestionError::EmptyTopic);
        }

        Ok(Question {
            id,
            scenario: self.scenario.trim().to_string(),
            question_text,
            options: self.options,
            correct_option_index: self.correct_option_index,
            explanation,
            difficulty: self.difficulty,
            topic,
            competency: self.competency,
            misconception: normalize_optional(self.misconception),
            learning_tip: normalize_optional(self.learning_tip),
            resource: normalize_optional(self.resource),
        })
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A validated multiple-choice question. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    scenario: String,
    question_text: String,
    options: Vec<String>,
    correct_option_index: usize,
    explanation: String,
    difficulty: DifficultyLevel,
    topic: String,
    competency: Competency,
    misconception: Option<String>,
    learning_tip: Option<String>,
    resource: Option<String>,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    #[must_use]
    pub fn question_text(&self) -> &str {
        &self.question_text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_option_index(&self) -> usize {
        self.correct_option_index
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn difficulty(&self) -> DifficultyLevel {
        self.difficulty
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn competency(&self) -> Competency {
        self.competency
    }

    #[must_use]
    pub fn misconception(&self) -> Option<&str> {
        self.misconception.as_deref()
    }

    #[must_use]
    pub fn learning_tip(&self) -> Option<&str> {
        self.learning_tip.as_deref()
    }

    #[must_use]
    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    /// True when `selected` is the correct option.
    #[must_use]
    pub fn is_correct(&self, selected: usize) -> bool {
        selected == self.correct_option_index
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> QuestionDraft {
        QuestionDraft {
            id: "so2-bleach-01".into(),
            scenario: "SO2 is bubbled through magenta solution.".into(),
            question_text: "What happens to the solution?".into(),
            options: vec!["It fades".into(), "It turns blue".into(), "Nothing".into()],
            correct_option_index: 0,
            explanation: "SO2 combines with the dye to form an unstable colourless compound.".into(),
            difficulty: DifficultyLevel::Level2,
            topic: "sulfur dioxide".into(),
            competency: Competency::MacroMicro,
            misconception: Some("   ".into()),
            learning_tip: Some(" Heat restores the colour. ".into()),
            resource: None,
        }
    }

    #[test]
    fn valid_draft_builds_question() {
        let q = draft().validate().unwrap();
        assert_eq!(q.id().as_str(), "so2-bleach-01");
        assert_eq!(q.options().len(), 3);
        assert_eq!(q.difficulty(), DifficultyLevel::Level2);
        assert_eq!(q.misconception(), None);
        assert_eq!(q.learning_tip(), Some("Heat restores the colour."));
        assert!(q.is_correct(0));
        assert!(!q.is_correct(2));
    }

    #[test]
    fn correct_index_out_of_bounds_fails_fast() {
        let mut d = draft();
        d.correct_option_index = 3;
        let err = d.validate().unwrap_err();
        assert_eq!(
            err,
            QuestionError::CorrectIndexOutOfBounds { index: 3, len: 3 }
        );
    }

    #[test]
    fn empty_options_are_rejected() {
        let mut d = draft();
        d.options.clear();
        d.correct_option_index = 0;
        assert_eq!(
            d.validate().unwrap_err(),
            QuestionError::TooFewOptions { len: 0 }
        );
    }

    #[test]
    fn blank_option_is_rejected() {
        let mut d = draft();
        d.options[1] = "  ".into();
        assert_eq!(
            d.validate().unwrap_err(),
            QuestionError::BlankOption { index: 1 }
        );
    }

    #[test]
    fn blank_id_and_text_are_rejected() {
        let mut d = draft();
        d.id = " ".into();
        assert_eq!(d.validate().unwrap_err(), QuestionError::EmptyId);

        let mut d = draft();
        d.question_text = String::new();
        assert_eq!(d.validate().unwrap_err(), QuestionError::EmptyText);
    }
}
