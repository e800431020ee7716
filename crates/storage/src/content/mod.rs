//! Authored question content and its mapping into validated domain questions.

use quiz_core::model::{Competency, DifficultyLevel, Question, QuestionDraft};
use serde::{Deserialize, Serialize};

use crate::repository::{InMemoryQuestionBank, StorageError};

const SULFUR_UNIT_JSON: &str = include_str!("sulfur_unit.json");

/// Serialized shape of an authored question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuestionRecord {
    pub id: String,
    #[serde(default)]
    pub scenario: String,
    pub question: String,
    pub options: Vec<String>,
    pub correct: usize,
    pub explanation: String,
    pub level: DifficultyLevel,
    pub topic: String,
    pub competency: Competency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub misconception: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
}

impl QuestionRecord {
    #[must_use]
    pub fn into_draft(self) -> QuestionDraft {
        QuestionDraft {
            id: self.id,
            scenario: self.scenario,
            question_text: self.question,
            options: self.options,
            correct_option_index: self.correct,
            explanation: self.explanation,
            difficulty: self.level,
            topic: self.topic,
            competency: self.competency,
            misconception: self.misconception,
            learning_tip: self.tip,
            resource: self.resource,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BankFile {
    unit: String,
    questions: Vec<QuestionRecord>,
}

/// Parse and validate a JSON question bank.
///
/// Any malformed question rejects the whole bank.
///
/// # Errors
///
/// Returns `StorageError::Serialization` for JSON errors,
/// `StorageError::InvalidQuestion` for authoring defects, and
/// `StorageError::Duplicate` for repeated ids.
pub fn load_bank_from_json(json: &str) -> Result<InMemoryQuestionBank, StorageError> {
    let file: BankFile =
        serde_json::from_str(json).map_err(|e| StorageError::Serialization(e.to_string()))?;

    let questions = file
        .questions
        .into_iter()
        .enumerate()
        .map(|(position, record)| {
            record
                .into_draft()
                .validate()
                .map_err(|source| StorageError::InvalidQuestion { position, source })
        })
        .collect::<Result<Vec<Question>, _>>()?;

    let bank = InMemoryQuestionBank::from_questions(questions)?;
    tracing::debug!(
        unit = %file.unit,
        questions = bank.level_counts().iter().sum::<usize>(),
        "question bank loaded"
    );
    Ok(bank)
}

/// The bundled sulfur-and-its-compounds bank.
///
/// # Errors
///
/// Returns `StorageError` if the embedded content is malformed.
pub fn builtin_bank() -> Result<InMemoryQuestionBank, StorageError> {
    load_bank_from_json(SULFUR_UNIT_JSON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::QuestionRepository;

    #[test]
    fn builtin_bank_covers_every_level_and_competency() {
        let bank = builtin_bank().unwrap();
        for level in DifficultyLevel::ALL {
            assert!(
                bank.questions(level).len() >= 3,
                "level {level} needs at least 3 questions"
            );
        }
        for competency in Competency::ALL {
            let covered = DifficultyLevel::ALL
                .iter()
                .flat_map(|l| bank.questions(*l))
                .any(|q| q.competency() == competency);
            assert!(covered, "no question for {competency}");
        }
    }

    #[test]
    fn out_of_range_correct_index_rejects_bank() {
        let json = r#"{
            "unit": "broken",
            "questions": [{
                "id": "x1",
                "question": "Pick one",
                "options": ["a", "b"],
                "correct": 2,
                "explanation": "n/a",
                "level": 1,
                "topic": "t",
                "competency": "macro_micro"
            }]
        }"#;
        let err = load_bank_from_json(json).unwrap_err();
        assert!(matches!(err, StorageError::InvalidQuestion { position: 0, .. }));
    }

    #[test]
    fn invalid_level_is_a_serialization_error() {
        let json = r#"{
            "unit": "broken",
            "questions": [{
                "id": "x1",
                "question": "Pick one",
                "options": ["a", "b"],
                "correct": 0,
                "explanation": "n/a",
                "level": 5,
                "topic": "t",
                "competency": "macro_micro"
            }]
        }"#;
        assert!(matches!(
            load_bank_from_json(json).unwrap_err(),
            StorageError::Serialization(_)
        ));
    }
}
