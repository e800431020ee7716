//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{DifficultyLevel, QuestionId};
use storage::StorageError;

/// Errors emitted by `AssessmentEngine`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AssessmentError {
    #[error("diagnostic needs {needed} questions at {level}, bank has {available}")]
    NotEnoughQuestions {
        level: DifficultyLevel,
        needed: usize,
        available: usize,
    },
    #[error("answer is for {got}, current diagnostic question is {expected}")]
    NotCurrentQuestion { expected: QuestionId, got: QuestionId },
    #[error("option {index} is out of range for {len} options")]
    InvalidOption { index: usize, len: usize },
    #[error("diagnostic already complete")]
    AlreadyComplete,
}

/// Errors emitted by `ProgressionEngine` and learning sessions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressionError {
    #[error("session already reached mastery")]
    Finished,
    #[error("option {index} is out of range for {len} options")]
    InvalidOption { index: usize, len: usize },
    #[error("answer is for {got}, current question is {expected}")]
    NotCurrentQuestion { expected: QuestionId, got: QuestionId },
    #[error("no questions available at {0}")]
    EmptyLevel(DifficultyLevel),
}

/// Errors emitted by `ScreenController`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ControllerError {
    #[error("unknown question id: {0}")]
    UnknownQuestion(QuestionId),
    #[error(transparent)]
    Assessment(#[from] AssessmentError),
    #[error(transparent)]
    Progression(#[from] ProgressionError),
    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for ControllerError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(id) => Self::UnknownQuestion(id),
            other => Self::Storage(other),
        }
    }
}

/// Errors emitted while loading `QuizConfig`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
