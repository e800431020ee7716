use quiz_core::model::{DifficultyLevel, Question, QuestionError, QuestionId};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by question sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("question not found: {0}")]
    NotFound(QuestionId),

    #[error("duplicate question id: {0}")]
    Duplicate(QuestionId),

    #[error("invalid question at position {position}: {source}")]
    InvalidQuestion {
        position: usize,
        #[source]
        source: QuestionError,
    },

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Read-only contract for the question bank.
///
/// Banks are static for the lifetime of the process; every call returns the
/// same data.
pub trait QuestionRepository: Send + Sync {
    /// Questions authored at `level`, in authoring order.
    fn questions(&self, level: DifficultyLevel) -> Vec<Arc<Question>>;

    /// Fetch a question by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the id is not in the bank.
    fn get(&self, id: &QuestionId) -> Result<Arc<Question>, StorageError>;

    /// Total number of questions across all levels.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory bank built once from validated questions.
#[derive(Clone, Debug, Default)]
pub struct InMemoryQuestionBank {
    by_id: HashMap<QuestionId, Arc<Question>>,
    by_level: HashMap<DifficultyLevel, Vec<Arc<Question>>>,
}

impl InMemoryQuestionBank {
    /// Build a bank, rejecting duplicate ids.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Duplicate` if two questions share an id.
    pub fn from_questions(
        questions: impl IntoIterator<Item = Question>,
    ) -> Result<Self, StorageError> {
        let mut bank = Self::default();
        for question in questions {
            let question = Arc::new(question);
            let id = question.id().clone();
            if bank.by_id.contains_key(&id) {
                return Err(StorageError::Duplicate(id));
            }
            bank.by_level
                .entry(question.difficulty())
                .or_default()
                .push(Arc::clone(&question));
            bank.by_id.insert(id, question);
        }
        Ok(bank)
    }

    /// Number of questions at each level, Level1 first.
    #[must_use]
    pub fn level_counts(&self) -> [usize; 4] {
        DifficultyLevel::ALL.map(|level| self.by_level.get(&level).map_or(0, Vec::len))
    }
}

impl QuestionRepository for InMemoryQuestionBank {
    fn questions(&self, level: DifficultyLevel) -> Vec<Arc<Question>> {
        self.by_level.get(&level).cloned().unwrap_or_default()
    }

    fn get(&self, id: &QuestionId) -> Result<Arc<Question>, StorageError> {
        self.by_id
            .get(id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(id.clone()))
    }

    fn len(&self) -> usize {
        self.by_id.len()
    }
}
