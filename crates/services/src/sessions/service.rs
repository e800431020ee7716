use chrono::{DateTime, Utc};
use std::sync::Arc;

use quiz_core::ProgressionPolicy;
use quiz_core::model::{DifficultyLevel, Question, QuestionId, UserProgress};

use super::picker::QuestionPicker;
use super::progression::{AnswerOutcome, ProgressionEngine};
use crate::error::ProgressionError;

/// One learning run: the progression engine plus the question on screen.
///
/// Created fresh for every start or restart and dropped when the learner
/// leaves the learning screen. The picker is borrowed from the owner so that
/// question rotation carries over from one run to the next.
#[derive(Debug, Clone)]
pub struct LearningSession {
    engine: ProgressionEngine,
    current: Option<Arc<Question>>,
}

impl LearningSession {
    #[must_use]
    pub fn new(
        starting_level: DifficultyLevel,
        policy: ProgressionPolicy,
        picker: &mut QuestionPicker,
    ) -> Self {
        let current = Some(picker.next(starting_level));
        tracing::debug!(level = %starting_level, "learning session started");
        Self {
            engine: ProgressionEngine::new(starting_level, policy),
            current,
        }
    }

    #[must_use]
    pub fn progress(&self) -> UserProgress {
        self.engine.progress()
    }

    /// The question awaiting an answer, `None` after mastery.
    #[must_use]
    pub fn current_question(&self) -> Option<&Arc<Question>> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.engine.is_finished()
    }

    /// Answer the current question and move on to the next one.
    ///
    /// `answered_at` stamps the mistake record for a wrong answer; `picker`
    /// supplies the follow-up question.
    ///
    /// # Errors
    ///
    /// Returns `ProgressionError::Finished` after mastery,
    /// `ProgressionError::NotCurrentQuestion` if `question_id` is not on
    /// screen, and `ProgressionError::InvalidOption` for an out-of-range
    /// option.
    pub fn answer(
        &mut self,
        question_id: &QuestionId,
        option_index: usize,
        answered_at: DateTime<Utc>,
        picker: &mut QuestionPicker,
    ) -> Result<AnswerOutcome, ProgressionError> {
        let Some(current) = self.current.as_ref() else {
            return Err(ProgressionError::Finished);
        };
        if current.id() != question_id {
            return Err(ProgressionError::NotCurrentQuestion {
                expected: current.id().clone(),
                got: question_id.clone(),
            });
        }

        let current = Arc::clone(current);
        let outcome = self
            .engine
            .submit_answer(&current, option_index, answered_at)?;

        self.current = if outcome.mastery.is_some() {
            None
        } else {
            Some(picker.next(outcome.progress.current_level))
        };
        Ok(outcome)
    }
}
