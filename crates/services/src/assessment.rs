use std::sync::Arc;

use quiz_core::AssessmentPolicy;
use quiz_core::model::{DifficultyLevel, Question, QuestionId};
use storage::QuestionRepository;

use crate::error::AssessmentError;

/// Result of answering one diagnostic question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssessmentStep {
    /// More diagnostic questions remain.
    Next { correct: bool },
    /// The diagnostic is over; carries the placement.
    Complete {
        correct: bool,
        placement: DifficultyLevel,
    },
}

impl AssessmentStep {
    #[must_use]
    pub fn correct(&self) -> bool {
        match self {
            Self::Next { correct } | Self::Complete { correct, .. } => *correct,
        }
    }

    #[must_use]
    pub fn placement(&self) -> Option<DifficultyLevel> {
        match self {
            Self::Next { .. } => None,
            Self::Complete { placement, .. } => Some(*placement),
        }
    }
}

/// Placement for a sequence of diagnostic answers.
///
/// Pure: only the number of correct answers matters, and more correct answers
/// never yield a lower level.
#[must_use]
pub fn placement_for(answers: &[bool], policy: &AssessmentPolicy) -> DifficultyLevel {
    let correct = answers.iter().filter(|c| **c).count();
    policy.placement_for_correct(u32::try_from(correct).unwrap_or(u32::MAX))
}

/// Short fixed diagnostic that produces an initial placement.
///
/// Asks `questions_per_level` questions from each level, easiest first. It
/// never touches learner progress or the mistake ledger.
#[derive(Debug, Clone)]
pub struct AssessmentEngine {
    policy: AssessmentPolicy,
    sequence: Vec<Arc<Question>>,
    answers: Vec<bool>,
    placement: Option<DifficultyLevel>,
}

impl AssessmentEngine {
    /// Build the diagnostic sequence from the bank.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::NotEnoughQuestions` if any level has fewer
    /// questions than the policy asks for.
    pub fn start(
        repo: &dyn QuestionRepository,
        policy: AssessmentPolicy,
    ) -> Result<Self, AssessmentError> {
        let per_level = usize::try_from(policy.questions_per_level()).unwrap_or(usize::MAX);
        let mut sequence = Vec::new();
        for level in DifficultyLevel::ALL {
            let available = repo.questions(level);
            if available.len() < per_level {
                return Err(AssessmentError::NotEnoughQuestions {
                    level,
                    needed: per_level,
                    available: available.len(),
                });
            }
            sequence.extend(available.into_iter().take(per_level));
        }

        Ok(Self {
            policy,
            answers: Vec::with_capacity(sequence.len()),
            sequence,
            placement: None,
        })
    }

    /// The question awaiting an answer, `None` once complete.
    #[must_use]
    pub fn current_question(&self) -> Option<&Arc<Question>> {
        self.sequence.get(self.answers.len())
    }

    /// Zero-based index of the current question.
    #[must_use]
    pub fn position(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.sequence.len()
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.answers.iter().filter(|c| **c).count()
    }

    #[must_use]
    pub fn placement(&self) -> Option<DifficultyLevel> {
        self.placement
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.placement.is_some()
    }

    /// Answer the current diagnostic question.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::AlreadyComplete` after the last question,
    /// `AssessmentError::NotCurrentQuestion` if `question_id` is not the one
    /// being asked, and `AssessmentError::InvalidOption` for an out-of-range
    /// option. Errors leave the engine unchanged.
    pub fn submit(
        &mut self,
        question_id: &QuestionId,
        option_index: usize,
    ) -> Result<AssessmentStep, AssessmentError> {
        let Some(current) = self.current_question() else {
            return Err(AssessmentError::AlreadyComplete);
        };
        if current.id() != question_id {
            return Err(AssessmentError::NotCurrentQuestion {
                expected: current.id().clone(),
                got: question_id.clone(),
            });
        }
        let len = current.options().len();
        if option_index >= len {
            return Err(AssessmentError::InvalidOption {
                index: option_index,
                len,
            });
        }

        let correct = current.is_correct(option_index);
        self.answers.push(correct);

        if self.answers.len() < self.sequence.len() {
            return Ok(AssessmentStep::Next { correct });
        }

        let placement = placement_for(&self.answers, &self.policy);
        self.placement = Some(placement);
        tracing::info!(
            correct = self.correct_count(),
            total = self.total(),
            %placement,
            "diagnostic complete"
        );
        Ok(AssessmentStep::Complete { correct, placement })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::builtin_bank;

    fn answer_all(engine: &mut AssessmentEngine, pattern: &[bool]) -> AssessmentStep {
        let mut last = None;
        for want_correct in pattern {
            let q = Arc::clone(engine.current_question().unwrap());
            let option = if *want_correct {
                q.correct_option_index()
            } else {
                (q.correct_option_index() + 1) % q.options().len()
            };
            last = Some(engine.submit(q.id(), option).unwrap());
        }
        last.unwrap()
    }

    #[test]
    fn sequence_runs_easiest_first() {
        let bank = builtin_bank().unwrap();
        let engine = AssessmentEngine::start(&bank, AssessmentPolicy::default()).unwrap();
        assert_eq!(engine.total(), 4);
        let levels: Vec<_> = engine.sequence.iter().map(|q| q.difficulty()).collect();
        assert_eq!(levels, DifficultyLevel::ALL.to_vec());
    }

    #[test]
    fn all_correct_places_at_top() {
        let bank = builtin_bank().unwrap();
        let mut engine = AssessmentEngine::start(&bank, AssessmentPolicy::default()).unwrap();
        let step = answer_all(&mut engine, &[true, true, true, true]);
        assert_eq!(step.placement(), Some(DifficultyLevel::Level4));
        assert!(engine.is_complete());
        assert!(engine.current_question().is_none());
    }

    #[test]
    fn placement_follows_correct_count() {
        let policy = AssessmentPolicy::default();
        assert_eq!(placement_for(&[false; 4], &policy), DifficultyLevel::Level1);
        assert_eq!(
            placement_for(&[true, false, false, false], &policy),
            DifficultyLevel::Level1
        );
        assert_eq!(
            placement_for(&[false, true, false, true], &policy),
            DifficultyLevel::Level2
        );
        assert_eq!(
            placement_for(&[true, true, true, false], &policy),
            DifficultyLevel::Level3
        );
    }

    #[test]
    fn wrong_question_and_bad_option_leave_engine_unchanged() {
        let bank = builtin_bank().unwrap();
        let mut engine = AssessmentEngine::start(&bank, AssessmentPolicy::default()).unwrap();
        let other = QuestionId::new("not-current").unwrap();
        assert!(matches!(
            engine.submit(&other, 0),
            Err(AssessmentError::NotCurrentQuestion { .. })
        ));

        let current = Arc::clone(engine.current_question().unwrap());
        assert!(matches!(
            engine.submit(current.id(), 99),
            Err(AssessmentError::InvalidOption { index: 99, .. })
        ));
        assert_eq!(engine.position(), 0);
    }

    #[test]
    fn submitting_after_completion_fails() {
        let bank = builtin_bank().unwrap();
        let mut engine = AssessmentEngine::start(&bank, AssessmentPolicy::default()).unwrap();
        answer_all(&mut engine, &[false, false, false, false]);
        let any = QuestionId::new("l1-sulfur-valence").unwrap();
        assert!(matches!(
            engine.submit(&any, 0),
            Err(AssessmentError::AlreadyComplete)
        ));
        assert_eq!(engine.placement(), Some(DifficultyLevel::Level1));
    }

    #[test]
    fn short_bank_is_rejected() {
        let bank = builtin_bank().unwrap();
        let policy = AssessmentPolicy::new(10, 10, 20, 40).unwrap();
        let err = AssessmentEngine::start(&bank, policy).unwrap_err();
        assert!(matches!(
            err,
            AssessmentError::NotEnoughQuestions {
                level: DifficultyLevel::Level1,
                needed: 10,
                ..
            }
        ));
    }
}
