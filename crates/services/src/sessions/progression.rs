use chrono::{DateTime, Utc};
use std::sync::Arc;

use quiz_core::ProgressionPolicy;
use quiz_core::model::{DifficultyLevel, MistakeRecord, Question, UserProgress};

use crate::error::ProgressionError;

//
// ─── OUTCOME TYPES ─────────────────────────────────────────────────────────────
//

/// A one-step level move caused by an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelChange {
    pub from: DifficultyLevel,
    pub to: DifficultyLevel,
}

impl LevelChange {
    #[must_use]
    pub fn is_promotion(&self) -> bool {
        self.to > self.from
    }
}

/// Why a session ended in mastery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MasteryReason {
    /// Enough correct answers while at the top level.
    SustainedTopLevel,
    /// The session's total question limit was reached.
    QuestionLimit,
}

/// Signalled once per session when mastery is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MasteryReached {
    pub progress: UserProgress,
    pub reason: MasteryReason,
}

/// Everything that changed because of a single answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub progress: UserProgress,
    pub level_change: Option<LevelChange>,
    /// Present for wrong answers; forward it to the mistake ledger.
    pub mistake: Option<MistakeRecord>,
    pub mastery: Option<MasteryReached>,
}

//
// ─── ENGINE ────────────────────────────────────────────────────────────────────
//

/// Adaptive difficulty state for one learning session.
///
/// `submit_answer` is the only way progress changes; callers see copies.
#[derive(Debug, Clone)]
pub struct ProgressionEngine {
    policy: ProgressionPolicy,
    progress: UserProgress,
    consecutive_misses: u32,
    correct_at_top: u32,
    mastery: Option<MasteryReached>,
}

impl ProgressionEngine {
    #[must_use]
    pub fn new(starting_level: DifficultyLevel, policy: ProgressionPolicy) -> Self {
        Self {
            policy,
            progress: UserProgress::starting_at(starting_level),
            consecutive_misses: 0,
            correct_at_top: 0,
            mastery: None,
        }
    }

    #[must_use]
    pub fn progress(&self) -> UserProgress {
        self.progress
    }

    #[must_use]
    pub fn policy(&self) -> &ProgressionPolicy {
        &self.policy
    }

    #[must_use]
    pub fn mastery(&self) -> Option<MasteryReached> {
        self.mastery
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.mastery.is_some()
    }

    /// Correct answers given while at `Level4` since last arriving there.
    #[must_use]
    pub fn correct_at_top(&self) -> u32 {
        self.correct_at_top
    }

    /// Apply one answer.
    ///
    /// The question's own difficulty does not matter; adaptation follows the
    /// session's current level.
    ///
    /// # Errors
    ///
    /// Returns `ProgressionError::Finished` once mastery has been reached and
    /// `ProgressionError::InvalidOption` if `selected` is not an option of
    /// `question`. Errors leave progress unchanged.
    pub fn submit_answer(
        &mut self,
        question: &Arc<Question>,
        selected: usize,
        answered_at: DateTime<Utc>,
    ) -> Result<AnswerOutcome, ProgressionError> {
        if self.mastery.is_some() {
            return Err(ProgressionError::Finished);
        }
        let len = question.options().len();
        if selected >= len {
            return Err(ProgressionError::InvalidOption {
                index: selected,
                len,
            });
        }

        let correct = question.is_correct(selected);
        let level_before = self.progress.current_level;
        self.progress.questions_answered = self.progress.questions_answered.saturating_add(1);

        let (level_change, mistake) = if correct {
            (self.apply_correct(level_before), None)
        } else {
            let mistake = MistakeRecord::new(Arc::clone(question), answered_at, Some(selected));
            (self.apply_miss(level_before), Some(mistake))
        };

        debug_assert!(self.progress.is_consistent());

        let mastery = self.check_mastery();
        self.mastery = mastery;

        tracing::debug!(
            question = %question.id(),
            correct,
            level = %self.progress.current_level,
            streak = self.progress.streak,
            score = self.progress.score,
            answered = self.progress.questions_answered,
            "answer applied"
        );
        if let Some(change) = level_change {
            tracing::info!(from = %change.from, to = %change.to, "level changed");
        }
        if let Some(m) = mastery {
            tracing::info!(reason = ?m.reason, score = m.progress.score, "mastery reached");
        }

        Ok(AnswerOutcome {
            correct,
            progress: self.progress,
            level_change,
            mistake,
            mastery,
        })
    }

    fn apply_correct(&mut self, level_before: DifficultyLevel) -> Option<LevelChange> {
        self.progress.score = self.progress.score.saturating_add(1);
        self.progress.streak = self.progress.streak.saturating_add(1);
        self.consecutive_misses = 0;

        if level_before.is_max() {
            self.correct_at_top = self.correct_at_top.saturating_add(1);
            return None;
        }
        if self.progress.streak < self.policy.level_up_streak() {
            return None;
        }

        let to = level_before.step_up();
        self.progress.current_level = to;
        self.progress.streak = 0;
        if to.is_max() {
            self.correct_at_top = 0;
        }
        Some(LevelChange {
            from: level_before,
            to,
        })
    }

    fn apply_miss(&mut self, level_before: DifficultyLevel) -> Option<LevelChange> {
        self.progress.streak = 0;
        self.consecutive_misses = self.consecutive_misses.saturating_add(1);

        let threshold = self.policy.level_down_misses()?;
        if self.consecutive_misses < threshold {
            return None;
        }
        self.consecutive_misses = 0;
        if level_before.is_min() {
            return None;
        }

        let to = level_before.step_down();
        self.progress.current_level = to;
        if level_before.is_max() {
            self.correct_at_top = 0;
        }
        Some(LevelChange {
            from: level_before,
            to,
        })
    }

    fn check_mastery(&self) -> Option<MasteryReached> {
        let reason = if self.progress.current_level.is_max()
            && self.correct_at_top >= self.policy.mastery_correct_at_top()
        {
            MasteryReason::SustainedTopLevel
        } else if self
            .policy
            .max_questions()
            .is_some_and(|limit| self.progress.questions_answered >= limit)
        {
            MasteryReason::QuestionLimit
        } else {
            return None;
        };
        Some(MasteryReached {
            progress: self.progress,
            reason,
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
