use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::DifficultyLevel;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PolicyError {
    #[error("level-up streak must be > 0")]
    InvalidLevelUpStreak,

    #[error("level-down miss count must be > 0 when enabled")]
    InvalidLevelDownMisses,

    #[error("mastery correct-at-top count must be > 0")]
    InvalidMasteryCount,

    #[error("question limit must be > 0 when enabled")]
    InvalidQuestionLimit,

    #[error("diagnostic questions per level must be > 0")]
    InvalidQuestionsPerLevel,

    #[error("placement thresholds must be strictly increasing and > 0")]
    UnorderedThresholds,

    #[error("placement threshold {threshold} exceeds diagnostic length {total}")]
    UnreachableThreshold { threshold: u32, total: u32 },
}

//
// ─── PROGRESSION POLICY ────────────────────────────────────────────────────────
//

/// Thresholds driving level changes and mastery during a learning session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProgressionPolicyFields")]
pub struct ProgressionPolicy {
    level_up_streak: u32,
    level_down_misses: Option<u32>,
    mastery_correct_at_top: u32,
    max_questions: Option<u32>,
}

/// Raw, unvalidated progression thresholds (config file shape).
///
/// A `0` for `level_down_misses` or `max_questions` disables that rule,
/// since TOML has no null.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProgressionPolicyFields {
    pub level_up_streak: u32,
    pub level_down_misses: Option<u32>,
    pub mastery_correct_at_top: u32,
    pub max_questions: Option<u32>,
}

impl Default for ProgressionPolicyFields {
    fn default() -> Self {
        Self {
            level_up_streak: ProgressionPolicy::DEFAULT_LEVEL_UP_STREAK,
            level_down_misses: Some(ProgressionPolicy::DEFAULT_LEVEL_DOWN_MISSES),
            mastery_correct_at_top: ProgressionPolicy::DEFAULT_MASTERY_CORRECT_AT_TOP,
            max_questions: Some(ProgressionPolicy::DEFAULT_MAX_QUESTIONS),
        }
    }
}

impl TryFrom<ProgressionPolicyFields> for ProgressionPolicy {
    type Error = PolicyError;

    fn try_from(f: ProgressionPolicyFields) -> Result<Self, Self::Error> {
        Self::new(
            f.level_up_streak,
            f.level_down_misses.filter(|n| *n > 0),
            f.mastery_correct_at_top,
            f.max_questions.filter(|n| *n > 0),
        )
    }
}

impl ProgressionPolicy {
    pub const DEFAULT_LEVEL_UP_STREAK: u32 = 3;
    pub const DEFAULT_LEVEL_DOWN_MISSES: u32 = 2;
    pub const DEFAULT_MASTERY_CORRECT_AT_TOP: u32 = 3;
    pub const DEFAULT_MAX_QUESTIONS: u32 = 40;

    /// Creates a custom progression policy.
    ///
    /// - `level_up_streak`: consecutive correct answers that advance one level.
    /// - `level_down_misses`: consecutive misses that drop one level, `None` disables.
    /// - `mastery_correct_at_top`: correct answers needed while at `Level4`.
    /// - `max_questions`: total answers after which the session ends in mastery, `None` disables.
    ///
    /// # Errors
    ///
    /// Returns `PolicyError` if any enabled threshold is zero.
    pub fn new(
        level_up_streak: u32,
        level_down_misses: Option<u32>,
        mastery_correct_at_top: u32,
        max_questions: Option<u32>,
    ) -> Result<Self, PolicyError> {
        if level_up_streak == 0 {
            return Err(PolicyError::InvalidLevelUpStreak);
        }
        if level_down_misses == Some(0) {
            return Err(PolicyError::InvalidLevelDownMisses);
        }
        if mastery_correct_at_top == 0 {
            return Err(PolicyError::InvalidMasteryCount);
        }
        if max_questions == Some(0) {
            return Err(PolicyError::InvalidQuestionLimit);
        }
        Ok(Self {
            level_up_streak,
            level_down_misses,
            mastery_correct_at_top,
            max_questions,
        })
    }

    #[must_use]
    pub fn level_up_streak(&self) -> u32 {
        self.level_up_streak
    }

    #[must_use]
    pub fn level_down_misses(&self) -> Option<u32> {
        self.level_down_misses
    }

    #[must_use]
    pub fn mastery_correct_at_top(&self) -> u32 {
        self.mastery_correct_at_top
    }

    #[must_use]
    pub fn max_questions(&self) -> Option<u32> {
        self.max_questions
    }

    #[must_use]
    pub fn with_level_up_streak(mut self, streak: u32) -> Self {
        self.level_up_streak = streak.max(1);
        self
    }

    #[must_use]
    pub fn with_level_down_misses(mut self, misses: Option<u32>) -> Self {
        self.level_down_misses = misses.filter(|m| *m > 0);
        self
    }

    #[must_use]
    pub fn with_mastery_correct_at_top(mut self, count: u32) -> Self {
        self.mastery_correct_at_top = count.max(1);
        self
    }

    #[must_use]
    pub fn with_max_questions(mut self, limit: Option<u32>) -> Self {
        self.max_questions = limit.filter(|l| *l > 0);
        self
    }
}

impl Default for ProgressionPolicy {
    fn default() -> Self {
        Self {
            level_up_streak: Self::DEFAULT_LEVEL_UP_STREAK,
            level_down_misses: Some(Self::DEFAULT_LEVEL_DOWN_MISSES),
            mastery_correct_at_top: Self::DEFAULT_MASTERY_CORRECT_AT_TOP,
            max_questions: Some(Self::DEFAULT_MAX_QUESTIONS),
        }
    }
}

//
// ─── ASSESSMENT POLICY ─────────────────────────────────────────────────────────
//

/// Shape of the diagnostic and the correct-answer counts that map to a placement.
///
/// Fewer than `level2_min_correct` correct answers places at `Level1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AssessmentPolicyFields")]
pub struct AssessmentPolicy {
    questions_per_level: u32,
    level2_min_correct: u32,
    level3_min_correct: u32,
    level4_min_correct: u32,
}

/// Raw, unvalidated assessment thresholds (config file shape).
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssessmentPolicyFields {
    pub questions_per_level: u32,
    pub level2_min_correct: u32,
    pub level3_min_correct: u32,
    pub level4_min_correct: u32,
}

impl Default for AssessmentPolicyFields {
    fn default() -> Self {
        let p = AssessmentPolicy::default();
        Self {
            questions_per_level: p.questions_per_level,
            level2_min_correct: p.level2_min_correct,
            level3_min_correct: p.level3_min_correct,
            level4_min_correct: p.level4_min_correct,
        }
    }
}

impl TryFrom<AssessmentPolicyFields> for AssessmentPolicy {
    type Error = PolicyError;

    fn try_from(f: AssessmentPolicyFields) -> Result<Self, Self::Error> {
        Self::new(
            f.questions_per_level,
            f.level2_min_correct,
            f.level3_min_correct,
            f.level4_min_correct,
        )
    }
}

impl AssessmentPolicy {
    /// Creates a custom assessment policy.
    ///
    /// # Errors
    ///
    /// Returns `PolicyError` if the diagnostic is empty, thresholds are not
    /// strictly increasing, or the top threshold cannot be reached.
    pub fn new(
        questions_per_level: u32,
        level2_min_correct: u32,
        level3_min_correct: u32,
        level4_min_correct: u32,
    ) -> Result<Self, PolicyError> {
        if questions_per_level == 0 {
            return Err(PolicyError::InvalidQuestionsPerLevel);
        }
        if level2_min_correct == 0
            || level3_min_correct <= level2_min_correct
            || level4_min_correct <= level3_min_correct
        {
            return Err(PolicyError::UnorderedThresholds);
        }
        let total = questions_per_level.saturating_mul(4);
        if level4_min_correct > total {
            return Err(PolicyError::UnreachableThreshold {
                threshold: level4_min_correct,
                total,
            });
        }
        Ok(Self {
            questions_per_level,
            level2_min_correct,
            level3_min_correct,
            level4_min_correct,
        })
    }

    #[must_use]
    pub fn questions_per_level(&self) -> u32 {
        self.questions_per_level
    }

    /// Total number of diagnostic questions.
    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.questions_per_level.saturating_mul(4)
    }

    /// Placement for `correct` right answers in the diagnostic.
    #[must_use]
    pub fn placement_for_correct(&self, correct: u32) -> DifficultyLevel {
        if correct >= self.level4_min_correct {
            DifficultyLevel::Level4
        } else if correct >= self.level3_min_correct {
            DifficultyLevel::Level3
        } else if correct >= self.level2_min_correct {
            DifficultyLevel::Level2
        } else {
            DifficultyLevel::Level1
        }
    }
}

impl Default for AssessmentPolicy {
    /// One question per level; 2/3/4 correct place at Level2/3/4.
    fn default() -> Self {
        Self {
            questions_per_level: 1,
            level2_min_correct: 2,
            level3_min_correct: 3,
            level4_min_correct: 4,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progression_rejects_zero_thresholds() {
        assert_eq!(
            ProgressionPolicy::new(0, None, 1, None).unwrap_err(),
            PolicyError::InvalidLevelUpStreak
        );
        assert_eq!(
            ProgressionPolicy::new(3, Some(0), 1, None).unwrap_err(),
            PolicyError::InvalidLevelDownMisses
        );
        assert_eq!(
            ProgressionPolicy::new(3, None, 0, None).unwrap_err(),
            PolicyError::InvalidMasteryCount
        );
        assert_eq!(
            ProgressionPolicy::new(3, None, 1, Some(0)).unwrap_err(),
            PolicyError::InvalidQuestionLimit
        );
        assert!(ProgressionPolicy::new(5, None, 2, None).is_ok());
    }

    #[test]
    fn builder_setters_never_produce_zero() {
        let p = ProgressionPolicy::default()
            .with_level_up_streak(0)
            .with_level_down_misses(Some(0))
            .with_max_questions(Some(0));
        assert_eq!(p.level_up_streak(), 1);
        assert_eq!(p.level_down_misses(), None);
        assert_eq!(p.max_questions(), None);
    }

    #[test]
    fn assessment_thresholds_must_increase() {
        assert_eq!(
            AssessmentPolicy::new(1, 2, 2, 4).unwrap_err(),
            PolicyError::UnorderedThresholds
        );
        assert_eq!(
            AssessmentPolicy::new(1, 2, 3, 5).unwrap_err(),
            PolicyError::UnreachableThreshold {
                threshold: 5,
                total: 4
            }
        );
        assert_eq!(
            AssessmentPolicy::new(0, 1, 2, 3).unwrap_err(),
            PolicyError::InvalidQuestionsPerLevel
        );
    }

    #[test]
    fn placement_is_monotone_and_in_range() {
        let policy = AssessmentPolicy::new(2, 2, 4, 7).unwrap();
        let mut last = DifficultyLevel::Level1;
        for correct in 0..=policy.total_questions() {
            let level = policy.placement_for_correct(correct);
            assert!(level >= last);
            last = level;
        }
        assert_eq!(policy.placement_for_correct(0), DifficultyLevel::Level1);
        assert_eq!(policy.placement_for_correct(8), DifficultyLevel::Level4);
    }

    #[test]
    fn deserialization_validates() {
        let p: ProgressionPolicy =
            serde_json::from_str(r#"{"level_up_streak":5,"level_down_misses":null}"#).unwrap();
        assert_eq!(p.level_up_streak(), 5);
        assert_eq!(p.level_down_misses(), None);
        assert_eq!(
            p.mastery_correct_at_top(),
            ProgressionPolicy::DEFAULT_MASTERY_CORRECT_AT_TOP
        );

        assert!(serde_json::from_str::<ProgressionPolicy>(r#"{"level_up_streak":0}"#).is_err());
        assert!(
            serde_json::from_str::<AssessmentPolicy>(r#"{"level3_min_correct":1}"#).is_err()
        );
    }
}
