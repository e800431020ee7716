use serde::{Deserialize, Serialize};

use crate::model::level::DifficultyLevel;

/// Learner progress within one learning session.
///
/// Handed to the presentation layer as a `Copy` snapshot; the only live
/// instance is owned by the progression engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserProgress {
    pub current_level: DifficultyLevel,
    /// Consecutive correct answers at the current level.
    pub streak: u32,
    pub score: u32,
    pub questions_answered: u32,
}

impl UserProgress {
    /// Fresh progress seeded at `level`.
    #[must_use]
    pub fn starting_at(level: DifficultyLevel) -> Self {
        Self {
            current_level: level,
            ..Self::default()
        }
    }

    /// Fraction of answered questions that were correct, `0.0` before any answer.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        if self.questions_answered == 0 {
            return 0.0;
        }
        f64::from(self.score) / f64::from(self.questions_answered)
    }

    /// Checks `score <= questions_answered`.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.score <= self.questions_answered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_progress_starts_at_level_one() {
        let p = UserProgress::default();
        assert_eq!(p.current_level, DifficultyLevel::Level1);
        assert_eq!((p.streak, p.score, p.questions_answered), (0, 0, 0));
        assert!(p.is_consistent());
    }

    #[test]
    fn starting_at_seeds_level_only() {
        let p = UserProgress::starting_at(DifficultyLevel::Level3);
        assert_eq!(p.current_level, DifficultyLevel::Level3);
        assert_eq!(p.score, 0);
    }

    #[test]
    fn accuracy_handles_empty_and_partial() {
        assert_eq!(UserProgress::default().accuracy(), 0.0);
        let p = UserProgress {
            score: 3,
            questions_answered: 4,
            ..UserProgress::default()
        };
        assert!((p.accuracy() - 0.75).abs() < f64::EPSILON);
    }
}
