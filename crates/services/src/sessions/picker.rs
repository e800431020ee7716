use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::sync::Arc;

use quiz_core::model::{DifficultyLevel, Question};
use storage::QuestionRepository;

use crate::error::ProgressionError;

/// Serves learning questions for the current level.
///
/// Each level is a rotation in authoring order (optionally shuffled each
/// pass). The same question is never served twice in a row while a level has
/// more than one question.
#[derive(Debug, Clone)]
pub struct QuestionPicker {
    rotations: [Vec<Arc<Question>>; 4],
    cursors: [usize; 4],
    last_served: Option<Arc<Question>>,
    rng: Option<StdRng>,
}

impl QuestionPicker {
    /// Build rotations for every level.
    ///
    /// # Errors
    ///
    /// Returns `ProgressionError::EmptyLevel` if any level has no questions.
    pub fn new(repo: &dyn QuestionRepository) -> Result<Self, ProgressionError> {
        let rotations = DifficultyLevel::ALL.map(|level| repo.questions(level));
        for (level, rotation) in DifficultyLevel::ALL.iter().zip(&rotations) {
            if rotation.is_empty() {
                return Err(ProgressionError::EmptyLevel(*level));
            }
        }
        Ok(Self {
            rotations,
            cursors: [0; 4],
            last_served: None,
            rng: None,
        })
    }

    /// Shuffle each rotation, seeded for reproducible runs or from the OS.
    #[must_use]
    pub fn with_shuffle(mut self, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        for rotation in &mut self.rotations {
            rotation.shuffle(&mut rng);
        }
        self.rng = Some(rng);
        self
    }

    /// Next question at `level`.
    pub fn next(&mut self, level: DifficultyLevel) -> Arc<Question> {
        let slot = usize::from(level.value() - 1);
        let mut question = self.advance(slot);
        if self.rotations[slot].len() > 1
            && self
                .last_served
                .as_ref()
                .is_some_and(|last| last.id() == question.id())
        {
            question = self.advance(slot);
        }
        self.last_served = Some(Arc::clone(&question));
        question
    }

    fn advance(&mut self, slot: usize) -> Arc<Question> {
        let rotation = &mut self.rotations[slot];
        if self.cursors[slot] >= rotation.len() {
            self.cursors[slot] = 0;
            if let Some(rng) = self.rng.as_mut() {
                rotation.shuffle(rng);
            }
        }
        let question = Arc::clone(&rotation[self.cursors[slot]]);
        self.cursors[slot] += 1;
        question
    }
}
