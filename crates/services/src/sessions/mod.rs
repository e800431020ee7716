mod picker;
mod progression;
mod service;

// Public API of the learning-session subsystem.
pub use crate::error::ProgressionError;
pub use picker::QuestionPicker;
pub use progression::{
    AnswerOutcome, LevelChange, MasteryReached, MasteryReason, ProgressionEngine,
};
pub use service::LearningSession;
