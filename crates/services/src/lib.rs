#![forbid(unsafe_code)]

pub mod assessment;
pub mod config;
pub mod controller;
pub mod error;
pub mod ledger;
pub mod sessions;

pub use quiz_core::Clock;

pub use assessment::{AssessmentEngine, AssessmentStep, placement_for};
pub use config::QuizConfig;
pub use controller::{AnswerReceipt, AppSnapshot, Dispatch, Intent, Screen, ScreenController, Transition};
pub use error::{AssessmentError, ConfigError, ControllerError, ProgressionError};
pub use ledger::MistakeLedger;
pub use sessions::{
    AnswerOutcome, LearningSession, LevelChange, MasteryReached, MasteryReason, ProgressionEngine,
    QuestionPicker,
};
