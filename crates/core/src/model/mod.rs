mod competency;
mod ids;
mod level;
mod mistake;
mod progress;
mod question;

pub use competency::Competency;
pub use ids::QuestionId;
pub use level::{DifficultyLevel, LevelError};
pub use mistake::MistakeRecord;
pub use progress::UserProgress;
pub use question::{Question, QuestionDraft, QuestionError};
