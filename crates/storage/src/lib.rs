#![forbid(unsafe_code)]

pub mod content;
pub mod repository;

pub use content::{QuestionRecord, builtin_bank, load_bank_from_json};
pub use repository::{InMemoryQuestionBank, QuestionRepository, StorageError};
