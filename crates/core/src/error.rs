use thiserror::Error;

use crate::model::{LevelError, QuestionError};
use crate::policy::PolicyError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Level(#[from] LevelError),
    #[error(transparent)]
    Policy(#[from] PolicyError),
}
