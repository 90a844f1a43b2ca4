use thiserror::Error;

use crate::model::{LetterError, QuestionError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Letter(#[from] LetterError),
    #[error(transparent)]
    Question(#[from] QuestionError),
}
