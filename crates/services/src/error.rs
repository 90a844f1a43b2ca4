//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{OptionLetter, QuestionId};
use storage::StorageError;

/// Errors emitted by quiz sessions and the controller.
///
/// Everything except `Storage` is a recoverable, local condition: the session
/// is left unchanged and the caller decides how to surface it.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available")]
    EmptyQuestionBank,
    #[error("check the answer before moving on")]
    MustCheckFirst,
    #[error("no option selected")]
    NoSelection,
    #[error("option {letter} is not available for question {id}")]
    InvalidLetter { id: QuestionId, letter: OptionLetter },
    #[error("question {0} is not part of this session")]
    UnknownQuestion(QuestionId),
    #[error("session already finished")]
    Finished,
    #[error("no active session")]
    NoActiveSession,
    #[error(transparent)]
    Storage(#[from] StorageError),
}
