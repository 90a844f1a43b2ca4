use log::debug;

use quiz_core::model::{Mode, OptionLetter, QuestionId};

use super::service::QuizSession;
use crate::error::SessionError;

/// Feedback for a submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitResult {
    Correct,
    Incorrect { correct: OptionLetter },
    /// Practice check on a question without an answer key.
    NoKeyAvailable,
    /// Exam answer stored; the session has advanced.
    Saved,
}

impl QuizSession {
    /// Record an answer for `id`, replacing any earlier one.
    ///
    /// Practice marks the question checked and awards the point the first time
    /// it is answered correctly; later wrong answers never take it back.
    /// Exam stores the answer and advances like `next()`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Finished` if the session already finished.
    /// Returns `SessionError::UnknownQuestion` if `id` is not in this session.
    /// Returns `SessionError::NoSelection` if `choice` is `None`.
    /// Returns `SessionError::InvalidLetter` if the letter is not one of the question's options.
    pub fn submit(
        &mut self,
        id: QuestionId,
        choice: Option<OptionLetter>,
    ) -> Result<SubmitResult, SessionError> {
        self.ensure_active()?;
        self.ensure_member(id)?;
        let letter = choice.ok_or(SessionError::NoSelection)?;
        let offered = self
            .option_order
            .get(&id)
            .is_some_and(|order| order.contains(&letter));
        if !offered {
            return Err(SessionError::InvalidLetter { id, letter });
        }

        self.answers.insert(id, letter);

        match self.mode() {
            Mode::Practice => Ok(self.check(id, letter)),
            Mode::Exam => {
                debug!("saved answer {letter} for question {id}");
                self.advance();
                Ok(SubmitResult::Saved)
            }
        }
    }

    /// Submit for whichever question is current.
    ///
    /// # Errors
    ///
    /// Same as `submit`.
    pub fn submit_current(
        &mut self,
        choice: Option<OptionLetter>,
    ) -> Result<SubmitResult, SessionError> {
        let id = self.current_id().ok_or(SessionError::Finished)?;
        self.submit(id, choice)
    }

    fn check(&mut self, id: QuestionId, letter: OptionLetter) -> SubmitResult {
        self.checked.insert(id);
        let result = match self.correct_letter(id) {
            None => SubmitResult::NoKeyAvailable,
            Some(correct) if correct == letter => {
                if self.scored.insert(id) {
                    self.score += 1;
                }
                SubmitResult::Correct
            }
            Some(correct) => SubmitResult::Incorrect { correct },
        };
        debug!(
            "checked question {id}: {result:?}, score {}",
            self.score
        );
        result
    }
}
