use log::debug;

use super::service::QuizSession;
use crate::error::SessionError;

/// Result of advancing a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Moved to the question at this position.
    Moved(usize),
    /// Advanced past the last question.
    Finished,
}

impl QuizSession {
    /// Advance to the next question, finishing after the last one.
    ///
    /// In Practice mode the current question must have been checked first.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::MustCheckFirst` if Practice and unchecked; position is unchanged.
    /// Returns `SessionError::Finished` if the session already finished.
    pub fn next(&mut self) -> Result<Step, SessionError> {
        self.ensure_active()?;
        if self.mode().is_practice() {
            let id = self.selected[self.position];
            if !self.checked.contains(&id) {
                return Err(SessionError::MustCheckFirst);
            }
        }
        Ok(self.advance())
    }

    /// Go back one question; stays put on the first.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Finished` if the session already finished.
    pub fn previous(&mut self) -> Result<usize, SessionError> {
        self.ensure_active()?;
        self.position = self.position.saturating_sub(1);
        debug!("moved back to position {}", self.position);
        Ok(self.position)
    }

    /// Jump to any question, ignoring check gating. Out-of-range indices clamp.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Finished` if the session already finished.
    pub fn jump_to(&mut self, index: usize) -> Result<usize, SessionError> {
        self.ensure_active()?;
        self.position = index.min(self.selected.len().saturating_sub(1));
        debug!("jumped to position {}", self.position);
        Ok(self.position)
    }

    pub(super) fn advance(&mut self) -> Step {
        self.position += 1;
        if self.position >= self.selected.len() {
            self.finish();
            Step::Finished
        } else {
            debug!("advanced to position {}", self.position);
            Step::Moved(self.position)
        }
    }
}
