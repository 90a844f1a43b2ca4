use quiz_core::model::Mode;

use super::service::QuizSession;

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub position: usize,
    pub total: usize,
    pub answered: usize,
    pub checked: usize,
    pub flagged: usize,
    pub is_finished: bool,
}

/// What the question map shows for one question, before flagging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkState {
    /// Practice, checked, chosen letter matches the key.
    Correct,
    /// Practice, checked, wrong or no key.
    Incorrect,
    /// Answered but not checked (always the case in Exam).
    Answered,
    Unanswered,
}

/// Status of one question in the navigation overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionMark {
    pub flagged: bool,
    pub state: MarkState,
}

impl QuestionMark {
    /// Pure status derivation; holds no state of its own.
    #[must_use]
    pub fn derive(
        mode: Mode,
        flagged: bool,
        answered: bool,
        checked: bool,
        is_correct: bool,
    ) -> Self {
        let state = match (mode, checked, answered) {
            (Mode::Practice, true, _) if is_correct => MarkState::Correct,
            (Mode::Practice, true, _) => MarkState::Incorrect,
            (_, _, true) => MarkState::Answered,
            (_, _, false) => MarkState::Unanswered,
        };
        Self { flagged, state }
    }
}

impl QuizSession {
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            position: self.position,
            total: self.selected.len(),
            answered: self.answers.len(),
            checked: self.checked.len(),
            flagged: self.flags.len(),
            is_finished: self.is_finished(),
        }
    }

    /// Overview mark for the question at `index` in session order.
    #[must_use]
    pub fn mark(&self, index: usize) -> Option<QuestionMark> {
        let id = *self.selected.get(index)?;
        let chosen = self.answer(id);
        let is_correct = match (chosen, self.correct_letter(id)) {
            (Some(chosen), Some(correct)) => chosen == correct,
            _ => false,
        };
        Some(QuestionMark::derive(
            self.mode(),
            self.is_flagged(id),
            chosen.is_some(),
            self.is_checked(id),
            is_correct,
        ))
    }

    /// Marks for every question in session order.
    #[must_use]
    pub fn marks(&self) -> Vec<QuestionMark> {
        (0..self.selected.len())
            .filter_map(|index| self.mark(index))
            .collect()
    }
}
