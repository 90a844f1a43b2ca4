use serde::Serialize;
use std::fmt;

use crate::model::{OptionLetter, QuestionId};

/// Outcome of one question in the final review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ReviewStatus {
    Correct,
    Incorrect,
    NoKey,
    Unanswered,
}

impl ReviewStatus {
    /// Classify a question from its chosen and correct letters.
    ///
    /// Priority: Correct, Incorrect, NoKey, Unanswered.
    #[must_use]
    pub fn classify(chosen: Option<OptionLetter>, correct: Option<OptionLetter>) -> Self {
        match (chosen, correct) {
            (Some(chosen), Some(correct)) if chosen == correct => Self::Correct,
            (Some(_), Some(_)) => Self::Incorrect,
            (_, None) => Self::NoKey,
            (None, Some(_)) => Self::Unanswered,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Correct => "Correct",
            Self::Incorrect => "Incorrect",
            Self::NoKey => "No key",
            Self::Unanswered => "Unanswered",
        }
    }

    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, Self::Correct)
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One line of the end-of-session review table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewRow {
    pub id: QuestionId,
    pub number: String,
    pub text: String,
    pub options: Vec<(OptionLetter, String)>,
    pub chosen: Option<OptionLetter>,
    pub correct: Option<OptionLetter>,
    pub status: ReviewStatus,
}

impl ReviewRow {
    #[must_use]
    pub fn option_text(&self, letter: OptionLetter) -> &str {
        self.options
            .iter()
            .find(|(l, _)| *l == letter)
            .map_or("", |(_, text)| text.as_str())
    }
}
