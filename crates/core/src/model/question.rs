use thiserror::Error;

use crate::model::{OptionLetter, QuestionId};

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

/// A raw question row as produced by a loader, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuestionDraft {
    pub number: String,
    pub text: String,
    pub options: Vec<(OptionLetter, String)>,
    pub correct: String,
}

impl QuestionDraft {
    #[must_use]
    pub fn new(number: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            text: text.into(),
            options: Vec::new(),
            correct: String::new(),
        }
    }

    #[must_use]
    pub fn with_option(mut self, letter: OptionLetter, text: impl Into<String>) -> Self {
        self.options.push((letter, text.into()));
        self
    }

    #[must_use]
    pub fn with_correct(mut self, correct: impl Into<String>) -> Self {
        self.correct = correct.into();
        self
    }

    /// Validate the draft into an immutable record with the given id.
    ///
    /// Blank options are dropped and the rest are ordered A..E. A key that does
    /// not name a present option is demoted to "no key" rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyPrompt` if the prompt is blank.
    /// Returns `QuestionError::NoOptions` if no option has text.
    pub fn validate(self, id: QuestionId) -> Result<QuestionRecord, QuestionError> {
        let text = self.text.trim();
        if text.is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }

        let mut options: Vec<(OptionLetter, String)> = Vec::with_capacity(self.options.len());
        for (letter, option_text) in self.options {
            let option_text = option_text.trim();
            if option_text.is_empty() {
                continue;
            }
            // Later duplicates of a letter replace earlier ones.
            if let Some(slot) = options.iter_mut().find(|(l, _)| *l == letter) {
                slot.1 = option_text.to_owned();
            } else {
                options.push((letter, option_text.to_owned()));
            }
        }
        if options.is_empty() {
            return Err(QuestionError::NoOptions);
        }
        options.sort_by_key(|(letter, _)| *letter);

        let raw_key = self.correct.trim();
        let parsed = OptionLetter::parse_lenient(raw_key);
        let correct = parsed.filter(|letter| options.iter().any(|(l, _)| l == letter));
        let key_demoted = !raw_key.is_empty() && correct.is_none();

        Ok(QuestionRecord {
            id,
            number: self.number.trim().to_owned(),
            text: text.to_owned(),
            options,
            correct,
            key_demoted,
        })
    }
}

/// An immutable, validated question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRecord {
    id: QuestionId,
    number: String,
    text: String,
    options: Vec<(OptionLetter, String)>,
    correct: Option<OptionLetter>,
    key_demoted: bool,
}

impl QuestionRecord {
    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    /// Display label from the source; not guaranteed unique.
    #[must_use]
    pub fn number(&self) -> &str {
        &self.number
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Present options in source letter order.
    #[must_use]
    pub fn options(&self) -> &[(OptionLetter, String)] {
        &self.options
    }

    #[must_use]
    pub fn option_text(&self, letter: OptionLetter) -> Option<&str> {
        self.options
            .iter()
            .find(|(l, _)| *l == letter)
            .map(|(_, text)| text.as_str())
    }

    #[must_use]
    pub fn letters(&self) -> Vec<OptionLetter> {
        self.options.iter().map(|(letter, _)| *letter).collect()
    }

    #[must_use]
    pub fn has_option(&self, letter: OptionLetter) -> bool {
        self.option_text(letter).is_some()
    }

    #[must_use]
    pub fn correct(&self) -> Option<OptionLetter> {
        self.correct
    }

    /// True when the source supplied a key that could not be used.
    #[must_use]
    pub fn key_demoted(&self) -> bool {
        self.key_demoted
    }
}

//
// ─── QUESTION VALIDATION ERRORS ────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuestionError {
    #[error("question prompt is empty")]
    EmptyPrompt,

    #[error("question has no answer options")]
    NoOptions,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
