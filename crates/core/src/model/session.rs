use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── MODE ──────────────────────────────────────────────────────────────────────
//

/// How a session gives feedback and scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Feedback on every check; score accrues as the user goes.
    #[default]
    Practice,
    /// Answers are saved silently and scored at the end.
    Exam,
}

impl Mode {
    #[must_use]
    pub fn is_practice(self) -> bool {
        matches!(self, Self::Practice)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Practice => f.write_str("Practice"),
            Self::Exam => f.write_str("Exam"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown mode {0:?} (expected practice or exam)")]
pub struct ModeParseError(String);

impl FromStr for Mode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "practice" => Ok(Self::Practice),
            "exam" => Ok(Self::Exam),
            _ => Err(ModeParseError(s.to_owned())),
        }
    }
}

//
// ─── SESSION CONFIG ────────────────────────────────────────────────────────────
//

pub const DEFAULT_QUESTION_COUNT: usize = 50;

/// Settings chosen on the home screen; fixed for the life of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub mode: Mode,
    /// Requested size; clamped against the table when the session starts.
    pub question_count: usize,
    pub shuffle_questions: bool,
    pub shuffle_options: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Practice,
            question_count: DEFAULT_QUESTION_COUNT,
            shuffle_questions: true,
            shuffle_options: true,
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub fn new(mode: Mode, question_count: usize) -> Self {
        Self {
            mode,
            question_count,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_shuffle_questions(mut self, shuffle: bool) -> Self {
        self.shuffle_questions = shuffle;
        self
    }

    #[must_use]
    pub fn with_shuffle_options(mut self, shuffle: bool) -> Self {
        self.shuffle_options = shuffle;
        self
    }

    /// Requested count clamped to `[1, total]`. Returns 0 only when `total` is 0.
    #[must_use]
    pub fn clamped_count(&self, total: usize) -> usize {
        if total == 0 {
            return 0;
        }
        self.question_count.clamp(1, total)
    }
}
