use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LetterError {
    #[error("not an option letter: {0:?}")]
    Invalid(String),
}

/// Identifier of an answer option. Question banks use A–D, optionally E.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum OptionLetter {
    A,
    B,
    C,
    D,
    E,
}

impl OptionLetter {
    /// Every supported letter, in source column order.
    pub const ALL: [OptionLetter; 5] = [Self::A, Self::B, Self::C, Self::D, Self::E];

    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
            Self::E => 'E',
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
        }
    }

    #[must_use]
    pub fn from_char(ch: char) -> Option<Self> {
        match ch.to_ascii_uppercase() {
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            'C' => Some(Self::C),
            'D' => Some(Self::D),
            'E' => Some(Self::E),
            _ => None,
        }
    }

    /// Parse a cell value such as `" b "` into a letter.
    ///
    /// Anything that is not exactly one supported letter after trimming yields `None`.
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        let mut chars = raw.trim().chars();
        let first = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Self::from_char(first)
    }
}

impl FromStr for OptionLetter {
    type Err = LetterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_lenient(s).ok_or_else(|| LetterError::Invalid(s.to_owned()))
    }
}

impl fmt::Display for OptionLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
