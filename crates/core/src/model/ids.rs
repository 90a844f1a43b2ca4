use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a question: its 0-based row position in the table.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(usize);

impl QuestionId {
    /// Creates a new `QuestionId`
    #[must_use]
    pub fn new(id: usize) -> Self {
        Self(id)
    }

    /// Returns the underlying row index
    #[must_use]
    pub fn value(&self) -> usize {
        self.0
    }
}

impl fmt::Debug for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionId({})", self.0)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_id_formats() {
        let id = QuestionId::new(7);
        assert_eq!(id.value(), 7);
        assert_eq!(format!("{id:?}"), "QuestionId(7)");
        assert_eq!(id.to_string(), "7");
    }
}
