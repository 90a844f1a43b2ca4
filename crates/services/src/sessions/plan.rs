use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashMap;

use quiz_core::model::{OptionLetter, QuestionId, QuestionTable, SessionConfig};

use crate::error::SessionError;

/// Question selection and per-question option order for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPlan {
    pub selected: Vec<QuestionId>,
    pub option_order: HashMap<QuestionId, Vec<OptionLetter>>,
}

impl SessionPlan {
    #[must_use]
    pub fn total(&self) -> usize {
        self.selected.len()
    }
}

/// Selects and orders questions for a new session.
pub struct SessionBuilder<'a> {
    table: &'a QuestionTable,
    config: &'a SessionConfig,
}

impl<'a> SessionBuilder<'a> {
    #[must_use]
    pub fn new(table: &'a QuestionTable, config: &'a SessionConfig) -> Self {
        Self { table, config }
    }

    /// Build a plan, drawing all randomness from `rng`.
    ///
    /// - the requested count is clamped to `[1, table.len()]`;
    /// - questions keep table order unless `shuffle_questions`;
    /// - each question's options keep A..E order unless `shuffle_options`
    ///   and it has more than one option.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyQuestionBank` if the table has no questions.
    pub fn build<R: Rng + ?Sized>(self, rng: &mut R) -> Result<SessionPlan, SessionError> {
        if self.table.is_empty() {
            return Err(SessionError::EmptyQuestionBank);
        }
        let count = self.config.clamped_count(self.table.len());

        let mut selected: Vec<QuestionId> = self.table.iter().map(|q| q.id()).collect();
        if self.config.shuffle_questions {
            selected.shuffle(rng);
        }
        selected.truncate(count);

        let mut option_order = HashMap::with_capacity(selected.len());
        for id in &selected {
            let mut letters = self
                .table
                .get(*id)
                .map(|q| q.letters())
                .unwrap_or_default();
            if self.config.shuffle_options && letters.len() > 1 {
                letters.shuffle(rng);
            }
            option_order.insert(*id, letters);
        }

        Ok(SessionPlan {
            selected,
            option_order,
        })
    }
}
