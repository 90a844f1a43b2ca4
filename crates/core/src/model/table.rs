use crate::model::{OptionLetter, QuestionDraft, QuestionError, QuestionId, QuestionRecord};

/// A source row that did not make it into the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 0-based row index in the source, excluding the header.
    pub row: usize,
    pub reason: QuestionError,
}

/// Result of building a table from loader drafts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableBuild {
    pub table: QuestionTable,
    pub skipped: Vec<SkippedRow>,
}

/// Immutable, validated collection of questions.
///
/// Ids are positions in this table, assigned after invalid rows are removed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuestionTable {
    questions: Vec<QuestionRecord>,
}

impl QuestionTable {
    /// Validate drafts in order, keeping the ones that pass.
    #[must_use]
    pub fn from_drafts(drafts: impl IntoIterator<Item = QuestionDraft>) -> TableBuild {
        let mut questions = Vec::new();
        let mut skipped = Vec::new();

        for (row, draft) in drafts.into_iter().enumerate() {
            match draft.validate(QuestionId::new(questions.len())) {
                Ok(record) => questions.push(record),
                Err(reason) => skipped.push(SkippedRow { row, reason }),
            }
        }

        TableBuild {
            table: Self { questions },
            skipped,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: QuestionId) -> Option<&QuestionRecord> {
        self.questions.get(id.value())
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuestionRecord> {
        self.questions.iter()
    }

    /// Option columns needed to render this table: A–D, plus E when used.
    #[must_use]
    pub fn letter_columns(&self) -> Vec<OptionLetter> {
        let uses_e = self
            .questions
            .iter()
            .any(|q| q.has_option(OptionLetter::E));
        let count = if uses_e { 5 } else { 4 };
        OptionLetter::ALL[..count].to_vec()
    }
}
