use std::path::PathBuf;

use log::{debug, warn};
use quiz_core::model::{QuestionDraft, QuestionError, QuestionTable, TableBuild};
use thiserror::Error;

/// Errors surfaced by question bank sources and exporters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("question bank not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Source contract for a question table.
///
/// Implementations return whatever validated table they can build; an empty
/// table is not an error at this layer.
pub trait QuestionBank {
    /// Load and validate the question table, along with the rows that were
    /// left out of it.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the underlying source cannot be read.
    fn load(&self) -> Result<TableBuild, StorageError>;

    /// Short label for the data source, shown next to the question count.
    fn describe(&self) -> String;
}

/// Log rows dropped while building a table.
pub(crate) fn finish_build(build: TableBuild, source: &str) -> TableBuild {
    for skipped in &build.skipped {
        match skipped.reason {
            // Blank lines are routine in spreadsheets.
            QuestionError::EmptyPrompt => {
                debug!("{source}: row {} skipped: {}", skipped.row + 1, skipped.reason);
            }
            QuestionError::NoOptions => {
                warn!("{source}: row {} skipped: {}", skipped.row + 1, skipped.reason);
            }
        }
    }
    for record in build.table.iter().filter(|r| r.key_demoted()) {
        warn!(
            "{source}: question {:?} has an unusable answer key; treating as no key",
            record.number()
        );
    }
    build
}

/// Question bank held in memory, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBank {
    drafts: Vec<QuestionDraft>,
}

impl InMemoryBank {
    #[must_use]
    pub fn new(drafts: Vec<QuestionDraft>) -> Self {
        Self { drafts }
    }

    pub fn push(&mut self, draft: QuestionDraft) {
        self.drafts.push(draft);
    }
}

impl QuestionBank for InMemoryBank {
    fn load(&self) -> Result<TableBuild, StorageError> {
        let build = QuestionTable::from_drafts(self.drafts.iter().cloned());
        Ok(finish_build(build, "in-memory"))
    }

    fn describe(&self) -> String {
        "In-memory".to_string()
    }
}
