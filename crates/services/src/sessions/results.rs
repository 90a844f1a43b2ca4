use chrono::{DateTime, Duration, Utc};

use quiz_core::model::{Mode, OptionLetter, ReviewRow, ReviewStatus};

use super::service::QuizSession;

/// Final score and per-question review for a session.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsReport {
    pub mode: Mode,
    pub score: u32,
    pub total: usize,
    pub rows: Vec<ReviewRow>,
    /// Option columns to show for this table (A–D, or A–E).
    pub letter_columns: Vec<OptionLetter>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl ResultsReport {
    /// Score as a percentage of the session size.
    #[must_use]
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        f64::from(self.score) * 100.0 / self.total as f64
    }

    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        self.completed_at.map(|done| done - self.started_at)
    }

    #[must_use]
    pub fn count(&self, status: ReviewStatus) -> usize {
        self.rows.iter().filter(|row| row.status == status).count()
    }
}

/// Compile the results for a session without modifying it.
///
/// Exam scores are recomputed from the recorded answers every time; Practice
/// uses the running score, so a point earned earlier is kept even if the
/// latest answer for that question is wrong.
#[must_use]
pub fn compile(session: &QuizSession) -> ResultsReport {
    let rows: Vec<ReviewRow> = session
        .selected_ids()
        .iter()
        .filter_map(|id| session.question(*id))
        .map(|question| {
            let chosen = session.answer(question.id());
            let correct = question.correct();
            ReviewRow {
                id: question.id(),
                number: question.number().to_owned(),
                text: question.text().to_owned(),
                options: question.options().to_vec(),
                chosen,
                correct,
                status: ReviewStatus::classify(chosen, correct),
            }
        })
        .collect();

    let score = match session.mode() {
        Mode::Practice => session.score(),
        Mode::Exam => {
            let correct = rows.iter().filter(|row| row.status.is_correct()).count();
            u32::try_from(correct).unwrap_or(u32::MAX)
        }
    };

    ResultsReport {
        mode: session.mode(),
        score,
        total: session.len(),
        rows,
        letter_columns: session.table().letter_columns(),
        started_at: session.started_at(),
        completed_at: session.completed_at(),
    }
}

impl QuizSession {
    #[must_use]
    pub fn results(&self) -> ResultsReport {
        compile(self)
    }
}
