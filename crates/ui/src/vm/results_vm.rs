use quiz_core::model::ReviewStatus;
use services::ResultsReport;

use super::time_fmt::format_elapsed;

#[must_use]
pub fn status_glyph(status: ReviewStatus) -> &'static str {
    match status {
        ReviewStatus::Correct => "✅",
        ReviewStatus::Incorrect => "❌",
        ReviewStatus::NoKey => "ℹ️",
        ReviewStatus::Unanswered => "⚠️",
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewRowVm {
    pub number: String,
    pub question: String,
    pub chosen: String,
    pub correct: String,
    pub status: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub score_label: String,
    pub percent_label: String,
    pub elapsed_label: Option<String>,
    pub rows: Vec<ReviewRowVm>,
}

impl ResultsVm {
    #[must_use]
    pub fn from_report(report: &ResultsReport) -> Self {
        let rows = report
            .rows
            .iter()
            .map(|row| ReviewRowVm {
                number: row.number.clone(),
                question: row.text.clone(),
                chosen: row.chosen.map(|l| l.to_string()).unwrap_or_default(),
                correct: row.correct.map(|l| l.to_string()).unwrap_or_default(),
                status: format!("{} {}", row.status.label(), status_glyph(row.status)),
            })
            .collect();

        Self {
            score_label: format!("{} / {}", report.score, report.total),
            percent_label: format!("{:.0}%", report.percent()),
            elapsed_label: report.elapsed().map(format_elapsed),
            rows,
        }
    }
}
