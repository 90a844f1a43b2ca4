use quiz_core::model::OptionLetter;
use services::{QuizSession, SubmitResult};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub letter: OptionLetter,
    /// `"B. text"`; the letter is the source letter, not the display slot.
    pub label: String,
}

/// Everything needed to draw the current question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub header: String,
    pub mode_label: String,
    pub number: String,
    pub prompt: String,
    pub options: Vec<OptionVm>,
    /// Display index of the previously recorded answer.
    pub selected: Option<usize>,
    pub submit_label: &'static str,
    pub next_blocked: bool,
    pub next_hint: Option<&'static str>,
    pub flag_label: &'static str,
    pub flagged: bool,
}

impl QuestionVm {
    /// Returns `None` once the session has finished.
    #[must_use]
    pub fn from_session(session: &QuizSession) -> Option<Self> {
        let question = session.current_question()?;
        let id = question.id();
        let order = session.option_order(id).unwrap_or_default();

        let options: Vec<OptionVm> = order
            .iter()
            .map(|letter| OptionVm {
                letter: *letter,
                label: format!(
                    "{letter}. {}",
                    question.option_text(*letter).unwrap_or_default()
                ),
            })
            .collect();
        let selected = session
            .answer(id)
            .and_then(|chosen| order.iter().position(|letter| *letter == chosen));

        let practice = session.mode().is_practice();
        let next_blocked = practice && !session.is_checked(id);
        let flagged = session.is_flagged(id);

        Some(Self {
            header: format!("Question {} of {}", session.position() + 1, session.len()),
            mode_label: session.mode().to_string(),
            number: question.number().to_owned(),
            prompt: question.text().to_owned(),
            options,
            selected,
            submit_label: if practice { "Check Answer" } else { "Save Answer" },
            next_blocked,
            next_hint: next_blocked.then_some("Check answer first to proceed."),
            flag_label: if flagged { "Unflag ⚑" } else { "Flag ⚑" },
            flagged,
        })
    }

    /// Letter shown at a 0-based display slot.
    #[must_use]
    pub fn letter_at(&self, index: usize) -> Option<OptionLetter> {
        self.options.get(index).map(|option| option.letter)
    }
}

/// User-facing text for a submit result.
#[must_use]
pub fn feedback_message(result: SubmitResult, chosen: OptionLetter) -> String {
    match result {
        SubmitResult::Correct => format!("✅ Correct! ({chosen})"),
        SubmitResult::Incorrect { correct } => {
            format!("❌ Incorrect. Correct answer: {correct}")
        }
        SubmitResult::NoKeyAvailable => "ℹ️ No answer key provided for this question.".to_string(),
        SubmitResult::Saved => format!("💾 Saved answer {chosen}."),
    }
}
