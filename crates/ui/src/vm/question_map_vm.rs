use services::{MarkState, QuestionMark, QuizSession};

/// One button in the navigation overview.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionMapCellVm {
    /// 0-based position to jump to.
    pub index: usize,
    /// 1-based label shown to the user.
    pub label: String,
    pub glyph: String,
    pub hint: String,
    pub is_current: bool,
}

#[must_use]
pub fn mark_glyph(mark: QuestionMark) -> String {
    let base = match mark.state {
        MarkState::Correct => "✅",
        MarkState::Incorrect => "❌",
        MarkState::Answered => "•",
        MarkState::Unanswered => "◻️",
    };
    if mark.flagged {
        format!("⚑{base}")
    } else {
        base.to_string()
    }
}

#[must_use]
pub fn mark_hint(mark: QuestionMark, practice: bool) -> String {
    let base = match mark.state {
        MarkState::Correct => "Answered & correct",
        MarkState::Incorrect => "Answered & incorrect",
        MarkState::Answered if practice => "Answered (not checked)",
        MarkState::Answered => "Answered",
        MarkState::Unanswered => "Not answered",
    };
    if mark.flagged {
        format!("Flagged • {base}")
    } else {
        base.to_string()
    }
}

#[must_use]
pub fn map_question_marks(session: &QuizSession) -> Vec<QuestionMapCellVm> {
    let practice = session.mode().is_practice();
    session
        .marks()
        .into_iter()
        .enumerate()
        .map(|(index, mark)| QuestionMapCellVm {
            index,
            label: (index + 1).to_string(),
            glyph: mark_glyph(mark),
            hint: mark_hint(mark, practice),
            is_current: !session.is_finished() && index == session.position(),
        })
        .collect()
}
