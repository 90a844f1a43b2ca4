use chrono::{DateTime, Utc};
use log::{debug, info};
use rand::Rng;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use quiz_core::Clock;
use quiz_core::model::{
    Mode, OptionLetter, QuestionId, QuestionRecord, QuestionTable, SessionConfig,
};

use super::plan::{SessionBuilder, SessionPlan};
use crate::error::SessionError;

//
// ─── PHASE ─────────────────────────────────────────────────────────────────────
//

/// Lifecycle of a running session. `Finished` is terminal until restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Active,
    Finished,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory quiz session over a shared question table.
///
/// Question selection and option order are fixed when the session starts and
/// survive restart; answers, checks and score do not. Flags survive restart.
#[derive(Debug, Clone)]
pub struct QuizSession {
    pub(super) table: Arc<QuestionTable>,
    pub(super) config: SessionConfig,
    pub(super) clock: Clock,
    pub(super) selected: Vec<QuestionId>,
    pub(super) option_order: HashMap<QuestionId, Vec<OptionLetter>>,
    pub(super) position: usize,
    pub(super) phase: SessionPhase,
    pub(super) answers: HashMap<QuestionId, OptionLetter>,
    pub(super) checked: HashSet<QuestionId>,
    // Append-only: a question scored once stays scored until restart.
    pub(super) scored: HashSet<QuestionId>,
    pub(super) flags: BTreeSet<QuestionId>,
    pub(super) score: u32,
    pub(super) started_at: DateTime<Utc>,
    pub(super) completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Start a session: select questions, fix option orders, reset progress.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyQuestionBank` if the table has no questions.
    pub fn start<R: Rng + ?Sized>(
        table: Arc<QuestionTable>,
        config: SessionConfig,
        rng: &mut R,
        clock: Clock,
    ) -> Result<Self, SessionError> {
        let plan = SessionBuilder::new(&table, &config).build(rng)?;
        info!(
            "starting {} session with {} of {} questions",
            config.mode,
            plan.total(),
            table.len()
        );
        Ok(Self::from_plan(table, config, plan, clock))
    }

    /// Build a session from an already computed plan.
    #[must_use]
    pub fn from_plan(
        table: Arc<QuestionTable>,
        config: SessionConfig,
        plan: SessionPlan,
        clock: Clock,
    ) -> Self {
        Self {
            table,
            config,
            clock,
            selected: plan.selected,
            option_order: plan.option_order,
            position: 0,
            phase: SessionPhase::Active,
            answers: HashMap::new(),
            checked: HashSet::new(),
            scored: HashSet::new(),
            flags: BTreeSet::new(),
            score: 0,
            started_at: clock.now(),
            completed_at: None,
        }
    }

    /// Start over with the same questions and option order.
    ///
    /// Flags are kept.
    pub fn restart(&mut self) {
        self.position = 0;
        self.phase = SessionPhase::Active;
        self.answers.clear();
        self.checked.clear();
        self.scored.clear();
        self.score = 0;
        self.started_at = self.clock.now();
        self.completed_at = None;
        debug!("session restarted with {} questions", self.selected.len());
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    #[must_use]
    pub fn table(&self) -> &QuestionTable {
        &self.table
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == SessionPhase::Finished
    }

    /// Number of questions in this session.
    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    #[must_use]
    pub fn selected_ids(&self) -> &[QuestionId] {
        &self.selected
    }

    /// Current index into the selection. Equals `len()` once finished.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn current_id(&self) -> Option<QuestionId> {
        if self.is_finished() {
            return None;
        }
        self.selected.get(self.position).copied()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&QuestionRecord> {
        self.current_id().and_then(|id| self.table.get(id))
    }

    #[must_use]
    pub fn question(&self, id: QuestionId) -> Option<&QuestionRecord> {
        if !self.option_order.contains_key(&id) {
            return None;
        }
        self.table.get(id)
    }

    /// Position of a question within this session.
    #[must_use]
    pub fn index_of(&self, id: QuestionId) -> Option<usize> {
        self.selected.iter().position(|selected| *selected == id)
    }

    /// Display order of the question's options, fixed for the session.
    #[must_use]
    pub fn option_order(&self, id: QuestionId) -> Option<&[OptionLetter]> {
        self.option_order.get(&id).map(Vec::as_slice)
    }

    #[must_use]
    pub fn answer(&self, id: QuestionId) -> Option<OptionLetter> {
        self.answers.get(&id).copied()
    }

    #[must_use]
    pub fn correct_letter(&self, id: QuestionId) -> Option<OptionLetter> {
        self.table.get(id).and_then(QuestionRecord::correct)
    }

    #[must_use]
    pub fn is_checked(&self, id: QuestionId) -> bool {
        self.checked.contains(&id)
    }

    #[must_use]
    pub fn is_scored(&self, id: QuestionId) -> bool {
        self.scored.contains(&id)
    }

    #[must_use]
    pub fn is_flagged(&self, id: QuestionId) -> bool {
        self.flags.contains(&id)
    }

    /// Flagged questions in id order.
    pub fn flagged_ids(&self) -> impl Iterator<Item = QuestionId> + '_ {
        self.flags.iter().copied()
    }

    /// Running score. Only maintained in Practice mode; see `compile`.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Toggle the review flag on a question. Returns the new flag state.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Finished` after the session has finished.
    /// Returns `SessionError::UnknownQuestion` if `id` is not in this session.
    pub fn toggle_flag(&mut self, id: QuestionId) -> Result<bool, SessionError> {
        self.ensure_active()?;
        self.ensure_member(id)?;
        let flagged = if self.flags.remove(&id) {
            false
        } else {
            self.flags.insert(id);
            true
        };
        debug!("question {id} flagged={flagged}");
        Ok(flagged)
    }

    /// Toggle the flag on the current question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Finished` after the session has finished.
    pub fn toggle_flag_current(&mut self) -> Result<bool, SessionError> {
        let id = self.current_id().ok_or(SessionError::Finished)?;
        self.toggle_flag(id)
    }

    pub(super) fn ensure_active(&self) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::Active => Ok(()),
            SessionPhase::Finished => Err(SessionError::Finished),
        }
    }

    pub(super) fn ensure_member(&self, id: QuestionId) -> Result<(), SessionError> {
        if self.option_order.contains_key(&id) {
            Ok(())
        } else {
            Err(SessionError::UnknownQuestion(id))
        }
    }

    pub(super) fn finish(&mut self) {
        self.phase = SessionPhase::Finished;
        self.position = self.selected.len();
        self.completed_at = Some(self.clock.now());
        info!("{} session finished", self.config.mode);
    }
}
