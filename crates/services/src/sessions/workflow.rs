use log::{debug, info};
use rand::RngCore;
use std::sync::Arc;

use quiz_core::Clock;
use quiz_core::model::{OptionLetter, QuestionId, QuestionTable, SessionConfig};
use storage::QuestionBank;

use super::answer::SubmitResult;
use super::navigation::Step;
use super::results::{ResultsReport, compile};
use super::service::QuizSession;
use crate::error::SessionError;

/// Which screen the quiz is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Quiz,
    Results,
}

/// Named user commands driving the quiz state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start(SessionConfig),
    Submit(Option<OptionLetter>),
    Next,
    Previous,
    JumpTo(usize),
    ToggleFlag,
    Restart,
    Home,
}

/// What a successfully applied command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Started { total: usize },
    Submitted(SubmitResult),
    Moved { position: usize },
    Finished,
    Flagged { id: QuestionId, flagged: bool },
    Restarted,
    WentHome,
}

/// Owns the question table and at most one session.
///
/// Home → Quiz (start) → Results (advancing past the last question) → Home.
/// Restart goes from Quiz or Results back to Quiz with the same selection.
pub struct QuizController {
    table: Arc<QuestionTable>,
    source: String,
    skipped: usize,
    clock: Clock,
    rng: Box<dyn RngCore>,
    session: Option<QuizSession>,
}

impl QuizController {
    #[must_use]
    pub fn new(table: QuestionTable) -> Self {
        Self {
            table: Arc::new(table),
            source: String::new(),
            skipped: 0,
            clock: Clock::default(),
            rng: Box::new(rand::rng()),
            session: None,
        }
    }

    /// Load the table from a question bank.
    ///
    /// An empty bank loads fine; starting a session on it fails.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the bank cannot be read.
    pub fn from_bank(bank: &dyn QuestionBank) -> Result<Self, SessionError> {
        let build = bank.load()?;
        let mut controller = Self::new(build.table);
        controller.source = bank.describe();
        controller.skipped = build.skipped.len();
        Ok(controller)
    }

    /// Replace the randomness source used for shuffling.
    #[must_use]
    pub fn with_rng(mut self, rng: Box<dyn RngCore>) -> Self {
        self.rng = rng;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        match &self.session {
            None => Screen::Home,
            Some(session) if session.is_finished() => Screen::Results,
            Some(_) => Screen::Quiz,
        }
    }

    #[must_use]
    pub fn table(&self) -> &QuestionTable {
        &self.table
    }

    /// Number of questions a session can draw from.
    #[must_use]
    pub fn available(&self) -> usize {
        self.table.len()
    }

    /// Label of the data source the table came from, if known.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Source rows left out of the table (blank prompt or no options).
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    /// Results for a finished session.
    #[must_use]
    pub fn results(&self) -> Option<ResultsReport> {
        self.session
            .as_ref()
            .filter(|session| session.is_finished())
            .map(compile)
    }

    /// Apply one command.
    ///
    /// A failed command leaves the controller unchanged.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActiveSession` for session commands on Home,
    /// and otherwise whatever the session operation reports.
    pub fn dispatch(&mut self, command: Command) -> Result<Outcome, SessionError> {
        debug!("dispatch {command:?} on {:?}", self.screen());
        match command {
            Command::Start(config) => self.start(config),
            Command::Home => {
                self.session = None;
                debug!("returned home");
                Ok(Outcome::WentHome)
            }
            Command::Submit(choice) => {
                let result = self.active_mut()?.submit_current(choice)?;
                Ok(Outcome::Submitted(result))
            }
            Command::Next => match self.active_mut()?.next()? {
                Step::Moved(position) => Ok(Outcome::Moved { position }),
                Step::Finished => Ok(Outcome::Finished),
            },
            Command::Previous => {
                let position = self.active_mut()?.previous()?;
                Ok(Outcome::Moved { position })
            }
            Command::JumpTo(index) => {
                let position = self.active_mut()?.jump_to(index)?;
                Ok(Outcome::Moved { position })
            }
            Command::ToggleFlag => {
                let session = self.active_mut()?;
                let id = session.current_id().ok_or(SessionError::Finished)?;
                let flagged = session.toggle_flag(id)?;
                Ok(Outcome::Flagged { id, flagged })
            }
            Command::Restart => {
                self.active_mut()?.restart();
                Ok(Outcome::Restarted)
            }
        }
    }

    fn start(&mut self, config: SessionConfig) -> Result<Outcome, SessionError> {
        let session = QuizSession::start(
            Arc::clone(&self.table),
            config,
            &mut *self.rng,
            self.clock,
        )?;
        let total = session.len();
        self.session = Some(session);
        info!("session started from {:?}", self.source);
        Ok(Outcome::Started { total })
    }

    fn active_mut(&mut self) -> Result<&mut QuizSession, SessionError> {
        self.session.as_mut().ok_or(SessionError::NoActiveSession)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{Mode, QuestionDraft};
    use quiz_core::time::fixed_clock;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use storage::InMemoryBank;

    fn controller(keys: &[&str]) -> QuizController {
        let drafts = keys
            .iter()
            .enumerate()
            .map(|(i, key)| {
                QuestionDraft::new((i + 1).to_string(), format!("Q{i}"))
                    .with_option(OptionLetter::A, "a")
                    .with_option(OptionLetter::B, "b")
                    .with_option(OptionLetter::C, "c")
                    .with_correct(*key)
            })
            .collect();
        QuizController::from_bank(&InMemoryBank::new(drafts))
            .unwrap()
            .with_rng(Box::new(StdRng::seed_from_u64(11)))
            .with_clock(fixed_clock())
    }

    fn ordered(mode: Mode, count: usize) -> SessionConfig {
        SessionConfig::new(mode, count)
            .with_shuffle_questions(false)
            .with_shuffle_options(false)
    }

    #[test]
    fn session_commands_require_a_session() {
        let mut ctl = controller(&["A"]);
        assert_eq!(ctl.screen(), Screen::Home);
        for command in [
            Command::Next,
            Command::Previous,
            Command::JumpTo(0),
            Command::Submit(Some(OptionLetter::A)),
            Command::ToggleFlag,
            Command::Restart,
        ] {
            assert!(matches!(
                ctl.dispatch(command),
                Err(SessionError::NoActiveSession)
            ));
        }
        assert_eq!(ctl.source(), "In-memory");
    }

    #[test]
    fn empty_bank_cannot_start() {
        let mut ctl = QuizController::new(QuestionTable::default());
        assert_eq!(ctl.available(), 0);
        let err = ctl
            .dispatch(Command::Start(SessionConfig::default()))
            .unwrap_err();
        assert!(matches!(err, SessionError::EmptyQuestionBank));
        assert_eq!(ctl.screen(), Screen::Home);
    }

    #[test]
    fn full_cycle_home_quiz_results_home() {
        let mut ctl = controller(&["A", "B"]);
        assert_eq!(
            ctl.dispatch(Command::Start(ordered(Mode::Practice, 2)))
                .unwrap(),
            Outcome::Started { total: 2 }
        );
        assert_eq!(ctl.screen(), Screen::Quiz);
        assert!(ctl.results().is_none());

        ctl.dispatch(Command::Submit(Some(OptionLetter::A))).unwrap();
        ctl.dispatch(Command::Next).unwrap();
        ctl.dispatch(Command::Submit(Some(OptionLetter::C))).unwrap();
        assert_eq!(ctl.dispatch(Command::Next).unwrap(), Outcome::Finished);
        assert_eq!(ctl.screen(), Screen::Results);

        let report = ctl.results().unwrap();
        assert_eq!(report.score, 1);

        assert!(matches!(
            ctl.dispatch(Command::Next),
            Err(SessionError::Finished)
        ));

        assert_eq!(ctl.dispatch(Command::Home).unwrap(), Outcome::WentHome);
        assert_eq!(ctl.screen(), Screen::Home);
        assert!(ctl.session().is_none());
    }

    #[test]
    fn flag_and_restart_from_results() {
        let mut ctl = controller(&["A", "B"]);
        ctl.dispatch(Command::Start(ordered(Mode::Exam, 2))).unwrap();
        let flagged = ctl.dispatch(Command::ToggleFlag).unwrap();
        assert_eq!(
            flagged,
            Outcome::Flagged {
                id: QuestionId::new(0),
                flagged: true
            }
        );
        ctl.dispatch(Command::Submit(Some(OptionLetter::A))).unwrap();
        ctl.dispatch(Command::Submit(Some(OptionLetter::A))).unwrap();
        assert_eq!(ctl.screen(), Screen::Results);

        assert_eq!(ctl.dispatch(Command::Restart).unwrap(), Outcome::Restarted);
        assert_eq!(ctl.screen(), Screen::Quiz);
        let session = ctl.session().unwrap();
        assert!(session.is_flagged(QuestionId::new(0)));
        assert_eq!(session.answer(QuestionId::new(0)), None);
    }

    #[test]
    fn skipped_rows_are_counted() {
        let drafts = vec![
            QuestionDraft::new("1", "Kept").with_option(OptionLetter::A, "a"),
            QuestionDraft::new("2", "No options"),
            QuestionDraft::new("3", "").with_option(OptionLetter::A, "a"),
        ];
        let ctl = QuizController::from_bank(&InMemoryBank::new(drafts)).unwrap();
        assert_eq!(ctl.available(), 1);
        assert_eq!(ctl.skipped(), 2);
    }

    #[test]
    fn restart_command_keeps_shuffled_layout() {
        let mut ctl = controller(&["A", "B", "C", "A", "B"]);
        ctl.dispatch(Command::Start(SessionConfig::new(Mode::Exam, 5)))
            .unwrap();
        let layout = |ctl: &QuizController| {
            let session = ctl.session().unwrap();
            session
                .selected_ids()
                .iter()
                .map(|id| (*id, session.option_order(*id).unwrap().to_vec()))
                .collect::<Vec<_>>()
        };
        let before = layout(&ctl);

        ctl.dispatch(Command::Submit(Some(OptionLetter::A))).unwrap();
        ctl.dispatch(Command::Submit(Some(OptionLetter::B))).unwrap();
        assert_eq!(ctl.dispatch(Command::Restart).unwrap(), Outcome::Restarted);

        assert_eq!(layout(&ctl), before);
        assert_eq!(ctl.session().unwrap().progress().answered, 0);
    }

    #[test]
    fn start_replaces_running_session() {
        let mut ctl = controller(&["A", "B", "C"]);
        ctl.dispatch(Command::Start(ordered(Mode::Exam, 3))).unwrap();
        ctl.dispatch(Command::Submit(Some(OptionLetter::B))).unwrap();

        ctl.dispatch(Command::Start(ordered(Mode::Practice, 1)))
            .unwrap();
        let session = ctl.session().unwrap();
        assert_eq!(session.len(), 1);
        assert_eq!(session.position(), 0);
        assert_eq!(session.answer(QuestionId::new(0)), None);
    }

    #[test]
    fn gating_error_leaves_position() {
        let mut ctl = controller(&["A", "B"]);
        ctl.dispatch(Command::Start(ordered(Mode::Practice, 2)))
            .unwrap();
        assert!(matches!(
            ctl.dispatch(Command::Next),
            Err(SessionError::MustCheckFirst)
        ));
        assert_eq!(
            ctl.dispatch(Command::JumpTo(1)).unwrap(),
            Outcome::Moved { position: 1 }
        );
        assert!(matches!(
            ctl.dispatch(Command::Submit(None)),
            Err(SessionError::NoSelection)
        ));
        assert_eq!(ctl.session().unwrap().position(), 1);
    }
}
