mod answer;
mod navigation;
mod plan;
mod progress;
mod results;
mod service;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use answer::SubmitResult;
pub use navigation::Step;
pub use plan::{SessionBuilder, SessionPlan};
pub use progress::{MarkState, QuestionMark, SessionProgress};
pub use results::{ResultsReport, compile};
pub use service::{QuizSession, SessionPhase};
pub use workflow::{Command, Outcome, QuizController, Screen};
