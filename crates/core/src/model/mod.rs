mod ids;
mod letter;
mod question;
mod review;
mod session;
mod table;

pub use ids::QuestionId;
pub use letter::{LetterError, OptionLetter};
pub use question::{QuestionDraft, QuestionError, QuestionRecord};
pub use review::{ReviewRow, ReviewStatus};
pub use session::{DEFAULT_QUESTION_COUNT, Mode, ModeParseError, SessionConfig};
pub use table::{QuestionTable, SkippedRow, TableBuild};
