mod question_map_vm;
mod question_vm;
mod results_vm;
mod time_fmt;

pub use question_map_vm::{QuestionMapCellVm, map_question_marks, mark_glyph, mark_hint};
pub use question_vm::{OptionVm, QuestionVm, feedback_message};
pub use results_vm::{ResultsVm, ReviewRowVm, status_glyph};
pub use time_fmt::{format_datetime, format_elapsed};
