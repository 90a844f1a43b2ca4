#![forbid(unsafe_code)]

pub mod vm;

pub use vm::{
    QuestionMapCellVm, QuestionVm, ResultsVm, ReviewRowVm, feedback_message, map_question_marks,
};
