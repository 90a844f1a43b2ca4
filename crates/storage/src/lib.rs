#![forbid(unsafe_code)]

pub mod csv_bank;
pub mod export;
pub mod repository;

pub use csv_bank::{CsvFileBank, parse_questions};
pub use export::{review_csv_bytes, write_review_csv, write_review_file};
pub use repository::{InMemoryBank, QuestionBank, StorageError};
