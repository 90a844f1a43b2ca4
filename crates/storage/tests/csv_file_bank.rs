use std::io::Write;

use quiz_core::model::{OptionLetter, QuestionId, ReviewRow, ReviewStatus};
use storage::{CsvFileBank, QuestionBank, StorageError, write_review_file};

#[test]
fn file_bank_loads_from_base_name() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("questions");
    let mut file = std::fs::File::create(base.with_extension("csv")).unwrap();
    writeln!(file, "No,Question,A,B,C,D,Correct").unwrap();
    writeln!(file, "1,First?,a,b,c,d,C").unwrap();
    writeln!(file, ",,,,,,").unwrap();
    writeln!(file, "2,Second?,a,b,,,").unwrap();
    drop(file);

    let bank = CsvFileBank::locate(&base).unwrap();
    assert!(bank.describe().starts_with("Local file"));

    let build = bank.load().unwrap();
    assert_eq!(build.skipped.len(), 1);
    let table = build.table;
    assert_eq!(table.len(), 2);
    assert_eq!(
        table.get(QuestionId::new(0)).unwrap().correct(),
        Some(OptionLetter::C)
    );
    assert_eq!(table.get(QuestionId::new(1)).unwrap().correct(), None);
}

#[test]
fn file_bank_reports_file_removed_after_locate() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bank.csv");
    std::fs::write(&path, "No,Question,A\n1,Q,a\n").unwrap();

    let bank = CsvFileBank::locate(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert!(matches!(bank.load(), Err(StorageError::NotFound(_))));
}

#[test]
fn review_file_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("review.csv");
    let rows = vec![ReviewRow {
        id: QuestionId::new(0),
        number: "1".into(),
        text: "Q".into(),
        options: vec![(OptionLetter::A, "a".into())],
        chosen: Some(OptionLetter::A),
        correct: Some(OptionLetter::A),
        status: ReviewStatus::Correct,
    }];

    write_review_file(&path, &rows, &OptionLetter::ALL[..4]).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("1,Q,a,,,,A,A,Correct"));
}
