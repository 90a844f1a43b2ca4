//! CSV export of the end-of-session review table.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use quiz_core::model::{OptionLetter, ReviewRow};

use crate::repository::StorageError;

/// Spreadsheet applications use the BOM to detect UTF-8.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Write review rows as `No, Question, <letters>, Chosen, Correct, Status`.
///
/// # Errors
///
/// Returns `StorageError` if writing fails.
pub fn write_review_csv<W: Write>(
    mut writer: W,
    rows: &[ReviewRow],
    letters: &[OptionLetter],
) -> Result<(), StorageError> {
    writer.write_all(UTF8_BOM)?;

    let mut csv = csv::Writer::from_writer(writer);

    let mut header = vec!["No", "Question"];
    header.extend(letters.iter().map(|l| l.as_str()));
    header.extend(["Chosen", "Correct", "Status"]);
    csv.write_record(&header)?;

    for row in rows {
        let mut record = vec![row.number.as_str(), row.text.as_str()];
        record.extend(letters.iter().map(|l| row.option_text(*l)));
        record.push(row.chosen.map_or("", OptionLetter::as_str));
        record.push(row.correct.map_or("", OptionLetter::as_str));
        record.push(row.status.label());
        csv.write_record(&record)?;
    }

    csv.flush()?;
    Ok(())
}

/// Render the review table into an in-memory CSV document.
///
/// # Errors
///
/// Returns `StorageError` if serialization fails.
pub fn review_csv_bytes(
    rows: &[ReviewRow],
    letters: &[OptionLetter],
) -> Result<Vec<u8>, StorageError> {
    let mut out = Vec::new();
    write_review_csv(&mut out, rows, letters)?;
    Ok(out)
}

/// Write the review table to a file, replacing it if present.
///
/// # Errors
///
/// Returns `StorageError::Io` if the file cannot be created or written.
pub fn write_review_file(
    path: impl AsRef<Path>,
    rows: &[ReviewRow],
    letters: &[OptionLetter],
) -> Result<(), StorageError> {
    let file = File::create(path.as_ref())?;
    write_review_csv(BufWriter::new(file), rows, letters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{QuestionId, ReviewStatus};

    fn row() -> ReviewRow {
        ReviewRow {
            id: QuestionId::new(0),
            number: "12".into(),
            text: "Pick, carefully".into(),
            options: vec![
                (OptionLetter::A, "alpha".into()),
                (OptionLetter::C, "gamma".into()),
            ],
            chosen: Some(OptionLetter::C),
            correct: Some(OptionLetter::A),
            status: ReviewStatus::Incorrect,
        }
    }

    #[test]
    fn writes_bom_header_and_rows() {
        let letters = &OptionLetter::ALL[..4];
        let bytes = review_csv_bytes(&[row()], letters).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));

        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("No,Question,A,B,C,D,Chosen,Correct,Status")
        );
        assert_eq!(
            lines.next(),
            Some("12,\"Pick, carefully\",alpha,,gamma,,C,A,Incorrect")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn unanswered_and_no_key_cells_are_blank() {
        let mut r = row();
        r.chosen = None;
        r.correct = None;
        r.status = ReviewStatus::NoKey;

        let bytes = review_csv_bytes(&[r], &OptionLetter::ALL).unwrap();
        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        let data = text.lines().nth(1).unwrap();
        assert!(data.ends_with(",,,No key"), "{data}");
        assert!(text.starts_with("No,Question,A,B,C,D,E,"));
    }
}
