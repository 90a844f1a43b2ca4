//! CSV question bank loader.
//!
//! Expected columns: `No, Question, A, B, C, D[, E], Correct`. Missing columns
//! read as blank; extra columns are ignored.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use quiz_core::model::{OptionLetter, QuestionDraft, QuestionTable, TableBuild};

use crate::repository::{QuestionBank, StorageError, finish_build};

const BOM: char = '\u{feff}';
const DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Parse a CSV question bank from raw bytes.
///
/// Malformed records are skipped with a warning rather than failing the load.
///
/// # Errors
///
/// Returns `StorageError::Csv` if the header row cannot be read.
pub fn parse_questions(bytes: &[u8]) -> Result<TableBuild, StorageError> {
    let text = decode(bytes);
    let delimiter = sniff_delimiter(&text);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .has_headers(true)
        .from_reader(text.as_bytes());

    let columns = Columns::from_headers(reader.headers()?);
    for missing in columns.missing_required() {
        warn!("question bank has no {missing:?} column; treating it as blank");
    }

    let mut drafts = Vec::new();
    for (index, record) in reader.records().enumerate() {
        match record {
            Ok(record) => drafts.push(columns.draft(&record)),
            Err(err) => warn!("skipping malformed record {}: {err}", index + 1),
        }
    }

    Ok(QuestionTable::from_drafts(drafts))
}

/// UTF-8 (with or without byte-order mark), falling back to Latin-1.
fn decode(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_owned(),
        Err(_) => encoding_rs::mem::decode_latin1(bytes).into_owned(),
    }
}

/// Pick the candidate delimiter that occurs most often in the header line.
fn sniff_delimiter(text: &str) -> u8 {
    let header = text.lines().next().unwrap_or_default();
    DELIMITERS
        .iter()
        .copied()
        .map(|d| (d, header.bytes().filter(|b| *b == d).count()))
        .filter(|(_, count)| *count > 0)
        .max_by_key(|(_, count)| *count)
        .map_or(b',', |(d, _)| d)
}

fn normalize_header(raw: &str) -> String {
    raw.replace(BOM, "").trim().to_owned()
}

/// Collapse whitespace runs to a single space and trim.
fn normalize_cell(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

struct Columns {
    by_name: HashMap<String, usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let mut by_name = HashMap::new();
        for (index, header) in headers.iter().enumerate() {
            // First occurrence wins on duplicate headers.
            by_name.entry(normalize_header(header)).or_insert(index);
        }
        Self { by_name }
    }

    fn missing_required(&self) -> Vec<&'static str> {
        ["No", "Question", "A", "B", "C", "D", "Correct"]
            .into_iter()
            .filter(|name| !self.by_name.contains_key(*name))
            .collect()
    }

    fn cell(&self, record: &csv::StringRecord, name: &str) -> String {
        self.by_name
            .get(name)
            .and_then(|index| record.get(*index))
            .map(normalize_cell)
            .unwrap_or_default()
    }

    fn draft(&self, record: &csv::StringRecord) -> QuestionDraft {
        let mut draft = QuestionDraft::new(self.cell(record, "No"), self.cell(record, "Question"));
        for letter in OptionLetter::ALL {
            draft = draft.with_option(letter, self.cell(record, letter.as_str()));
        }
        draft.with_correct(self.cell(record, "Correct").to_uppercase())
    }
}

/// Question bank read from a CSV file on disk.
#[derive(Debug, Clone)]
pub struct CsvFileBank {
    path: PathBuf,
}

impl CsvFileBank {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolve a bank from a base name: `questions` → `questions.csv`.
    ///
    /// Paths that already carry an extension are used as given.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the resolved file does not exist.
    pub fn locate(base: impl AsRef<Path>) -> Result<Self, StorageError> {
        let base = base.as_ref();
        let path = if base.extension().is_some() {
            base.to_path_buf()
        } else {
            base.with_extension("csv")
        };
        if !path.is_file() {
            return Err(StorageError::NotFound(path));
        }
        Ok(Self::new(path))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl QuestionBank for CsvFileBank {
    fn load(&self) -> Result<TableBuild, StorageError> {
        let bytes = fs::read(&self.path).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => StorageError::NotFound(self.path.clone()),
            _ => StorageError::Io(err),
        })?;
        let build = parse_questions(&bytes)?;
        let build = finish_build(build, &self.path.display().to_string());
        info!(
            "loaded {} questions from {} ({} rows skipped)",
            build.table.len(),
            self.path.display(),
            build.skipped.len()
        );
        Ok(build)
    }

    fn describe(&self) -> String {
        format!("Local file ({})", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionId;

    #[test]
    fn parses_standard_bank() {
        let csv = "No,Question,A,B,C,D,Correct\n\
                   1,What is 2+2?,3,4,5,6,b\n\
                   2,Sky colour?,Blue,Green,,,A\n";
        let build = parse_questions(csv.as_bytes()).unwrap();
        assert_eq!(build.table.len(), 2);

        let first = build.table.get(QuestionId::new(0)).unwrap();
        assert_eq!(first.number(), "1");
        assert_eq!(first.correct(), Some(OptionLetter::B));

        let second = build.table.get(QuestionId::new(1)).unwrap();
        assert_eq!(second.letters(), vec![OptionLetter::A, OptionLetter::B]);
    }

    #[test]
    fn strips_bom_and_header_whitespace() {
        let csv = "\u{feff} No , Question ,A,B,Correct\n7,Q,x,y,A\n";
        let build = parse_questions(csv.as_bytes()).unwrap();
        let record = build.table.get(QuestionId::new(0)).unwrap();
        assert_eq!(record.number(), "7");
        assert_eq!(record.correct(), Some(OptionLetter::A));
    }

    #[test]
    fn collapses_whitespace_in_cells() {
        let csv = "No,Question,A,Correct\n1,\"  What   is\n  this? \",  one   two ,a\n";
        let build = parse_questions(csv.as_bytes()).unwrap();
        let record = build.table.get(QuestionId::new(0)).unwrap();
        assert_eq!(record.text(), "What is this?");
        assert_eq!(record.option_text(OptionLetter::A), Some("one two"));
    }

    #[test]
    fn sniffs_semicolon_delimiter() {
        let csv = "No;Question;A;B;Correct\n1;Q, with comma;x;y;B\n";
        let build = parse_questions(csv.as_bytes()).unwrap();
        let record = build.table.get(QuestionId::new(0)).unwrap();
        assert_eq!(record.text(), "Q, with comma");
        assert_eq!(record.correct(), Some(OptionLetter::B));
    }

    #[test]
    fn falls_back_to_latin1() {
        let mut bytes = b"No,Question,A,Correct\n1,Caf".to_vec();
        bytes.push(0xE9);
        bytes.extend_from_slice(b"?,gr");
        bytes.push(0xFC);
        bytes.extend_from_slice(b"n,A\n");
        let build = parse_questions(&bytes).unwrap();
        let record = build.table.get(QuestionId::new(0)).unwrap();
        assert_eq!(record.text(), "Café?");
        assert_eq!(record.option_text(OptionLetter::A), Some("grün"));
    }

    #[test]
    fn blank_questions_and_invalid_keys() {
        let csv = "No,Question,A,B,C,D,E,Correct\n\
                   1,,x,y,,,,A\n\
                   2,Keep me,x,y,,,z,maybe\n\
                   3,Five options,a,b,c,d,e,e\n";
        let build = parse_questions(csv.as_bytes()).unwrap();
        assert_eq!(build.table.len(), 2);
        assert_eq!(build.skipped.len(), 1);

        let kept = build.table.get(QuestionId::new(0)).unwrap();
        assert_eq!(kept.correct(), None);
        assert!(kept.key_demoted());

        let five = build.table.get(QuestionId::new(1)).unwrap();
        assert_eq!(five.correct(), Some(OptionLetter::E));
        assert_eq!(build.table.letter_columns().len(), 5);
    }

    #[test]
    fn missing_columns_read_as_blank() {
        let csv = "Question,A\nOnly prompt,alpha\n";
        let build = parse_questions(csv.as_bytes()).unwrap();
        let record = build.table.get(QuestionId::new(0)).unwrap();
        assert_eq!(record.number(), "");
        assert_eq!(record.correct(), None);
    }

    #[test]
    fn empty_input_yields_empty_table() {
        let build = parse_questions(b"").unwrap();
        assert!(build.table.is_empty());
    }

    #[test]
    fn locate_reports_missing_file() {
        let err = CsvFileBank::locate("/definitely/not/here/questions").unwrap_err();
        match err {
            StorageError::NotFound(path) => {
                assert_eq!(path.extension().and_then(|e| e.to_str()), Some("csv"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
