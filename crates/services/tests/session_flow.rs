use std::sync::Arc;

use quiz_core::model::{
    Mode, OptionLetter, QuestionDraft, QuestionId, QuestionTable, ReviewStatus, SessionConfig,
};
use quiz_core::time::fixed_clock;
use rand::SeedableRng;
use rand::rngs::StdRng;
use services::{
    Command, Outcome, QuizController, QuizSession, Screen, SessionError, Step, SubmitResult,
    compile,
};
use storage::InMemoryBank;

fn draft(no: &str, correct: &str) -> QuestionDraft {
    QuestionDraft::new(no, format!("Question {no}"))
        .with_option(OptionLetter::A, "first")
        .with_option(OptionLetter::B, "second")
        .with_option(OptionLetter::C, "third")
        .with_option(OptionLetter::D, "fourth")
        .with_correct(correct)
}

fn table(keys: &[&str]) -> Arc<QuestionTable> {
    let drafts = keys
        .iter()
        .enumerate()
        .map(|(i, key)| draft(&(i + 1).to_string(), key));
    Arc::new(QuestionTable::from_drafts(drafts).table)
}

fn unshuffled(mode: Mode, count: usize) -> SessionConfig {
    SessionConfig::new(mode, count)
        .with_shuffle_questions(false)
        .with_shuffle_options(false)
}

#[test]
fn practice_round_trip() {
    let mut session = QuizSession::start(
        table(&["A", "B"]),
        unshuffled(Mode::Practice, 2),
        &mut StdRng::seed_from_u64(1),
        fixed_clock(),
    )
    .unwrap();
    let q0 = QuestionId::new(0);
    let q1 = QuestionId::new(1);

    assert_eq!(
        session.submit(q0, Some(OptionLetter::A)).unwrap(),
        SubmitResult::Correct
    );
    assert_eq!(session.score(), 1);
    assert_eq!(session.next().unwrap(), Step::Moved(1));

    assert_eq!(
        session.submit(q1, Some(OptionLetter::C)).unwrap(),
        SubmitResult::Incorrect {
            correct: OptionLetter::B
        }
    );
    assert_eq!(session.score(), 1);
    assert_eq!(session.next().unwrap(), Step::Finished);

    let report = compile(&session);
    assert_eq!((report.score, report.total), (1, 2));
    assert_eq!(report.rows[0].status, ReviewStatus::Correct);
    assert_eq!(report.rows[1].status, ReviewStatus::Incorrect);
}

#[test]
fn exam_with_unanswered_question() {
    let mut session = QuizSession::start(
        table(&["A", "B", "C"]),
        unshuffled(Mode::Exam, 3),
        &mut StdRng::seed_from_u64(2),
        fixed_clock(),
    )
    .unwrap();

    session
        .submit(QuestionId::new(0), Some(OptionLetter::A))
        .unwrap();
    session.jump_to(2).unwrap();
    session
        .submit(QuestionId::new(2), Some(OptionLetter::D))
        .unwrap();
    assert!(session.is_finished());

    let report = compile(&session);
    assert_eq!(report.score, 1);
    assert_eq!(report.rows[1].status, ReviewStatus::Unanswered);
    assert_eq!(report.rows[1].chosen, None);
    assert_eq!(report.rows[2].status, ReviewStatus::Incorrect);
}

#[test]
fn question_without_key() {
    let mut session = QuizSession::start(
        table(&[""]),
        unshuffled(Mode::Practice, 1),
        &mut StdRng::seed_from_u64(3),
        fixed_clock(),
    )
    .unwrap();
    let id = QuestionId::new(0);

    for letter in [OptionLetter::A, OptionLetter::B] {
        assert_eq!(
            session.submit(id, Some(letter)).unwrap(),
            SubmitResult::NoKeyAvailable
        );
        assert_eq!(session.score(), 0);
        assert!(!session.is_scored(id));
    }

    let report = compile(&session);
    assert_eq!(report.rows[0].status, ReviewStatus::NoKey);
    assert_eq!(report.rows[0].chosen, Some(OptionLetter::B));
}

#[test]
fn selection_size_matches_clamped_request() {
    let bank = table(&["A"; 7]);
    for requested in [0, 1, 4, 7, 8, 1000] {
        let session = QuizSession::start(
            Arc::clone(&bank),
            SessionConfig::new(Mode::Exam, requested),
            &mut StdRng::seed_from_u64(requested as u64),
            fixed_clock(),
        )
        .unwrap();
        assert_eq!(session.len(), requested.clamp(1, 7));
    }
}

#[test]
fn shuffled_answers_follow_their_letters() {
    let mut session = QuizSession::start(
        table(&["A", "B", "C", "D", "A", "B"]),
        SessionConfig::new(Mode::Practice, 6),
        &mut StdRng::seed_from_u64(99),
        fixed_clock(),
    )
    .unwrap();

    // Answer every question with the option displayed last, then revisit.
    let mut expected = Vec::new();
    for index in 0..session.len() {
        session.jump_to(index).unwrap();
        let id = session.current_id().unwrap();
        let last_shown = *session.option_order(id).unwrap().last().unwrap();
        session.submit(id, Some(last_shown)).unwrap();
        expected.push((id, last_shown));
    }
    for (index, (id, letter)) in expected.iter().enumerate().rev() {
        session.jump_to(index).unwrap();
        assert_eq!(session.current_id(), Some(*id));
        assert_eq!(session.answer(*id), Some(*letter));
        assert_eq!(session.option_order(*id).unwrap().last(), Some(letter));
    }
}

#[test]
fn controller_drives_an_exam() {
    let drafts = vec![draft("10", "B"), draft("11", "C"), draft("12", "")];
    let mut ctl = QuizController::from_bank(&InMemoryBank::new(drafts))
        .unwrap()
        .with_rng(Box::new(StdRng::seed_from_u64(5)))
        .with_clock(fixed_clock());

    ctl.dispatch(Command::Start(unshuffled(Mode::Exam, 3)))
        .unwrap();
    assert_eq!(ctl.screen(), Screen::Quiz);

    for letter in [OptionLetter::B, OptionLetter::A, OptionLetter::A] {
        assert_eq!(
            ctl.dispatch(Command::Submit(Some(letter))).unwrap(),
            Outcome::Submitted(SubmitResult::Saved)
        );
    }
    assert_eq!(ctl.screen(), Screen::Results);

    let report = ctl.results().unwrap();
    assert_eq!(report.score, 1);
    let statuses: Vec<ReviewStatus> = report.rows.iter().map(|r| r.status).collect();
    assert_eq!(
        statuses,
        vec![
            ReviewStatus::Correct,
            ReviewStatus::Incorrect,
            ReviewStatus::NoKey
        ]
    );
    let numbers: Vec<&str> = report.rows.iter().map(|r| r.number.as_str()).collect();
    assert_eq!(numbers, vec!["10", "11", "12"]);

    assert!(matches!(
        ctl.dispatch(Command::Submit(Some(OptionLetter::A))),
        Err(SessionError::Finished)
    ));
}
