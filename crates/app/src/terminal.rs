//! Line-oriented front end: reads commands, dispatches them to the
//! controller, and draws the current screen from the view models.

use log::{info, warn};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use quiz_core::model::{Mode, OptionLetter, SessionConfig};
use services::{Command, Outcome, QuizController, Screen, SessionError};
use storage::write_review_file;
use ui::vm::{QuestionVm, ResultsVm, feedback_message, format_datetime, map_question_marks};

const HELP: &str = "\
Home:     start | mode <practice|exam> | count <n> | shuffle <on|off> | shuffle-options <on|off>
Quiz:     a-e or 1-5 to answer | check | n(ext) | p(rev) | g <k> | f(lag) | m(ap)
Results:  export [path] | r(estart) | h(ome)
Anywhere: ? for help | q to quit";

//
// ─── INPUT PARSING ─────────────────────────────────────────────────────────────
//

/// An answer typed either as a source letter or as a 0-based display slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Letter(OptionLetter),
    Slot(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Redraw,
    Start,
    Answer(Choice),
    /// Submit with nothing selected.
    Check,
    Next,
    Previous,
    /// 0-based target.
    Jump(usize),
    Flag,
    Map,
    Restart,
    Home,
    Export(Option<PathBuf>),
    SetMode(Mode),
    SetCount(usize),
    SetShuffleQuestions(bool),
    SetShuffleOptions(bool),
    Help,
    Quit,
}

fn parse_choice(raw: &str) -> Option<Choice> {
    if let Some(letter) = OptionLetter::parse_lenient(raw) {
        return Some(Choice::Letter(letter));
    }
    match raw.parse::<usize>() {
        Ok(n) if (1..=OptionLetter::ALL.len()).contains(&n) => Some(Choice::Slot(n - 1)),
        _ => None,
    }
}

fn parse_switch(raw: Option<&str>, usage: &str) -> Result<bool, String> {
    match raw.map(str::to_ascii_lowercase).as_deref() {
        Some("on" | "yes" | "true") => Ok(true),
        Some("off" | "no" | "false") => Ok(false),
        _ => Err(format!("usage: {usage} <on|off>")),
    }
}

/// Parse one line of user input.
///
/// # Errors
///
/// Returns a message for the user when the line is not a known command.
pub fn parse_input(line: &str) -> Result<Input, String> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Ok(Input::Redraw);
    };
    let arg = parts.next();

    match head.to_ascii_lowercase().as_str() {
        "start" | "s" => Ok(Input::Start),
        "n" | "next" => Ok(Input::Next),
        "p" | "prev" | "previous" => Ok(Input::Previous),
        "g" | "go" | "jump" => match arg.and_then(|raw| raw.parse::<usize>().ok()) {
            Some(k) if k >= 1 => Ok(Input::Jump(k - 1)),
            _ => Err("usage: g <question number>".to_string()),
        },
        "f" | "flag" => Ok(Input::Flag),
        "m" | "map" => Ok(Input::Map),
        "r" | "restart" => Ok(Input::Restart),
        "h" | "home" => Ok(Input::Home),
        "check" | "save" => match arg {
            None => Ok(Input::Check),
            Some(raw) => parse_choice(raw)
                .map(Input::Answer)
                .ok_or_else(|| format!("not an option: {raw}")),
        },
        "export" => Ok(Input::Export(arg.map(PathBuf::from))),
        "mode" => arg
            .and_then(|raw| raw.parse::<Mode>().ok())
            .map(Input::SetMode)
            .ok_or_else(|| "usage: mode <practice|exam>".to_string()),
        "count" => match arg.and_then(|raw| raw.parse::<usize>().ok()) {
            Some(n) if n >= 1 => Ok(Input::SetCount(n)),
            _ => Err("usage: count <n> (at least 1)".to_string()),
        },
        "shuffle" => parse_switch(arg, "shuffle").map(Input::SetShuffleQuestions),
        "shuffle-options" => parse_switch(arg, "shuffle-options").map(Input::SetShuffleOptions),
        "?" | "help" => Ok(Input::Help),
        "q" | "quit" | "exit" => Ok(Input::Quit),
        other => parse_choice(other)
            .map(Input::Answer)
            .ok_or_else(|| format!("unknown command: {other} (type ? for help)")),
    }
}

/// Wording shown for a rejected command.
#[must_use]
pub fn describe_error(err: &SessionError) -> String {
    match err {
        SessionError::EmptyQuestionBank => {
            "No questions available. Check the question bank file.".to_string()
        }
        SessionError::MustCheckFirst => "Check answer first to proceed.".to_string(),
        SessionError::NoSelection => "Please select an option.".to_string(),
        SessionError::NoActiveSession => "No quiz running. Type `start` to begin.".to_string(),
        SessionError::Finished => {
            "This quiz is finished. Type `r` to restart or `h` for home.".to_string()
        }
        other => other.to_string(),
    }
}

//
// ─── TERMINAL ──────────────────────────────────────────────────────────────────
//

pub struct Terminal<R, W> {
    controller: QuizController,
    settings: SessionConfig,
    export_path: PathBuf,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(
        controller: QuizController,
        settings: SessionConfig,
        export_path: PathBuf,
        input: R,
        output: W,
    ) -> Self {
        Self {
            controller,
            settings,
            export_path,
            input,
            output,
        }
    }

    /// Read and apply commands until `q` or end of input.
    ///
    /// # Errors
    ///
    /// Only I/O failures on the terminal streams end the loop early.
    pub fn run(&mut self) -> io::Result<()> {
        self.render()?;
        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            match parse_input(&line) {
                Ok(Input::Quit) => break,
                Ok(input) => self.apply(input)?,
                Err(message) => writeln!(self.output, "{message}")?,
            }
        }
        info!("terminal closed on {:?}", self.controller.screen());
        Ok(())
    }

    /// Start a session with the current settings, as if `start` was typed.
    pub fn start(&mut self) -> io::Result<()> {
        self.apply(Input::Start)
    }

    fn apply(&mut self, input: Input) -> io::Result<()> {
        match input {
            Input::Redraw => self.render(),
            Input::Start => self.command(Command::Start(self.settings)),
            Input::Answer(choice) => self.answer(choice),
            Input::Check => self.command(Command::Submit(None)),
            Input::Next => self.command(Command::Next),
            Input::Previous => self.command(Command::Previous),
            Input::Jump(index) => self.command(Command::JumpTo(index)),
            Input::Flag => self.command(Command::ToggleFlag),
            Input::Restart => self.command(Command::Restart),
            Input::Home => self.command(Command::Home),
            Input::Map => self.render_map(),
            Input::Export(path) => self.export(path),
            Input::SetMode(mode) => {
                self.settings.mode = mode;
                writeln!(self.output, "Mode: {mode} (applies to the next start)")
            }
            Input::SetCount(count) => {
                self.settings.question_count = count;
                writeln!(self.output, "Questions per session: {count}")
            }
            Input::SetShuffleQuestions(on) => {
                self.settings.shuffle_questions = on;
                writeln!(self.output, "Shuffle questions: {}", on_off(on))
            }
            Input::SetShuffleOptions(on) => {
                self.settings.shuffle_options = on;
                writeln!(self.output, "Shuffle options: {}", on_off(on))
            }
            Input::Help => writeln!(self.output, "{HELP}"),
            Input::Quit => Ok(()),
        }
    }

    fn answer(&mut self, choice: Choice) -> io::Result<()> {
        match self.controller.screen() {
            Screen::Home => return self.report(&SessionError::NoActiveSession),
            Screen::Results => return self.report(&SessionError::Finished),
            Screen::Quiz => {}
        }
        let letter = match choice {
            Choice::Letter(letter) => Some(letter),
            Choice::Slot(slot) => self
                .controller
                .session()
                .and_then(QuestionVm::from_session)
                .and_then(|vm| vm.letter_at(slot)),
        };
        let Some(letter) = letter else {
            return writeln!(self.output, "No such option on this question.");
        };

        match self.controller.dispatch(Command::Submit(Some(letter))) {
            Ok(Outcome::Submitted(result)) => {
                writeln!(self.output, "{}", feedback_message(result, letter))?;
                if self.controller.screen() == Screen::Results || !self.is_practice() {
                    self.render()?;
                }
                Ok(())
            }
            Ok(_) => self.render(),
            Err(err) => self.report(&err),
        }
    }

    fn command(&mut self, command: Command) -> io::Result<()> {
        match self.controller.dispatch(command) {
            Ok(Outcome::Flagged { flagged, .. }) => writeln!(
                self.output,
                "{}",
                if flagged { "Flagged ⚑" } else { "Flag removed" }
            ),
            Ok(Outcome::Started { total }) => {
                writeln!(self.output, "Starting a {}-question quiz.", total)?;
                self.render()
            }
            Ok(_) => self.render(),
            Err(err) => self.report(&err),
        }
    }

    fn report(&mut self, err: &SessionError) -> io::Result<()> {
        if let SessionError::Storage(inner) = err {
            warn!("storage failure: {inner}");
        }
        writeln!(self.output, "{}", describe_error(err))
    }

    fn is_practice(&self) -> bool {
        self.controller
            .session()
            .is_some_and(|session| session.mode().is_practice())
    }

    fn export(&mut self, path: Option<PathBuf>) -> io::Result<()> {
        let Some(report) = self.controller.results() else {
            return writeln!(self.output, "Finish the quiz before exporting the review.");
        };
        let path = path.unwrap_or_else(|| self.export_path.clone());
        match write_review_file(&path, &report.rows, &report.letter_columns) {
            Ok(()) => {
                info!("review exported to {}", path.display());
                writeln!(self.output, "Review written to {}", path.display())
            }
            Err(err) => {
                warn!("export to {} failed: {err}", path.display());
                writeln!(self.output, "Could not write {}: {err}", path.display())
            }
        }
    }

    //
    // ─── RENDERING ─────────────────────────────────────────────────────────────
    //

    fn render(&mut self) -> io::Result<()> {
        match self.controller.screen() {
            Screen::Home => self.render_home(),
            Screen::Quiz => self.render_question(),
            Screen::Results => self.render_results(),
        }
    }

    fn render_home(&mut self) -> io::Result<()> {
        let available = self.controller.available();
        writeln!(self.output, "== Quiz ==")?;
        if available == 0 {
            writeln!(self.output, "No questions available.")?;
        } else {
            writeln!(
                self.output,
                "{available} questions loaded from {}",
                self.controller.source()
            )?;
        }
        let skipped = self.controller.skipped();
        if skipped > 0 {
            writeln!(
                self.output,
                "{skipped} rows skipped (blank question or no answer options)"
            )?;
        }
        let settings = self.settings;
        writeln!(
            self.output,
            "Mode: {} | Questions: {} | Shuffle questions: {} | Shuffle options: {}",
            settings.mode,
            settings.clamped_count(available),
            on_off(settings.shuffle_questions),
            on_off(settings.shuffle_options),
        )?;
        writeln!(self.output, "Type `start` to begin or `?` for help.")
    }

    fn render_question(&mut self) -> io::Result<()> {
        let Some(session) = self.controller.session() else {
            return Ok(());
        };
        let Some(vm) = QuestionVm::from_session(session) else {
            return Ok(());
        };
        let progress = session.progress();

        writeln!(self.output)?;
        writeln!(self.output, "-- {} | {} --", vm.mode_label, vm.header)?;
        if vm.flagged {
            writeln!(self.output, "⚑ flagged")?;
        }
        writeln!(self.output, "[{}] {}", vm.number, vm.prompt)?;
        for (slot, option) in vm.options.iter().enumerate() {
            let marker = if vm.selected == Some(slot) { '>' } else { ' ' };
            writeln!(self.output, "{marker} {}) {}", slot + 1, option.label)?;
        }
        writeln!(
            self.output,
            "Answered {}/{} | Flagged {} | type a letter to {}",
            progress.answered,
            progress.total,
            progress.flagged,
            vm.submit_label.to_lowercase(),
        )?;
        if let Some(hint) = vm.next_hint {
            writeln!(self.output, "{hint}")?;
        }
        Ok(())
    }

    fn render_map(&mut self) -> io::Result<()> {
        let Some(session) = self.controller.session() else {
            return writeln!(self.output, "No quiz running.");
        };
        let cells = map_question_marks(session);
        let line = cells
            .iter()
            .map(|cell| {
                if cell.is_current {
                    format!("[{}{}]", cell.label, cell.glyph)
                } else {
                    format!(" {}{} ", cell.label, cell.glyph)
                }
            })
            .collect::<Vec<_>>()
            .join("");
        writeln!(self.output, "{line}")?;
        writeln!(self.output, "✅ correct  ❌ incorrect  • answered  ◻️ unanswered  ⚑ flagged")
    }

    fn render_results(&mut self) -> io::Result<()> {
        let Some(report) = self.controller.results() else {
            return Ok(());
        };
        let vm = ResultsVm::from_report(&report);

        writeln!(self.output)?;
        writeln!(self.output, "== Results ({}) ==", report.mode)?;
        writeln!(self.output, "Score: {} ({})", vm.score_label, vm.percent_label)?;
        writeln!(self.output, "Started: {}", format_datetime(report.started_at))?;
        if let Some(elapsed) = &vm.elapsed_label {
            writeln!(self.output, "Time: {elapsed}")?;
        }
        writeln!(self.output, "No | Chosen | Correct | Status | Question")?;
        for row in &vm.rows {
            writeln!(
                self.output,
                "{} | {} | {} | {} | {}",
                row.number, row.chosen, row.correct, row.status, row.question
            )?;
        }
        writeln!(
            self.output,
            "Type `export` to save the review, `r` to restart or `h` for home."
        )
    }
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}
