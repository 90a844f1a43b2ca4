mod cli;
mod config;
mod terminal;

use std::fs::File;
use std::io;
use std::path::Path;

use clap::Parser;
use log::{info, warn};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use services::QuizController;
use storage::{CsvFileBank, QuestionBank};

use crate::cli::Args;
use crate::config::{BANK_ENV, load_config, resolve};
use crate::terminal::Terminal;

/// File logger so log lines never interleave with the quiz on stdout.
fn init_logging(path: &Path, level: LevelFilter) {
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    match File::create(path) {
        Ok(file) => {
            let _ = WriteLogger::init(level, log_config, file);
        }
        Err(err) => eprintln!("logging disabled, cannot open {}: {err}", path.display()),
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let file_config = load_config(args.config.as_deref())?;
    let resolved = resolve(&file_config, &args, std::env::var(BANK_ENV).ok());

    init_logging(&resolved.log_file, resolved.log_level);
    info!("quiz starting with {resolved:?}");

    let bank = CsvFileBank::locate(&resolved.questions)?;
    let controller = QuizController::from_bank(&bank)?;
    if controller.available() == 0 {
        warn!("{} yielded no usable questions", bank.describe());
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut terminal = Terminal::new(
        controller,
        resolved.session,
        resolved.export_path,
        stdin.lock(),
        stdout.lock(),
    );
    if args.start {
        terminal.start()?;
    }
    terminal.run()?;
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
